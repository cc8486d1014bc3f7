use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::PcbError;
use crate::spacial::Position;
use crate::units::Unit;

/// The view box is twice the size of the canvas.
pub const VIEW_BOX_SCALE: f64 = 2.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    #[default]
    Line,
    Dot,
}

impl Display for GridStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GridStyle::Line => f.write_str("line"),
            GridStyle::Dot => f.write_str("dot"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingAngle {
    #[default]
    #[serde(rename = "45")]
    Deg45,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "free")]
    Free,
}

impl Display for RoutingAngle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingAngle::Deg45 => f.write_str("45"),
            RoutingAngle::Deg90 => f.write_str("90"),
            RoutingAngle::Free => f.write_str("free"),
        }
    }
}

/// Global document settings.
///
/// Sizes are in canvas units, where 1 canvas unit is 10 mil, e.g. the default 1200x1200 canvas is 12000x12000 mil.
///
/// Settings can be built in code, using the `with_*` methods, or loaded from JSON, any missing keys take their
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    unit: Unit,
    width: f64,
    height: f64,
    origin: Position,
    grid_size: f64,
    grid_style: GridStyle,
    /// snap size
    snap_size: f64,
    /// snap size used when the ALT key is held
    alt_snap_size: f64,
    routing_width: f64,
    routing_angle: RoutingAngle,
    show_grid: bool,
    show_copper_area: bool,
    background_color: String,
    grid_color: String,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            unit: Unit::Mil,
            width: 1200.0,
            height: 1200.0,
            origin: Position::origin(),
            grid_size: 10.0,
            grid_style: GridStyle::Line,
            snap_size: 1.0,
            alt_snap_size: 0.5,
            routing_width: 1.0,
            routing_angle: RoutingAngle::Deg45,
            show_grid: true,
            show_copper_area: true,
            background_color: "#000000".to_string(),
            grid_color: "#FFFFFF".to_string(),
        }
    }
}

impl Canvas {
    pub fn from_json(json: &str) -> Result<Self, PcbError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_grid(mut self, size: f64, style: GridStyle, visible: bool, color: &str) -> Self {
        self.grid_size = size;
        self.grid_style = style;
        self.show_grid = visible;
        self.grid_color = color.to_string();
        self
    }

    pub fn with_snap(mut self, snap_size: f64, alt_snap_size: f64) -> Self {
        self.snap_size = snap_size;
        self.alt_snap_size = alt_snap_size;
        self
    }

    pub fn with_routing(mut self, width: f64, angle: RoutingAngle) -> Self {
        self.routing_width = width;
        self.routing_angle = angle;
        self
    }

    pub fn with_background_color(mut self, color: &str) -> Self {
        self.background_color = color.to_string();
        self
    }

    pub fn with_copper_area(mut self, visible: bool) -> Self {
        self.show_copper_area = visible;
        self
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn view_box_width(&self) -> f64 {
        self.width * VIEW_BOX_SCALE
    }

    pub fn view_box_height(&self) -> f64 {
        self.height * VIEW_BOX_SCALE
    }

    fn grid_visibility(&self) -> &'static str {
        match self.show_grid {
            true => "yes",
            false => "none",
        }
    }

    fn copper_area_visibility(&self) -> &'static str {
        match self.show_copper_area {
            true => "visible",
            false => "invisible",
        }
    }
}

/// The `CA` record
impl Display for Canvas {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields: [&dyn Display; 17] = [
            &self.view_box_width(),
            &self.view_box_height(),
            &self.background_color,
            &self.grid_visibility(),
            &self.grid_color,
            &self.grid_size,
            &self.width,
            &self.height,
            &self.grid_style,
            &self.snap_size,
            &self.unit,
            &self.routing_width,
            &self.routing_angle,
            &self.copper_area_visibility(),
            &self.alt_snap_size,
            &self.origin.x,
            &self.origin.y,
        ];

        f.write_str("CA")?;
        for field in fields {
            write!(f, "~{}", field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default_record() {
        assert_eq!(
            Canvas::default().to_string(),
            "CA~2400~2400~#000000~yes~#FFFFFF~10~1200~1200~line~1~mil~1~45~visible~0.5~0~0"
        );
    }

    #[test]
    fn test_custom_record() {
        // given
        let canvas = Canvas::default()
            .with_unit(Unit::Millimeter)
            .with_size(500.0, 250.5)
            .with_origin(Position::new(-10.0, 20.0))
            .with_grid(5.0, GridStyle::Dot, false, "#CCCCCC")
            .with_snap(0.5, 0.25)
            .with_routing(0.8, RoutingAngle::Free)
            .with_background_color("#101010")
            .with_copper_area(false);

        // when
        let record = canvas.to_string();

        // then
        assert_eq!(
            record,
            "CA~1000~501~#101010~none~#CCCCCC~5~500~250.5~dot~0.5~mm~0.8~free~invisible~0.25~-10~20"
        );
    }

    #[rstest]
    #[case(1200.0, 1200.0)]
    #[case(0.0, 10.0)]
    #[case(333.3, 0.25)]
    fn test_view_box_is_twice_the_size(#[case] width: f64, #[case] height: f64) {
        let canvas = Canvas::default().with_size(width, height);

        let record = canvas.to_string();
        let fields = record
            .split('~')
            .collect::<Vec<_>>();

        assert_eq!(fields[1], (width * 2.0).to_string());
        assert_eq!(fields[2], (height * 2.0).to_string());
    }

    #[test]
    fn test_from_json_uses_defaults_for_missing_keys() {
        // given
        let json = r#"{ "unit": "mm", "width": 800, "routing_angle": "90", "grid_style": "dot" }"#;

        // when
        let canvas = Canvas::from_json(json).unwrap();

        // then
        assert_eq!(
            canvas,
            Canvas::default()
                .with_unit(Unit::Millimeter)
                .with_size(800.0, 1200.0)
                .with_routing(1.0, RoutingAngle::Deg90)
                .with_grid(10.0, GridStyle::Dot, true, "#FFFFFF")
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_unit() {
        let result = Canvas::from_json(r#"{ "unit": "furlong" }"#);

        assert!(matches!(result, Err(PcbError::Json(_))));
    }
}
