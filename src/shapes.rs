//! Shape records.
//!
//! Every shape holds geometry that is already in internal units (1/10 mil, Y-down). Encoding is done by the
//! `Display` implementations which produce one `~` delimited record.
//!
//! Field values are not escaped, a value containing `~` corrupts the record. Widths, diameters and radii are not
//! validated either, non-positive values are emitted as given. Both are the caller's responsibility.

use std::fmt::{Display, Formatter};

use crate::geometry::ArcPath;
use crate::layer::LayerId;
use crate::spacial::{Position, Vector};

pub const FIELD_SEPARATOR: char = '~';

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Track(TrackShape),
    Arc(ArcShape),
    Hole(HoleShape),
    Via(ViaShape),
    Text(TextShape),
}

impl Shape {
    /// Text records have no identifier
    pub fn id(&self) -> Option<&str> {
        match self {
            Shape::Track(track) => Some(&track.id),
            Shape::Arc(arc) => Some(&arc.id),
            Shape::Hole(hole) => Some(&hole.id),
            Shape::Via(via) => Some(&via.id),
            Shape::Text(_) => None,
        }
    }

    pub fn layer(&self) -> Option<LayerId> {
        match self {
            Shape::Track(track) => Some(track.layer),
            Shape::Arc(arc) => Some(arc.layer),
            Shape::Text(text) => Some(text.layer),
            Shape::Hole(_) | Shape::Via(_) => None,
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Track(track) => track.fmt(f),
            Shape::Arc(arc) => arc.fmt(f),
            Shape::Hole(hole) => hole.fmt(f),
            Shape::Via(via) => via.fmt(f),
            Shape::Text(text) => text.fmt(f),
        }
    }
}

fn locked_flag(locked: bool) -> u8 {
    match locked {
        true => 1,
        false => 0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackShape {
    pub width: f64,
    pub layer: LayerId,
    pub net: String,
    /// Rendered in the order given, callers should supply at least 2.
    pub points: Vec<Position>,
    pub id: String,
    pub locked: bool,
}

impl Display for TrackShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let points = self
            .points
            .iter()
            .map(|point| format!("{} {}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" ");

        write!(
            f,
            "TRACK~{}~{}~{}~{}~{}~{}",
            self.width,
            self.layer,
            self.net,
            points,
            self.id,
            locked_flag(self.locked)
        )
    }
}

/// A single radius applies to both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcRadius {
    Circular(f64),
    Elliptical { x: f64, y: f64 },
}

impl ArcRadius {
    pub fn radii(&self) -> Vector {
        match *self {
            ArcRadius::Circular(radius) => Vector::new(radius, radius),
            ArcRadius::Elliptical {
                x,
                y,
            } => Vector::new(x, y),
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        match *self {
            ArcRadius::Circular(radius) => ArcRadius::Circular(radius * factor),
            ArcRadius::Elliptical {
                x,
                y,
            } => ArcRadius::Elliptical {
                x: x * factor,
                y: y * factor,
            },
        }
    }
}

impl From<f64> for ArcRadius {
    fn from(value: f64) -> Self {
        ArcRadius::Circular(value)
    }
}

impl From<(f64, f64)> for ArcRadius {
    fn from(value: (f64, f64)) -> Self {
        ArcRadius::Elliptical {
            x: value.0,
            y: value.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub width: f64,
    pub layer: LayerId,
    pub net: String,
    pub path: ArcPath,
    pub id: String,
    pub locked: bool,
}

impl ArcShape {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start: Position,
        end: Position,
        radius: ArcRadius,
        width: f64,
        layer: LayerId,
        net: String,
        id: String,
        locked: bool,
    ) -> Self {
        Self {
            width,
            layer,
            net,
            path: ArcPath::new(start, end, radius.radii()),
            id,
            locked,
        }
    }
}

impl Display for ArcShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ARC~{}~{}~{}~{}~{}~{}",
            self.width,
            self.layer,
            self.net,
            self.path.to_record_field(),
            self.id,
            locked_flag(self.locked)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoleShape {
    pub center: Position,
    /// Half the internal diameter
    pub radius: f64,
    pub id: String,
    pub locked: bool,
}

impl Display for HoleShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HOLE~{}~{}~{}~{}~{}",
            self.center.x,
            self.center.y,
            self.radius,
            self.id,
            locked_flag(self.locked)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViaShape {
    pub center: Position,
    pub diameter: f64,
    pub net: String,
    pub hole_radius: f64,
    pub id: String,
    pub locked: bool,
}

impl Display for ViaShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VIA~{}~{}~{}~{}~{}~{}~{}",
            self.center.x,
            self.center.y,
            self.diameter,
            self.net,
            self.hole_radius,
            self.id,
            locked_flag(self.locked)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub position: Position,
    pub font_size: f64,
    pub font_width: f64,
    pub layer: LayerId,
}

impl Display for TextShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // 'L', '0', 'none' and the empty fields are fixed by the format
        write!(
            f,
            "TEXT~L~{}~{}~{}~0~none~{}~~{}~{}~",
            self.position.x, self.position.y, self.font_width, self.layer, self.font_size, self.text
        )
    }
}
