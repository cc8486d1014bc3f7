use std::fmt::{Display, Formatter};

use log::{debug, trace};

use crate::document::ShapeList;
use crate::error::PcbError;
use crate::geometry::{RectangleDecomposition, RectangleOutline};
use crate::shapes::{ArcRadius, ArcShape, Shape, TextShape, TrackShape};
use crate::spacial::Position;
use crate::units::{convert, convert_length, to_internal, to_internal_length, Unit, INTERNAL_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl LayerId {
    pub const TOP: LayerId = LayerId(1);
    pub const BOTTOM: LayerId = LayerId(2);
    pub const TOP_SILK: LayerId = LayerId(3);
    pub const BOTTOM_SILK: LayerId = LayerId(4);
    pub const TOP_PASTER: LayerId = LayerId(5);
    pub const BOTTOM_PASTER: LayerId = LayerId(6);
    pub const TOP_SOLDER: LayerId = LayerId(7);
    pub const BOTTOM_SOLDER: LayerId = LayerId(8);
    pub const RAT_LINES: LayerId = LayerId(9);
    pub const BOARD_OUTLINE: LayerId = LayerId(10);
    pub const MULTI_LAYER: LayerId = LayerId(11);
    pub const DOCUMENT: LayerId = LayerId(12);

    /// Inner copper layers are numbered from 1, `Inner1` has id 21.
    pub const INNER_BASE: u32 = 20;

    pub const fn inner(index: u32) -> Self {
        LayerId(Self::INNER_BASE + index)
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Electrical role of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Signal,
    NonSignal,
    Plane,
    Other,
}

impl Display for LayerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LayerType::Signal => "Signal",
            LayerType::NonSignal => "Non-Signal",
            LayerType::Plane => "Plane",
            LayerType::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Standard,
    /// Outline geometry is never electrically connected, nets are always cleared.
    BoardOutline,
    /// The only kind that allows its layer type to be changed.
    InnerCopper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    color: String,
    visible: bool,
    active: bool,
    config: bool,
    layer_type: Option<LayerType>,
    kind: LayerKind,
    /// The unit of the geometry passed to the `add_*` methods.
    unit: Unit,
}

impl Layer {
    pub fn new(id: LayerId, name: &str, color: &str, visible: bool, active: bool, config: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
            visible,
            active,
            config,
            layer_type: None,
            kind: LayerKind::Standard,
            unit: Unit::default(),
        }
    }

    pub fn board_outline(id: LayerId, name: &str, color: &str, visible: bool, active: bool, config: bool) -> Self {
        Self {
            kind: LayerKind::BoardOutline,
            ..Self::new(id, name, color, visible, active, config)
        }
    }

    /// `index` starts at 1
    pub fn inner_copper(index: u32, color: &str) -> Self {
        Self {
            kind: LayerKind::InnerCopper,
            ..Self::new(LayerId::inner(index), &format!("Inner{}", index), color, true, false, true)
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_config(&self) -> bool {
        self.config
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn layer_type(&self) -> Option<LayerType> {
        self.layer_type
    }

    /// Only inner copper layers can be changed, and only to `Signal` or `Plane`.
    ///
    /// On failure the layer is left unchanged.
    pub fn set_layer_type(&mut self, layer_type: LayerType) -> Result<(), PcbError> {
        if self.kind != LayerKind::InnerCopper {
            return Err(PcbError::NotInnerCopper {
                id: self.id,
            });
        }

        match layer_type {
            LayerType::Signal | LayerType::Plane => {
                debug!("layer type changed. layer: {}, type: {}", self.id, layer_type);
                self.layer_type = Some(layer_type);
                Ok(())
            }
            LayerType::NonSignal | LayerType::Other => Err(PcbError::InvalidLayerType {
                layer_type,
            }),
        }
    }

    /// Converts a position in this layer's unit to internal units, exactly once.
    fn position_to_internal(&self, position: Position) -> Position {
        to_internal(convert(position, self.unit, Unit::Mil))
    }

    /// `None` falls back to `default_mil`, which is never converted from the layer unit.
    fn length_or_default_to_internal(&self, value: Option<f64>, default_mil: f64) -> f64 {
        to_internal_length(value.map_or(default_mil, |value| self.length_to_mil(value)))
    }

    fn length_to_mil(&self, value: f64) -> f64 {
        convert_length(value, self.unit, Unit::Mil)
    }

    fn effective_net(&self, net: &str) -> String {
        match self.kind {
            LayerKind::BoardOutline => String::new(),
            _ => net.to_string(),
        }
    }
}

/// `{id}~{name}~{color}~{visible}~{active}~{config}~{layer_type}`
impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}~{}~{}~{}~{}~{}~",
            self.id, self.name, self.color, self.visible, self.active, self.config
        )?;
        if let Some(layer_type) = self.layer_type {
            write!(f, "{}", layer_type)?;
        }
        Ok(())
    }
}

pub const DEFAULT_STROKE_WIDTH_MIL: f64 = 10.0;
pub const DEFAULT_FONT_SIZE_MIL: f64 = 80.0;
pub const DEFAULT_FONT_WIDTH_MIL: f64 = 8.0;

/// Lengths are in the unit of the layer the shape is added to, unset lengths use the `DEFAULT_*_MIL` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackOptions {
    pub net: String,
    pub width: Option<f64>,
    pub locked: bool,
}

pub type ArcOptions = TrackOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleOptions {
    pub net: String,
    pub stroke_width: Option<f64>,
    pub center: Position,
    pub locked: bool,
    /// `0.0` gives sharp corners
    pub corner_radius: f64,
}

impl Default for RectangleOptions {
    fn default() -> Self {
        Self {
            net: String::new(),
            stroke_width: None,
            center: Position::origin(),
            locked: false,
            corner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub position: Position,
    pub font_size: Option<f64>,
    pub font_width: Option<f64>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            position: Position::origin(),
            font_size: None,
            font_width: None,
        }
    }
}

/// A layer, bound to the shape list of the document that owns it.
///
/// Obtained from [`crate::Document::layer_mut`]; every `add_*` method converts the caller's geometry to internal
/// units, tags it with this layer's id and appends the encoded record to the document.
pub struct LayerHandle<'a> {
    layer: &'a mut Layer,
    shapes: &'a mut ShapeList,
}

impl<'a> LayerHandle<'a> {
    pub(crate) fn new(layer: &'a mut Layer, shapes: &'a mut ShapeList) -> Self {
        Self {
            layer,
            shapes,
        }
    }

    pub fn layer(&self) -> &Layer {
        self.layer
    }

    pub fn set_layer_type(&mut self, layer_type: LayerType) -> Result<(), PcbError> {
        self.layer.set_layer_type(layer_type)
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.layer.set_unit(unit);
    }

    /// Adds a single track through all the `points`, in order. Returns the id of the track.
    #[cfg_attr(feature = "profile-encoders", profiling::function)]
    pub fn add_track(&mut self, points: &[Position], options: TrackOptions) -> String {
        let points = points
            .iter()
            .map(|point| self.layer.position_to_internal(*point))
            .collect::<Vec<_>>();

        let width = self
            .layer
            .length_or_default_to_internal(options.width, DEFAULT_STROKE_WIDTH_MIL);

        self.push_track(points, &options.net, width, options.locked)
    }

    /// Adds an elliptical arc from `start` to `end`. Returns the id of the arc.
    #[cfg_attr(feature = "profile-encoders", profiling::function)]
    pub fn add_arc(&mut self, start: Position, end: Position, radius: impl Into<ArcRadius>, options: ArcOptions) -> String {
        let radius = self.radius_to_internal(radius.into());
        let start = self.layer.position_to_internal(start);
        let end = self.layer.position_to_internal(end);

        let width = self
            .layer
            .length_or_default_to_internal(options.width, DEFAULT_STROKE_WIDTH_MIL);

        self.push_arc(start, end, radius, &options.net, width, options.locked)
    }

    /// Adds a rectangle outline, returning the ids of the shapes it was made from.
    ///
    /// A rectangle with sharp corners becomes a single closed track, a rectangle with rounded corners becomes
    /// 4 two-point tracks followed by 4 corner arcs.
    #[cfg_attr(feature = "profile-encoders", profiling::function)]
    pub fn add_rectangle(&mut self, width: f64, height: f64, options: RectangleOptions) -> Vec<String> {
        let RectangleOptions {
            net,
            stroke_width,
            center,
            locked,
            corner_radius,
        } = options;

        // decompose in mil, before the single conversion to internal units
        let outline = RectangleOutline::new(
            convert(center, self.layer.unit, Unit::Mil),
            self.layer.length_to_mil(width),
            self.layer.length_to_mil(height),
            self.layer.length_to_mil(corner_radius),
        );
        let stroke_width = self
            .layer
            .length_or_default_to_internal(stroke_width, DEFAULT_STROKE_WIDTH_MIL);

        match outline.decompose() {
            RectangleDecomposition::Sharp(points) => {
                let points = points
                    .into_iter()
                    .map(to_internal)
                    .collect::<Vec<_>>();
                vec![self.push_track(points, &net, stroke_width, locked)]
            }
            RectangleDecomposition::Rounded {
                lines,
                arcs,
            } => {
                let radius = ArcRadius::Circular(to_internal_length(outline.corner_radius));

                let mut ids = Vec::with_capacity(lines.len() + arcs.len());
                for (start, end) in lines {
                    ids.push(self.push_track(vec![to_internal(start), to_internal(end)], &net, stroke_width, locked));
                }
                for (start, end) in arcs {
                    ids.push(self.push_arc(to_internal(start), to_internal(end), radius, &net, stroke_width, locked));
                }
                ids
            }
        }
    }

    #[cfg_attr(feature = "profile-encoders", profiling::function)]
    pub fn add_text(&mut self, text: &str, options: TextOptions) {
        let shape = Shape::Text(TextShape {
            text: text.to_string(),
            position: self.layer.position_to_internal(options.position),
            font_size: self
                .layer
                .length_or_default_to_internal(options.font_size, DEFAULT_FONT_SIZE_MIL),
            font_width: self
                .layer
                .length_or_default_to_internal(options.font_width, DEFAULT_FONT_WIDTH_MIL),
            layer: self.layer.id,
        });
        self.shapes.append(shape);
    }

    fn radius_to_internal(&self, radius: ArcRadius) -> ArcRadius {
        match radius {
            ArcRadius::Circular(radius) => ArcRadius::Circular(self.layer.length_to_mil(radius)),
            ArcRadius::Elliptical {
                x,
                y,
            } => ArcRadius::Elliptical {
                x: self.layer.length_to_mil(x),
                y: self.layer.length_to_mil(y),
            },
        }
        .scaled(1.0 / INTERNAL_SCALE)
    }

    fn push_track(&mut self, points: Vec<Position>, net: &str, width: f64, locked: bool) -> String {
        let id = self.shapes.next_id();
        trace!("track. layer: {}, points: {:?}", self.layer.id, points);
        self.shapes.append(Shape::Track(TrackShape {
            width,
            layer: self.layer.id,
            net: self.layer.effective_net(net),
            points,
            id: id.clone(),
            locked,
        }));
        id
    }

    fn push_arc(&mut self, start: Position, end: Position, radius: ArcRadius, net: &str, width: f64, locked: bool) -> String {
        let id = self.shapes.next_id();
        self.shapes.append(Shape::Arc(ArcShape::new(
            start,
            end,
            radius,
            width,
            self.layer.id,
            self.layer.effective_net(net),
            id.clone(),
            locked,
        )));
        id
    }
}
