use std::fmt::{Display, Formatter};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::canvas::Canvas;
use crate::error::PcbError;
use crate::ids::{IdSource, RandomIdSource};
use crate::layer::{Layer, LayerHandle, LayerId, LayerKind};
use crate::shapes::{HoleShape, Shape, ViaShape};
use crate::spacial::Position;
use crate::units::{convert, convert_length, to_internal, to_internal_diameter, to_internal_length, Unit};

pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Schematic = 1,
    Symbol = 2,
    Pcb = 3,
    Footprint = 4,
    SchematicModule = 13,
    PcbModule = 14,
}

impl DocumentType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The ordered, append-only list of encoded shape records, shared by all the layers of a document.
pub struct ShapeList {
    records: Vec<String>,
    ids: Box<dyn IdSource>,
}

impl ShapeList {
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self {
            records: Vec::new(),
            ids,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    pub fn append(&mut self, shape: Shape) {
        self.append_record(shape.to_string());
    }

    /// Appends an already encoded record
    pub fn append_record(&mut self, record: String) {
        trace!("shape appended. record: {}", record);
        self.records.push(record);
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl std::fmt::Debug for ShapeList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeList")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

/// Lengths are in the unit of the document's canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct HoleOptions {
    pub center: Position,
    pub locked: bool,
}

impl Default for HoleOptions {
    fn default() -> Self {
        Self {
            center: Position::origin(),
            locked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViaOptions {
    pub center: Position,
    pub net: String,
    pub locked: bool,
}

impl Default for ViaOptions {
    fn default() -> Self {
        Self {
            center: Position::origin(),
            net: String::new(),
            locked: false,
        }
    }
}

/// A PCB document: the canvas, a fixed set of layers and the shapes added to them.
#[derive(Debug)]
pub struct Document {
    version: String,
    canvas: Canvas,
    layers: Vec<Layer>,
    shapes: ShapeList,
}

impl Document {
    pub const DOCUMENT_TYPE: DocumentType = DocumentType::Pcb;

    /// Creates the 12 standard layers, plus `copper_layers - 2` inner copper layers (ids 21, 22, ...).
    pub fn new(canvas: Canvas, copper_layers: u32) -> Self {
        Self::with_id_source(canvas, copper_layers, Box::new(RandomIdSource::new()))
    }

    /// Inner copper layer colors are random.
    pub fn with_id_source(canvas: Canvas, copper_layers: u32, ids: Box<dyn IdSource>) -> Self {
        Self::build(canvas, copper_layers, ids, StdRng::from_os_rng())
    }

    /// Inner copper layer colors are drawn from `color_seed`, combined with a deterministic id source the output
    /// is reproducible.
    pub fn with_sources(canvas: Canvas, copper_layers: u32, ids: Box<dyn IdSource>, color_seed: u64) -> Self {
        Self::build(canvas, copper_layers, ids, StdRng::seed_from_u64(color_seed))
    }

    fn build(canvas: Canvas, copper_layers: u32, ids: Box<dyn IdSource>, mut colors: StdRng) -> Self {
        let unit = canvas.unit();

        let mut layers = standard_layers();
        for index in 1..=copper_layers.saturating_sub(2) {
            let color = format!("#{:06X}", colors.random_range(0..=0xFF_FFFF_u32));
            debug!("adding inner copper layer. index: {}, color: {}", index, color);
            layers.push(Layer::inner_copper(index, &color));
        }
        for layer in layers.iter_mut() {
            layer.set_unit(unit);
        }

        info!(
            "created PCB document. copper layers: {}, layer count: {}, unit: {}",
            copper_layers,
            layers.len(),
            unit
        );

        Self {
            version: DEFAULT_VERSION.to_string(),
            canvas,
            layers,
            shapes: ShapeList::new(ids),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.id() == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Result<LayerHandle<'_>, PcbError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .ok_or(PcbError::UnknownLayer {
                id,
            })?;

        Ok(LayerHandle::new(layer, &mut self.shapes))
    }

    pub fn top_layer(&mut self) -> LayerHandle<'_> {
        self.standard_layer(0)
    }

    pub fn bottom_layer(&mut self) -> LayerHandle<'_> {
        self.standard_layer(1)
    }

    pub fn board_outline(&mut self) -> LayerHandle<'_> {
        self.standard_layer(9)
    }

    /// `index` starts at 1
    pub fn inner_layer(&mut self, index: u32) -> Result<LayerHandle<'_>, PcbError> {
        self.layer_mut(LayerId::inner(index))
    }

    /// The standard layers are always present, in the order of `standard_layers`.
    fn standard_layer(&mut self, index: usize) -> LayerHandle<'_> {
        LayerHandle::new(&mut self.layers[index], &mut self.shapes)
    }

    /// Inner copper layers, in id order.
    pub fn inner_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|layer| layer.kind() == LayerKind::InnerCopper)
    }

    pub fn shapes(&self) -> &[String] {
        self.shapes.records()
    }

    pub fn append_shape(&mut self, shape: Shape) {
        self.shapes.append(shape);
    }

    fn unit(&self) -> Unit {
        self.canvas.unit()
    }

    /// Adds a plated hole, not tied to a layer. Returns the id of the hole.
    pub fn add_hole(&mut self, diameter: f64, options: HoleOptions) -> String {
        let unit = self.unit();
        let id = self.shapes.next_id();
        self.shapes.append(Shape::Hole(HoleShape {
            center: to_internal(convert(options.center, unit, Unit::Mil)),
            radius: to_internal_diameter(convert_length(diameter, unit, Unit::Mil)),
            id: id.clone(),
            locked: options.locked,
        }));
        id
    }

    /// Adds a via, not tied to a layer. Returns the id of the via.
    pub fn add_via(&mut self, diameter: f64, hole_diameter: f64, options: ViaOptions) -> String {
        let unit = self.unit();
        let id = self.shapes.next_id();
        self.shapes.append(Shape::Via(ViaShape {
            center: to_internal(convert(options.center, unit, Unit::Mil)),
            diameter: to_internal_length(convert_length(diameter, unit, Unit::Mil)),
            net: options.net,
            hole_radius: to_internal_diameter(convert_length(hole_diameter, unit, Unit::Mil)),
            id: id.clone(),
            locked: options.locked,
        }));
        id
    }

    pub fn head(&self) -> String {
        format!("{}~{}", Self::DOCUMENT_TYPE.code(), self.version)
    }

    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            head: self.head(),
            canvas: self.canvas.to_string(),
            shape: self.shapes.records().to_vec(),
            layers: self
                .layers
                .iter()
                .map(|layer| layer.to_string())
                .collect(),
        }
    }

    /// Pretty printed JSON, indented with 2 spaces.
    #[profiling::function]
    pub fn to_json(&self) -> Result<String, PcbError> {
        Ok(serde_json::to_string_pretty(&self.to_envelope())?)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let json = self
            .to_json()
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// The serialized form of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub head: String,
    pub canvas: String,
    pub shape: Vec<String>,
    pub layers: Vec<String>,
}

fn standard_layers() -> Vec<Layer> {
    vec![
        Layer::new(LayerId::TOP, "TopLayer", "#FF0000", true, true, true),
        Layer::new(LayerId::BOTTOM, "BottomLayer", "#0000FF", true, false, true),
        Layer::new(LayerId::TOP_SILK, "TopSilkLayer", "#FFFF00", true, false, true),
        Layer::new(LayerId::BOTTOM_SILK, "BottomSilkLayer", "#808000", true, false, true),
        Layer::new(LayerId::TOP_PASTER, "TopPasterLayer", "#808080", true, false, false),
        Layer::new(LayerId::BOTTOM_PASTER, "BottomPasterLayer", "#800000", true, false, false),
        Layer::new(LayerId::TOP_SOLDER, "TopSolderLayer", "#800080", true, false, false),
        Layer::new(LayerId::BOTTOM_SOLDER, "BottomSolderLayer", "#AA00FF", true, false, false),
        Layer::new(LayerId::RAT_LINES, "Ratlines", "#6464FF", true, false, true),
        Layer::board_outline(LayerId::BOARD_OUTLINE, "BoardOutline", "#FF00FF", true, false, true),
        Layer::new(LayerId::MULTI_LAYER, "Multi-layer", "#C0C0C0", true, false, true),
        Layer::new(LayerId::DOCUMENT, "Document", "#FFFFFF", true, false, true),
    ]
}
