use thiserror::Error;

use crate::layer::{LayerId, LayerType};

#[derive(Debug, Error)]
pub enum PcbError {
    #[error("cannot set layer type '{layer_type}' for inner copper layer, 'Signal' or 'Plane' expected")]
    InvalidLayerType { layer_type: LayerType },

    #[error("layer {id} is not an inner copper layer, its layer type cannot be changed")]
    NotInnerCopper { id: LayerId },

    #[error("no layer with id {id} in this document")]
    UnknownLayer { id: LayerId },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
