//! Builds EasyEDA PCB documents and encodes them to the `~` delimited text format.
//!
//! Geometry is supplied in user units (mil or mm, Y-up) and emitted in internal units (1/10 mil, Y-down).

mod canvas;
mod document;
mod error;
mod geometry;
mod ids;
mod layer;
mod shapes;
pub mod spacial;
pub mod units;

pub use canvas::*;
pub use document::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use layer::*;
pub use shapes::*;
pub use spacial::{AsComplexPair, Position, Vector};
pub use units::Unit;

#[cfg(feature = "testing")]
pub mod testing;
