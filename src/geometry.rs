pub mod arc_path;
pub mod rectangle;

pub use arc_path::*;
pub use rectangle::*;
