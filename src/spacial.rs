pub type Vector = nalgebra::Vector2<f64>;
pub type Position = nalgebra::Point2<f64>;

/// The `(real, imaginary)` form used by the arc path math.
///
/// Only the 2D vector interpretation matters, no complex arithmetic is performed.
pub trait AsComplexPair {
    fn as_complex_pair(&self) -> (f64, f64);
}

impl AsComplexPair for Position {
    fn as_complex_pair(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

pub trait Invert {
    fn invert_y(self) -> Self;
}

impl Invert for Position {
    fn invert_y(self) -> Self {
        Self::new(self.x, -self.y)
    }
}
