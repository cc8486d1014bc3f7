use log::debug;

use crate::spacial::{Position, Vector};

/// An axis aligned rectangle outline, in Y-up coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleOutline {
    pub center: Position,
    pub width: f64,
    pub height: f64,
    /// `0.0` (or less) gives sharp corners
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RectangleDecomposition {
    /// A closed polyline, the last vertex repeats the first.
    Sharp([Position; 5]),
    /// Straight edges, followed by the corner arcs that join them.
    Rounded {
        lines: [(Position, Position); 4],
        arcs: [(Position, Position); 4],
    },
}

impl RectangleOutline {
    pub fn new(center: Position, width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            center,
            width,
            height,
            corner_radius,
        }
    }

    pub fn is_rounded(&self) -> bool {
        self.corner_radius > 0.0
    }

    /// Returns 4 corner points, starting at the top left and going clockwise.
    /// ```plaintext
    /// 1 ┌────────────┐ 2
    ///   │            │
    /// 4 └────────────┘ 3
    /// ```
    pub fn corners(&self) -> [Position; 4] {
        let half = Vector::new(self.width / 2.0, self.height / 2.0);
        let c = self.center;
        [
            Position::new(c.x - half.x, c.y + half.y),
            Position::new(c.x + half.x, c.y + half.y),
            Position::new(c.x + half.x, c.y - half.y),
            Position::new(c.x - half.x, c.y - half.y),
        ]
    }

    /// Each corner contributes two points, offset by the corner radius along each adjacent edge.
    ///
    /// Points are ordered clockwise starting with the left end of the top edge.
    pub fn corner_offset_points(&self) -> [Position; 8] {
        let r = self.corner_radius;
        let [top_left, top_right, bottom_right, bottom_left] = self.corners();
        [
            Position::new(top_left.x + r, top_left.y),
            Position::new(top_right.x - r, top_right.y),
            Position::new(top_right.x, top_right.y - r),
            Position::new(bottom_right.x, bottom_right.y + r),
            Position::new(bottom_right.x - r, bottom_right.y),
            Position::new(bottom_left.x + r, bottom_left.y),
            Position::new(bottom_left.x, bottom_left.y + r),
            Position::new(top_left.x, top_left.y - r),
        ]
    }

    pub fn decompose(&self) -> RectangleDecomposition {
        if !self.is_rounded() {
            let [a, b, c, d] = self.corners();
            return RectangleDecomposition::Sharp([a, b, c, d, a]);
        }

        let points = self.corner_offset_points();

        // edges use the pairs at even offsets, going forwards
        let lines = [0, 2, 4, 6].map(|i| (points[i], points[i + 1]));

        // corners use the pairs at odd offsets, going backwards, wrapping from the first to the last point
        let arcs = [6, 4, 2, 0].map(|i| (points[i], points[(i + points.len() - 1) % points.len()]));

        debug!(
            "rounded rectangle decomposed. rectangle: {:?}, lines: {:?}, arcs: {:?}",
            self, lines, arcs
        );

        RectangleDecomposition::Rounded {
            lines,
            arcs,
        }
    }
}
