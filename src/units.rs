use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::spacial::{Invert, Position};

pub const MILS_PER_MILLIMETER: f64 = 3.937;
pub const MILS_PER_INCH: f64 = 1000.0;

/// Internal units are 1/10 of a mil.
pub const INTERNAL_SCALE: f64 = 10.0;

/// Diameters are emitted as radii, so they are scaled by twice the internal scale.
pub const INTERNAL_DIAMETER_SCALE: f64 = INTERNAL_SCALE * 2.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "mil")]
    Mil,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "inch")]
    Inch,
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Unit::Mil => "mil",
            Unit::Millimeter => "mm",
            Unit::Inch => "inch",
        };
        f.write_str(name)
    }
}

fn round_4dp(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Converts a scalar length between user units.
///
/// Only conversions *to* mil apply a scale, every other pair of units is the identity.
pub fn convert_length(value: f64, source: Unit, target: Unit) -> f64 {
    match (source, target) {
        (Unit::Millimeter, Unit::Mil) => round_4dp(value * MILS_PER_MILLIMETER),
        (Unit::Inch, Unit::Mil) => round_4dp(value * MILS_PER_INCH),
        _ => value,
    }
}

pub fn convert(position: Position, source: Unit, target: Unit) -> Position {
    Position::new(
        convert_length(position.x, source, target),
        convert_length(position.y, source, target),
    )
}

/// Scales a mil position to internal units and flips the Y axis (Y-down output space).
///
/// Must be applied exactly once per position, applying it twice is a caller bug.
pub fn to_internal(position: Position) -> Position {
    Position::new(position.x / INTERNAL_SCALE, position.y / INTERNAL_SCALE).invert_y()
}

pub fn to_internal_length(value: f64) -> f64 {
    value / INTERNAL_SCALE
}

pub fn to_internal_diameter(value: f64) -> f64 {
    value / INTERNAL_DIAMETER_SCALE
}
