use std::fmt::{Display, Formatter};

use lyon::geom::euclid::default::{Point2D, Vector2D};
use lyon::geom::euclid::Angle;
use lyon::geom::{ArcFlags, SvgArc};

use crate::spacial::{AsComplexPair, Position, Vector};

/// Significant digits used for path numbers.
const PATH_PRECISION: i32 = 6;

/// A "move to start, then elliptical arc to end" path.
///
/// The arc is always drawn with zero rotation, the small-arc flag and the negative sweep flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    arc: SvgArc<f64>,
}

impl ArcPath {
    pub fn new(start: Position, end: Position, radii: Vector) -> Self {
        let (start_x, start_y) = start.as_complex_pair();
        let (end_x, end_y) = end.as_complex_pair();

        Self {
            arc: SvgArc {
                from: Point2D::new(start_x, start_y),
                to: Point2D::new(end_x, end_y),
                radii: Vector2D::new(radii.x, radii.y),
                x_rotation: Angle::radians(0.0),
                flags: ArcFlags {
                    large_arc: false,
                    sweep: false,
                },
            },
        }
    }

    /// The path data with comma separators replaced by spaces, as required by the record format.
    pub fn to_record_field(&self) -> String {
        self.to_string()
            .replace(',', " ")
    }
}

/// Writes SVG path data, e.g. `M 0,-0 A 1,1 0 0,0 10,-10`
impl Display for ArcPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let SvgArc {
            from,
            to,
            radii,
            x_rotation,
            flags,
        } = &self.arc;

        write!(f, "M {},{}", format_general(from.x), format_general(from.y))?;
        write!(
            f,
            " A {},{} {} {},{} {},{}",
            format_general(radii.x),
            format_general(radii.y),
            format_general(x_rotation.to_degrees()),
            flags.large_arc as u8,
            flags.sweep as u8,
            format_general(to.x),
            format_general(to.y),
        )
    }
}

/// Formats a number using the 'general' notation with 6 significant digits.
///
/// Trailing zeros are removed. Scientific notation (`1.5E-05`, `1E+06`) is used when the decimal exponent
/// is below -4 or at least the precision.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return match value.is_sign_negative() {
            true => "-INF".to_string(),
            false => "INF".to_string(),
        };
    }
    if value == 0.0 {
        // keeps the sign of negative zero
        return format!("{}", value);
    }

    // rounding to the precision first, since rounding can bump the exponent, e.g. 999999.5 -> 1E+06
    let scientific = format!("{:.*E}", (PATH_PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('E') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PATH_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PATH_PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(value: &str) -> &str {
    match value.contains('.') {
        true => value
            .trim_end_matches('0')
            .trim_end_matches('.'),
        false => value,
    }
}
