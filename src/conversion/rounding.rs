use crate::config::MAX_DECIMAL_PLACES;
use serde::{Deserialize, Serialize};

const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// How a value sitting exactly halfway between two steps is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.375 -> 0.38
    HalfEven,
}

/// Round `value` to `decimal_places` digits after the point.
///
/// Ties are judged on the scaled binary value, so an input like 2.425 that
/// is stored slightly below the midpoint rounds down under either mode.
///
/// Precision is capped at [`MAX_DECIMAL_PLACES`]. Values too large to carry a
/// fractional digit at that precision are returned unchanged.
pub fn round_to(value: f64, decimal_places: u32, mode: RoundingMode) -> f64 {
    let places = decimal_places.min(MAX_DECIMAL_PLACES);
    let scale = 10f64.powi(places as i32);
    // at 2^52 and above every f64 is already an integer
    if value.abs() >= INTEGRAL_THRESHOLD / scale {
        return value;
    }
    let scaled = value * scale;
    let rounded = match mode {
        RoundingMode::HalfAwayFromZero => scaled.round(),
        RoundingMode::HalfEven => scaled.round_ties_even(),
    };
    rounded / scale
}
