use super::{Dimension, Unit};
use std::fmt;

/// A converted value ready to print, e.g. `2.42 ft`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMeasurement {
    pub value: f64,
    pub unit: Unit,
    pub decimal_places: u32,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for DisplayMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.decimal_places as usize;
        write!(f, "{:.*} {}", precision, self.value, self.unit.symbol())
    }
}
