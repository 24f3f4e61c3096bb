//! Name table mapping accepted unit spellings to units.

use super::{ResolvedUnit, Unit};
use crate::conversion::ConversionError;

/// Every accepted spelling, lowercase. Lookups compare ASCII case-insensitively.
pub(super) const ALIASES: &[(&str, Unit)] = &[
    // weight
    ("lb", Unit::Pound),
    ("lbs", Unit::Pound),
    ("lb.", Unit::Pound),
    ("pound", Unit::Pound),
    ("pounds", Unit::Pound),
    ("kg", Unit::Kilogram),
    ("kilo", Unit::Kilogram),
    ("kilos", Unit::Kilogram),
    ("kilogram", Unit::Kilogram),
    ("kilograms", Unit::Kilogram),
    ("oz", Unit::Ounce),
    ("ounce", Unit::Ounce),
    ("ounces", Unit::Ounce),
    // length
    ("ft", Unit::Foot),
    ("foot", Unit::Foot),
    ("feet", Unit::Foot),
    ("in", Unit::Inch),
    ("inch", Unit::Inch),
    ("inches", Unit::Inch),
    ("m", Unit::Meter),
    ("meter", Unit::Meter),
    ("meters", Unit::Meter),
    // volume
    ("pt", Unit::Pint),
    ("pint", Unit::Pint),
    ("pints", Unit::Pint),
    ("floz", Unit::FluidOunce),
    ("fl oz", Unit::FluidOunce),
    ("fluid ounce", Unit::FluidOunce),
    ("fluid ounces", Unit::FluidOunce),
    ("fluidounce", Unit::FluidOunce),
    ("bomber", Unit::Bomber),
    ("bombers", Unit::Bomber),
];

/// Resolve a unit name to its dimension and unit.
///
/// Matching ignores ASCII case but is otherwise exact: surrounding whitespace
/// is not stripped. Unknown names fail with [`ConversionError::InvalidUnit`]
/// carrying the input verbatim.
pub fn resolve_unit(name: &str) -> Result<ResolvedUnit, ConversionError> {
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, unit)| ResolvedUnit::from(*unit))
        .ok_or_else(|| {
            tracing::debug!(unit = name, "unrecognized unit name");
            ConversionError::InvalidUnit(name.to_string())
        })
}
