//! Fluent conversion requests
//!
//! A [`Conversion`] collects a source (amount and unit) and a target unit in
//! either order, then computes the converted amount on demand:
//!
//! ```
//! use measure_core::Conversion;
//!
//! let feet = Conversion::new()
//!     .set_source(29.0, "inches")?
//!     .set_target("feet")?
//!     .compute()?;
//! assert_eq!(feet, 2.42);
//! # Ok::<(), measure_core::ConversionError>(())
//! ```

mod rounding;

pub use rounding::{round_to, RoundingMode};

use crate::config::ConversionConfig;
use crate::types::{resolve_unit, Dimension, DisplayMeasurement, Quantity, ResolvedUnit, Unit};

/// Errors raised while resolving units or running a conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Unit: {0} not valid")]
    InvalidUnit(String),

    #[error("Failed to supply a source unit")]
    MissingSource,

    #[error("Failed to supply a target unit")]
    MissingTarget,

    #[error("No source value set")]
    MissingAmount,

    #[error("Cannot convert {from} to {to}")]
    DimensionMismatch { from: Dimension, to: Dimension },

    #[error("Converting {amount} {from} to {to} exceeds the range of f64")]
    Overflow { amount: f64, from: Unit, to: Unit },
}

/// The amount and unit being converted from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceSpec {
    pub unit: ResolvedUnit,
    /// `None` when the caller did not supply an amount
    pub amount: Option<f64>,
}

impl SourceSpec {
    /// The amount if present and finite
    pub fn valid_amount(&self) -> Result<f64, ConversionError> {
        self.amount
            .filter(|a| a.is_finite())
            .ok_or(ConversionError::MissingAmount)
    }

    /// The source amount as a `uom` quantity in its dimension's reference unit
    pub fn normalized(&self) -> Result<Quantity, ConversionError> {
        Ok(Quantity::normalized(self.valid_amount()?, self.unit.unit))
    }
}

/// The unit being converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub unit: ResolvedUnit,
}

/// A conversion request built up in steps.
///
/// Setting a source or target replaces whatever was there before. Computing
/// only reads the request, so it can be computed again or modified and reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    source: Option<SourceSpec>,
    target: Option<TargetSpec>,
    config: ConversionConfig,
}

impl Conversion {
    /// Empty request rounding to 2 decimal places
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty request rounding per `config`
    pub fn with_config(config: ConversionConfig) -> Self {
        Self {
            source: None,
            target: None,
            config,
        }
    }

    /// Attach the amount and unit name to convert from.
    ///
    /// The amount is not checked here; a missing or non-finite amount is
    /// reported by [`compute`](Self::compute).
    pub fn set_source(
        &mut self,
        amount: impl Into<Option<f64>>,
        unit_name: &str,
    ) -> Result<&mut Self, ConversionError> {
        let unit = resolve_unit(unit_name)?;
        self.source = Some(SourceSpec {
            unit,
            amount: amount.into(),
        });
        Ok(self)
    }

    /// Attach the unit name to convert to
    pub fn set_target(&mut self, unit_name: &str) -> Result<&mut Self, ConversionError> {
        let unit = resolve_unit(unit_name)?;
        self.target = Some(TargetSpec { unit });
        Ok(self)
    }

    /// Attach the amount and an already-resolved unit to convert from
    pub fn set_source_unit(&mut self, amount: impl Into<Option<f64>>, unit: Unit) -> &mut Self {
        self.source = Some(SourceSpec {
            unit: unit.into(),
            amount: amount.into(),
        });
        self
    }

    /// Attach an already-resolved unit to convert to
    pub fn set_target_unit(&mut self, unit: Unit) -> &mut Self {
        self.target = Some(TargetSpec { unit: unit.into() });
        self
    }

    pub fn source(&self) -> Option<&SourceSpec> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&TargetSpec> {
        self.target.as_ref()
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Drop the source and target, keeping the config
    pub fn clear(&mut self) -> &mut Self {
        self.source = None;
        self.target = None;
        self
    }

    /// Conversion ratio `factor(source) / factor(target)`.
    ///
    /// Does not need an amount. Fails with `MissingSource`, `MissingTarget`
    /// or `DimensionMismatch`, checked in that order.
    pub fn ratio(&self) -> Result<f64, ConversionError> {
        let (source, target) = self.endpoints()?;
        Self::check_dimensions(source, target)?;
        Ok(Self::ratio_between(source, target))
    }

    /// Convert without the final rounding step.
    ///
    /// Fails with `Overflow` when a finite amount converts past `f64::MAX`.
    pub fn compute_unrounded(&self) -> Result<f64, ConversionError> {
        let (source, target) = self.endpoints()?;
        let amount = source.valid_amount()?;
        Self::check_dimensions(source, target)?;

        // one combined ratio keeps exact results like 24 in -> 2 ft from drifting
        let ratio = Self::ratio_between(source, target);
        let result = amount * ratio;
        if !result.is_finite() {
            return Err(ConversionError::Overflow {
                amount,
                from: source.unit.unit,
                to: target.unit.unit,
            });
        }

        tracing::trace!(
            from = %source.unit.unit,
            to = %target.unit.unit,
            amount,
            ratio,
            result,
            "converted"
        );
        Ok(result)
    }

    /// Convert and round to the configured number of decimal places.
    ///
    /// Checks run in order: `MissingSource`, `MissingTarget`, `MissingAmount`,
    /// `DimensionMismatch`. The first failure is returned.
    pub fn compute(&self) -> Result<f64, ConversionError> {
        let raw = self.compute_unrounded()?;
        let rounded = round_to(raw, self.config.decimal_places(), self.config.rounding());
        tracing::debug!(raw, rounded, "conversion computed");
        Ok(rounded)
    }

    /// Compute and pair the result with its target unit for printing
    pub fn compute_display(&self) -> Result<DisplayMeasurement, ConversionError> {
        let value = self.compute()?;
        let (_, target) = self.endpoints()?;
        Ok(DisplayMeasurement {
            value,
            unit: target.unit.unit,
            decimal_places: self.config.decimal_places(),
        })
    }

    fn endpoints(&self) -> Result<(&SourceSpec, &TargetSpec), ConversionError> {
        let source = self.source.as_ref().ok_or(ConversionError::MissingSource)?;
        let target = self.target.as_ref().ok_or(ConversionError::MissingTarget)?;
        Ok((source, target))
    }

    fn check_dimensions(source: &SourceSpec, target: &TargetSpec) -> Result<(), ConversionError> {
        if source.unit.dimension != target.unit.dimension {
            return Err(ConversionError::DimensionMismatch {
                from: source.unit.dimension,
                to: target.unit.dimension,
            });
        }
        Ok(())
    }

    fn ratio_between(source: &SourceSpec, target: &TargetSpec) -> f64 {
        source.unit.unit.normalization_factor() / target.unit.unit.normalization_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NO_AMOUNT: Option<f64> = None;

    fn convert(amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        Conversion::new().set_source(amount, from)?.set_target(to)?.compute()
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConversionError::InvalidUnit("Frozbozz".into()).to_string(),
            "Unit: Frozbozz not valid"
        );
        let err = ConversionError::DimensionMismatch {
            from: Dimension::Volume,
            to: Dimension::Length,
        };
        assert_eq!(err.to_string(), "Cannot convert volume to length");
    }

    #[test]
    fn test_identity_at_large_magnitude() {
        let mut c = Conversion::new();
        c.set_source_unit(1e307, Unit::Meter).set_target_unit(Unit::Meter);
        assert_eq!(c.compute().unwrap(), 1e307);

        let config = ConversionConfig::new(15, RoundingMode::HalfAwayFromZero).unwrap();
        let mut c = Conversion::with_config(config);
        c.set_source_unit(1e295, Unit::Kilogram).set_target_unit(Unit::Kilogram);
        assert_eq!(c.compute().unwrap(), 1e295);
    }

    #[test]
    fn test_overflowing_conversion_is_an_error() {
        let mut c = Conversion::new();
        c.set_source_unit(f64::MAX, Unit::Kilogram).set_target_unit(Unit::Ounce);
        assert_eq!(
            c.compute(),
            Err(ConversionError::Overflow {
                amount: f64::MAX,
                from: Unit::Kilogram,
                to: Unit::Ounce,
            })
        );
        assert!(c.compute_unrounded().is_err());
        assert!(c.compute_display().is_err());
    }

    #[test]
    fn test_identity_meter() {
        assert_eq!(convert(1.0, "meter", "meter").unwrap(), 1.0);
    }

    #[test]
    fn test_inches_to_feet() {
        assert_eq!(convert(12.0, "inches", "feet").unwrap(), 1.0);
        assert_eq!(convert(24.0, "in", "ft").unwrap(), 2.0);
    }

    #[test]
    fn test_feet_to_inches() {
        assert_eq!(convert(1.5, "feet", "inch").unwrap(), 18.0);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        assert_eq!(convert(4.4, "lbs", "kilograms").unwrap(), 2.0);
        assert_eq!(convert(1.0, "kg", "lb").unwrap(), 2.2);
    }

    #[test]
    fn test_ounces_to_pounds() {
        assert_eq!(convert(16.0, "oz", "pound").unwrap(), 1.0);
        assert_eq!(convert(2.0, "lbs", "ounces").unwrap(), 32.0);
    }

    #[test]
    fn test_bombers_to_fluid_ounces() {
        assert_eq!(convert(2.5, "bombers", "floz").unwrap(), 50.0);
        assert_eq!(convert(2.0, "pints", "fl oz").unwrap(), 32.0);
        assert_eq!(convert(5.0, "pint", "bomber").unwrap(), 4.0);
    }

    #[test]
    fn test_target_first() {
        let result = Conversion::new()
            .set_target("feet")
            .unwrap()
            .set_source(29.0, "inches")
            .unwrap()
            .compute()
            .unwrap();
        assert_eq!(result, 2.42);
    }

    #[test]
    fn test_order_independence() {
        let pairs = [("lbs", "oz"), ("m", "in"), ("pt", "bombers"), ("kg", "pounds")];
        for (from, to) in pairs {
            for amount in [0.0, 1.0, 3.7, 29.0, 1234.5] {
                let forward = convert(amount, from, to).unwrap();
                let reversed = Conversion::new()
                    .set_target(to)
                    .unwrap()
                    .set_source(amount, from)
                    .unwrap()
                    .compute()
                    .unwrap();
                assert_eq!(forward, reversed, "{amount} {from} -> {to}");
            }
        }
    }

    #[test]
    fn test_identity_for_every_unit() {
        for unit in Unit::ALL {
            for amount in [0.0, 1.0, 2.345, 17.999, -4.25] {
                let mut c = Conversion::new();
                c.set_source_unit(amount, unit).set_target_unit(unit);
                assert_eq!(
                    c.compute().unwrap(),
                    round_to(amount, 2, RoundingMode::HalfAwayFromZero),
                    "{amount} {unit}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_within_a_cent() {
        for dimension in Dimension::ALL {
            for a in dimension.units() {
                for b in dimension.units() {
                    for amount in [1.0, 7.25, 29.0, 100.0] {
                        let there = Conversion::new()
                            .set_source_unit(amount, a)
                            .set_target_unit(b)
                            .compute()
                            .unwrap();
                        let back = Conversion::new()
                            .set_source_unit(there, b)
                            .set_target_unit(a)
                            .compute()
                            .unwrap();
                        // half a cent lost on the intermediate is scaled by 1/ratio on the way back
                        let ratio = a.normalization_factor() / b.normalization_factor();
                        let tolerance = 0.01 + 0.005 * ratio.recip().max(1.0);
                        assert!(
                            (back - amount).abs() <= tolerance,
                            "{amount} {a} -> {there} {b} -> {back}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_amount() {
        let mut c = Conversion::new();
        c.set_source(NO_AMOUNT, "feet").unwrap().set_target("inch").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingAmount));

        c.set_source(f64::NAN, "feet").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingAmount));

        c.set_source(f64::INFINITY, "feet").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingAmount));
    }

    #[test]
    fn test_invalid_unit() {
        let mut c = Conversion::new();
        assert_eq!(
            c.set_source(2.0, "Frozbozz").unwrap_err(),
            ConversionError::InvalidUnit("Frozbozz".into())
        );
        assert_eq!(
            c.set_target("snifter").unwrap_err(),
            ConversionError::InvalidUnit("snifter".into())
        );
        assert!(c.source().is_none());
        assert!(c.target().is_none());
    }

    #[test]
    fn test_invalid_unit_keeps_previous_slot() {
        let mut c = Conversion::new();
        c.set_source(3.0, "ft").unwrap().set_target("in").unwrap();
        assert!(c.set_target("cubit").is_err());
        assert_eq!(c.compute().unwrap(), 36.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            convert(10.0, "bombers", "feet"),
            Err(ConversionError::DimensionMismatch {
                from: Dimension::Volume,
                to: Dimension::Length,
            })
        );

        for a in Unit::ALL {
            for b in Unit::ALL.into_iter().filter(|b| b.dimension() != a.dimension()) {
                let result = Conversion::new().set_source_unit(1.0, a).set_target_unit(b).compute();
                assert!(
                    matches!(result, Err(ConversionError::DimensionMismatch { .. })),
                    "{a} -> {b}"
                );
            }
        }
    }

    #[test]
    fn test_validation_order() {
        let empty = Conversion::new();
        assert_eq!(empty.compute(), Err(ConversionError::MissingSource));

        let mut c = Conversion::new();
        c.set_target("kg").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingSource));

        let mut c = Conversion::new();
        c.set_source(NO_AMOUNT, "ft").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingTarget));

        // missing amount is reported before a dimension mismatch
        c.set_target("kg").unwrap();
        assert_eq!(c.compute(), Err(ConversionError::MissingAmount));
    }

    #[test]
    fn test_setters_replace_previous_values() {
        let mut c = Conversion::new();
        c.set_source(1.0, "kg").unwrap().set_target("lb").unwrap();
        assert_eq!(c.compute().unwrap(), 2.2);

        c.set_source(3.0, "meters").unwrap().set_target("feet").unwrap();
        assert_eq!(c.compute().unwrap(), 10.0);
        assert_eq!(c.source().unwrap().unit.unit, Unit::Meter);
        assert_eq!(c.target().unwrap().unit.dimension, Dimension::Length);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let mut c = Conversion::new();
        c.set_source(29.0, "inches").unwrap().set_target("feet").unwrap();
        let first = c.compute().unwrap();
        let second = c.compute().unwrap();
        assert_eq!(first, second);
        assert_eq!(c.source().unwrap().amount, Some(29.0));
    }

    #[test]
    fn test_ratio_and_unrounded() {
        let mut c = Conversion::new();
        c.set_target("feet").unwrap();
        assert_eq!(c.ratio(), Err(ConversionError::MissingSource));

        c.set_source(NO_AMOUNT, "inches").unwrap();
        assert_relative_eq!(c.ratio().unwrap(), 1.0 / 12.0, epsilon = 1e-12);
        assert_eq!(c.compute_unrounded(), Err(ConversionError::MissingAmount));

        c.set_source(29.0, "inches").unwrap();
        assert_relative_eq!(c.compute_unrounded().unwrap(), 29.0 / 12.0, epsilon = 1e-12);

        c.set_target("kg").unwrap();
        assert!(matches!(c.ratio(), Err(ConversionError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_compute_display() {
        let mut c = Conversion::new();
        c.set_source(4.4, "lbs").unwrap().set_target("kilograms").unwrap();
        assert_eq!(c.compute_display().unwrap().to_string(), "2.00 kg");

        c.set_source(29.0, "in").unwrap().set_target("ft").unwrap();
        assert_eq!(c.compute_display().unwrap().to_string(), "2.42 ft");
    }

    #[test]
    fn test_custom_config() {
        let config = ConversionConfig::new(4, RoundingMode::HalfAwayFromZero).unwrap();
        let mut c = Conversion::with_config(config);
        c.set_source(29.0, "inches").unwrap().set_target("feet").unwrap();
        assert_eq!(c.compute().unwrap(), 2.4167);
        assert_eq!(c.compute_display().unwrap().to_string(), "2.4167 ft");

        let half_even = ConversionConfig::new(2, RoundingMode::HalfEven).unwrap();
        let mut c = Conversion::with_config(half_even);
        c.set_source_unit(0.125, Unit::Meter).set_target_unit(Unit::Meter);
        assert_eq!(c.compute().unwrap(), 0.12);
    }

    #[test]
    fn test_clear_keeps_config() {
        let config = ConversionConfig::new(3, RoundingMode::HalfEven).unwrap();
        let mut c = Conversion::with_config(config);
        c.set_source(1.0, "m").unwrap().set_target("ft").unwrap();
        c.clear();
        assert_eq!(c.compute(), Err(ConversionError::MissingSource));
        assert_eq!(c.config().decimal_places(), 3);
    }

    #[test]
    fn test_normalized_source() {
        let mut c = Conversion::new();
        c.set_source(2.5, "bombers").unwrap();
        let quantity = c.source().unwrap().normalized().unwrap();
        assert_relative_eq!(quantity.reference_value(), 50.0, epsilon = 1e-9);

        c.set_source(NO_AMOUNT, "bombers").unwrap();
        assert_eq!(c.source().unwrap().normalized(), Err(ConversionError::MissingAmount));
    }
}
