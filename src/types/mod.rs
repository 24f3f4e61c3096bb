mod aliases;
mod display;

pub use uom::si::f64::{Length, Mass, Volume};
pub use uom::si::{length::meter, mass::kilogram, volume::fluid_ounce};
use serde::{Deserialize, Serialize};

pub use aliases::resolve_unit;
pub use display::DisplayMeasurement;

/// Physical category that decides which units can be converted into each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Weight,
    Length,
    Volume,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Weight, Dimension::Length, Dimension::Volume];

    /// The unit whose normalization factor is exactly 1
    pub fn reference_unit(&self) -> Unit {
        match self {
            Dimension::Weight => Unit::Kilogram,
            Dimension::Length => Unit::Meter,
            Dimension::Volume => Unit::FluidOunce,
        }
    }

    /// Every unit belonging to this dimension
    pub fn units(&self) -> impl Iterator<Item = Unit> {
        let dimension = *self;
        Unit::ALL.into_iter().filter(move |u| u.dimension() == dimension)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Weight => "weight",
            Dimension::Length => "length",
            Dimension::Volume => "volume",
        }
    }
}

/// A single unit of measurement known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Pound,
    Kilogram,
    Ounce,

    Foot,
    Inch,
    Meter,

    Pint,
    FluidOunce,
    Bomber,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Pound,
        Unit::Kilogram,
        Unit::Ounce,
        Unit::Foot,
        Unit::Inch,
        Unit::Meter,
        Unit::Pint,
        Unit::FluidOunce,
        Unit::Bomber,
    ];

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Pound | Unit::Kilogram | Unit::Ounce => Dimension::Weight,
            Unit::Foot | Unit::Inch | Unit::Meter => Dimension::Length,
            Unit::Pint | Unit::FluidOunce | Unit::Bomber => Dimension::Volume,
        }
    }

    /// Amount of the dimension's reference unit equal to one of this unit.
    ///
    /// Weight normalizes to kilograms, length to meters, volume to fluid ounces.
    pub fn normalization_factor(&self) -> f64 {
        match self {
            Unit::Pound => 1.0 / 2.2,
            Unit::Kilogram => 1.0,
            Unit::Ounce => 1.0 / (2.2 * 16.0),

            Unit::Foot => 0.3,
            Unit::Inch => 0.3 / 12.0,
            Unit::Meter => 1.0,

            // a pint of beer is 16 fl oz
            Unit::Pint => 16.0,
            Unit::FluidOunce => 1.0,
            Unit::Bomber => 20.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Pound => "pound",
            Unit::Kilogram => "kilogram",
            Unit::Ounce => "ounce",
            Unit::Foot => "foot",
            Unit::Inch => "inch",
            Unit::Meter => "meter",
            Unit::Pint => "pint",
            Unit::FluidOunce => "fluid ounce",
            Unit::Bomber => "bomber",
        }
    }

    /// Short form used when rendering measurements
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Pound => "lb",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Foot => "ft",
            Unit::Inch => "in",
            Unit::Meter => "m",
            Unit::Pint => "pt",
            Unit::FluidOunce => "fl oz",
            // no abbreviation for bombers
            Unit::Bomber => "bomber",
        }
    }

    /// All accepted spellings for this unit, lowercase
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> {
        let unit = *self;
        aliases::ALIASES
            .iter()
            .filter(move |(_, u)| *u == unit)
            .map(|(name, _)| *name)
    }
}

impl std::str::FromStr for Unit {
    type Err = crate::conversion::ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_unit(s).map(|resolved| resolved.unit)
    }
}

/// A unit paired with the dimension it was resolved under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedUnit {
    pub dimension: Dimension,
    pub unit: Unit,
}

impl From<Unit> for ResolvedUnit {
    fn from(unit: Unit) -> Self {
        Self {
            dimension: unit.dimension(),
            unit,
        }
    }
}

/// A typed `uom` quantity expressed in its dimension's reference unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Mass(Mass),
    Length(Length),
    Volume(Volume),
}

impl Quantity {
    /// Build the quantity for `amount` of `unit`, normalized to the reference unit
    pub fn normalized(amount: f64, unit: Unit) -> Self {
        let reference_amount = amount * unit.normalization_factor();
        match unit.dimension() {
            Dimension::Weight => Quantity::Mass(Mass::new::<kilogram>(reference_amount)),
            Dimension::Length => Quantity::Length(Length::new::<meter>(reference_amount)),
            Dimension::Volume => Quantity::Volume(Volume::new::<fluid_ounce>(reference_amount)),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Quantity::Mass(_) => Dimension::Weight,
            Quantity::Length(_) => Dimension::Length,
            Quantity::Volume(_) => Dimension::Volume,
        }
    }

    /// Value in the reference unit (kilograms, meters or fluid ounces)
    pub fn reference_value(&self) -> f64 {
        match self {
            Quantity::Mass(m) => m.get::<kilogram>(),
            Quantity::Length(l) => l.get::<meter>(),
            Quantity::Volume(v) => v.get::<fluid_ounce>(),
        }
    }
}
