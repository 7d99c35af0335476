//! Units of measure attached to axes and projection parameters.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Length,
    Angle,
    NoQuantity,
}

/// A unit with its scale to the base unit of its quantity (metre, radian, unity).
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub quantity: Quantity,
    pub name: String,
    pub scale: f64,
    pub symbol: String,
}

impl Unit {
    pub fn new(quantity: Quantity, name: &str, scale: f64, symbol: &str) -> Self {
        Self {
            quantity,
            name: name.to_string(),
            scale,
            symbol: symbol.to_string(),
        }
    }

    pub fn meter() -> Self {
        Self::new(Quantity::Length, "meter", 1.0, "m")
    }

    pub fn degree() -> Self {
        Self::new(Quantity::Angle, "degree", std::f64::consts::PI / 180.0, "°")
    }

    pub fn unit() -> Self {
        Self::new(Quantity::NoQuantity, "unit", 1.0, "")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{:?}×{}", self.quantity, self.scale)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// A value tagged with its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Measure {
    pub value: f64,
    pub unit: Unit,
}

impl Measure {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn degrees(value: f64) -> Self {
        Self::new(value, Unit::degree())
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, Unit::meter())
    }

    pub fn unitless(value: f64) -> Self {
        Self::new(value, Unit::unit())
    }
}
