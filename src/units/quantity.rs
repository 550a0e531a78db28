//! The quantity value type: an `f64` with a unit.
//!
//! Values are kept in the unit they were created with and converted on
//! demand. That keeps epoch timestamps expressed in, say, milliseconds
//! from being squeezed through a nanosecond-scale representation where
//! `f64` has no precision left.

use super::format;
use super::unit::{Unit, UnitKind};
use crate::utils::error::RangeError;
use std::cmp::Ordering;
use std::fmt;

/// A value with a physical unit.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn kind(&self) -> UnitKind {
        self.unit.kind()
    }

    /// Value expressed in the kind's base unit.
    pub fn base_value(&self) -> f64 {
        self.value * self.unit.to_base()
    }

    /// Value expressed in `unit`.
    ///
    /// # Errors
    /// `RangeError::KindMismatch` when `unit` belongs to a different kind.
    pub fn value_in(&self, unit: Unit) -> Result<f64, RangeError> {
        if unit.kind() != self.kind() {
            return Err(RangeError::KindMismatch {
                expected: self.kind(),
                actual: unit.kind(),
            });
        }
        Ok(self.base_value() / unit.to_base())
    }

    /// The same quantity re-expressed in `unit`.
    pub fn in_unit(&self, unit: Unit) -> Result<Quantity, RangeError> {
        Ok(Quantity::new(self.value_in(unit)?, unit))
    }

    /// Add a delta-kind quantity, keeping this quantity's unit.
    ///
    /// # Errors
    /// `RangeError::KindMismatch` unless `delta` is of this kind's delta
    /// kind (a timespan for timestamps, the same kind otherwise).
    pub fn checked_add(&self, delta: &Quantity) -> Result<Quantity, RangeError> {
        if delta.kind() != self.kind().delta_kind() {
            return Err(RangeError::KindMismatch {
                expected: self.kind().delta_kind(),
                actual: delta.kind(),
            });
        }
        let value = self.value + delta.base_value() / self.unit.to_base();
        Ok(Quantity::new(value, self.unit))
    }

    /// Difference `self - other` as a delta-kind quantity.
    ///
    /// Timestamps subtract to timespans of the same resolution.
    ///
    /// # Errors
    /// `RangeError::KindMismatch` when the kinds differ.
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity, RangeError> {
        if other.kind() != self.kind() {
            return Err(RangeError::KindMismatch {
                expected: self.kind(),
                actual: other.kind(),
            });
        }
        let unit = self.unit.delta_unit();
        let value = (self.base_value() - other.base_value()) / unit.to_base();
        Ok(Quantity::new(value, unit))
    }

    /// Multiply by a plain factor, keeping kind and unit.
    pub fn scaled(&self, factor: f64) -> Quantity {
        Quantity::new(self.value * factor, self.unit)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.base_value() == other.base_value()
    }
}

impl PartialOrd for Quantity {
    /// Ordering within a kind; quantities of different kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind() != other.kind() {
            return None;
        }
        self.base_value().partial_cmp(&other.base_value())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::format_quantity(self))
    }
}
