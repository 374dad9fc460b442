//! Box / egg / plate quantity conversion.
//!
//! A transaction line carries the same quantity in three units. Exactly one
//! of them is edited at a time; the other two are derived from it:
//!
//! | Edited | Derived |
//! |--------|---------|
//! | box    | `egg = box × unit`, `plate = egg / 30` |
//! | egg    | `box = egg / unit`, `plate = egg / 30` |
//! | plate  | `egg = plate × 30`, `box = egg / unit` |
//!
//! When the unit size is zero the box figure cannot be related to eggs, so
//! box conversions are skipped and only egg/plate are kept in step.
//! No rounding is applied; fractional boxes and plates are valid. A product
//! or quotient too large for a decimal becomes zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::number::{div_or_zero, mul_or_zero, EGGS_PER_PLATE};

/// Which quantity field drives a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityField {
    /// Packaging units.
    Box,
    /// Individual eggs.
    Egg,
    /// Plates of 30 eggs.
    Plate,
}

/// One quantity expressed in all three units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantities {
    /// Packaging units.
    pub boxes: Decimal,
    /// Individual eggs.
    pub eggs: Decimal,
    /// Plates of 30 eggs.
    pub plates: Decimal,
}

impl Quantities {
    /// Derive all three units from a box count.
    #[must_use]
    pub fn from_boxes(boxes: Decimal, unit: Decimal) -> Self {
        Self::default().convert(QuantityField::Box, boxes, unit)
    }

    /// Derive all three units from an egg count.
    #[must_use]
    pub fn from_eggs(eggs: Decimal, unit: Decimal) -> Self {
        Self::default().convert(QuantityField::Egg, eggs, unit)
    }

    /// Derive all three units from a plate count.
    #[must_use]
    pub fn from_plates(plates: Decimal, unit: Decimal) -> Self {
        Self::default().convert(QuantityField::Plate, plates, unit)
    }

    /// Apply an edit to one field and re-derive the others.
    ///
    /// Fields that cannot be derived (box figures when `unit` is zero) keep
    /// their current values.
    #[must_use]
    pub fn convert(self, field: QuantityField, value: Decimal, unit: Decimal) -> Self {
        let has_unit = !unit.is_zero();
        let mut next = self;
        match field {
            QuantityField::Box => {
                next.boxes = value;
                if has_unit {
                    next.eggs = mul_or_zero(value, unit);
                    next.plates = next.eggs / EGGS_PER_PLATE;
                }
            }
            QuantityField::Egg => {
                next.eggs = value;
                next.plates = value / EGGS_PER_PLATE;
                if has_unit {
                    next.boxes = div_or_zero(value, unit);
                }
            }
            QuantityField::Plate => {
                next.plates = value;
                next.eggs = mul_or_zero(value, EGGS_PER_PLATE);
                if has_unit {
                    next.boxes = div_or_zero(next.eggs, unit);
                }
            }
        }
        next
    }

    /// The value of one field.
    #[must_use]
    pub const fn get(&self, field: QuantityField) -> Decimal {
        match field {
            QuantityField::Box => self.boxes,
            QuantityField::Egg => self.eggs,
            QuantityField::Plate => self.plates,
        }
    }
}
