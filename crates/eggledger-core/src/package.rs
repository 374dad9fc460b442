//! Packaging options.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::number::coerce_decimal;

/// A named packaging option.
///
/// `unit` and `cost` hold the text as entered on the packaging form; use
/// [`Package::unit_size`] and [`Package::cost_per_egg`] to read them as
/// numbers. Items refer to a package by [`Package::name`], not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Unique identifier.
    pub id: String,
    /// Packaging name, matched exactly against [`Item::packaging`](crate::Item::packaging).
    pub name: String,
    /// Eggs per unit, as entered.
    pub unit: String,
    /// Per-egg packaging cost, as entered.
    pub cost: String,
    /// Free-form remarks.
    #[serde(default)]
    pub remarks: String,
}

impl Package {
    /// Create a new package.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            cost: cost.into(),
            remarks: String::new(),
        }
    }

    /// Add remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Eggs per unit; non-numeric input reads as zero.
    #[must_use]
    pub fn unit_size(&self) -> Decimal {
        coerce_decimal(&self.unit)
    }

    /// Packaging cost per egg; non-numeric input reads as zero.
    #[must_use]
    pub fn cost_per_egg(&self) -> Decimal {
        coerce_decimal(&self.cost)
    }

    /// Whether a unit size was entered at all.
    #[must_use]
    pub fn has_unit(&self) -> bool {
        !self.unit.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numeric_fields() {
        let pkg = Package::new("1", "일반포장", "150", "10");
        assert_eq!(pkg.unit_size(), dec!(150));
        assert_eq!(pkg.cost_per_egg(), dec!(10));
        assert!(pkg.has_unit());
    }

    #[test]
    fn test_non_numeric_fields_read_as_zero() {
        let pkg = Package::new("2", "박스", "한판", "");
        assert_eq!(pkg.unit_size(), Decimal::ZERO);
        assert_eq!(pkg.cost_per_egg(), Decimal::ZERO);
        assert!(pkg.has_unit());
        assert!(!Package::new("3", "x", " ", "1").has_unit());
    }
}
