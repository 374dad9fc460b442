//! Per-customer price-book records and pending edits.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::PriceInputType;

/// Negotiated price for one (customer, item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerItemPrice {
    /// The customer.
    pub customer_id: String,
    /// The item.
    pub item_id: String,
    /// Reference price: `(official + packaging) × unit`.
    pub base_price: Decimal,
    /// Per-egg discount.
    pub dc: Decimal,
    /// Price per packaging unit.
    pub final_price: Decimal,
    /// `final_price − base_price`.
    pub diff: Decimal,
    /// Pricing mode.
    #[serde(default)]
    pub price_input_type: PriceInputType,
    /// Pinned final price in manual mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_price: Option<Decimal>,
    /// Last modification date.
    pub modified: NaiveDate,
    /// Creation date.
    pub created: NaiveDate,
}

impl CustomerItemPrice {
    /// A fresh record: all figures zero, auto mode, stamped `today`.
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        item_id: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            item_id: item_id.into(),
            base_price: Decimal::ZERO,
            dc: Decimal::ZERO,
            final_price: Decimal::ZERO,
            diff: Decimal::ZERO,
            price_input_type: PriceInputType::Auto,
            manual_price: None,
            modified: today,
            created: today,
        }
    }

    /// Whether this record belongs to the pair.
    #[must_use]
    pub fn is_pair(&self, customer_id: &str, item_id: &str) -> bool {
        self.customer_id == customer_id && self.item_id == item_id
    }

    /// The pinned price, if the record is in manual mode with a price set.
    #[must_use]
    pub fn pinned_price(&self) -> Option<Decimal> {
        match self.price_input_type {
            PriceInputType::Manual => self.manual_price,
            PriceInputType::Auto => None,
        }
    }

    /// Pin the record to `final_price` in manual mode.
    pub fn pin(&mut self, final_price: Decimal, dc: Decimal) {
        self.price_input_type = PriceInputType::Manual;
        self.manual_price = Some(final_price);
        self.final_price = final_price;
        self.dc = dc;
    }

    /// Return the record to auto mode with the given final price.
    pub fn unpin(&mut self, final_price: Decimal) {
        self.price_input_type = PriceInputType::Auto;
        self.manual_price = None;
        self.final_price = final_price;
    }
}

/// A not-yet-saved edit to a price-book row.
///
/// DC and final price are mutually exclusive: setting one replaces the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PriceEdit {
    /// Nothing pending.
    #[default]
    None,
    /// A DC was typed in.
    Dc(Decimal),
    /// A final price was typed in.
    FinalPrice(Decimal),
}

impl PriceEdit {
    /// Record a DC edit, discarding any pending final price.
    pub fn set_dc(&mut self, dc: Decimal) {
        *self = Self::Dc(dc);
    }

    /// Record a final-price edit, discarding any pending DC.
    pub fn set_final_price(&mut self, price: Decimal) {
        *self = Self::FinalPrice(price);
    }

    /// The edit with zero values treated as no edit.
    ///
    /// A field edited to exactly 0 does not count as an override.
    #[must_use]
    pub fn effective(self) -> Self {
        match self {
            Self::Dc(v) | Self::FinalPrice(v) if v.is_zero() => Self::None,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 12).unwrap()
    }

    #[test]
    fn test_new_record_defaults() {
        let rec = CustomerItemPrice::new("1", "2", today());
        assert_eq!(rec.price_input_type, PriceInputType::Auto);
        assert_eq!(rec.final_price, Decimal::ZERO);
        assert_eq!(rec.manual_price, None);
        assert_eq!(rec.created, today());
        assert!(rec.is_pair("1", "2"));
    }

    #[test]
    fn test_pin_and_unpin() {
        let mut rec = CustomerItemPrice::new("1", "2", today());
        rec.pin(dec!(24000), dec!(20));
        assert_eq!(rec.pinned_price(), Some(dec!(24000)));
        rec.unpin(dec!(25500));
        assert_eq!(rec.pinned_price(), None);
        assert_eq!(rec.final_price, dec!(25500));
    }

    #[test]
    fn test_edits_are_exclusive() {
        let mut edit = PriceEdit::default();
        edit.set_dc(dec!(20));
        edit.set_final_price(dec!(24000));
        assert_eq!(edit, PriceEdit::FinalPrice(dec!(24000)));
        edit.set_dc(dec!(5));
        assert_eq!(edit, PriceEdit::Dc(dec!(5)));
    }

    #[test]
    fn test_zero_edit_is_no_edit() {
        assert_eq!(PriceEdit::Dc(Decimal::ZERO).effective(), PriceEdit::None);
        assert_eq!(PriceEdit::FinalPrice(Decimal::ZERO).effective(), PriceEdit::None);
        assert_eq!(PriceEdit::Dc(dec!(1)).effective(), PriceEdit::Dc(dec!(1)));
    }
}
