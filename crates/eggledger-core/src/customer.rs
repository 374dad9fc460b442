//! Customers (trading partners).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trading partner.
///
/// `balance`, `profit` and `total_transaction` are derived fields. They are
/// overwritten by the ledger reconciler whenever sales or payments change and
/// should not be treated as authoritative input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier.
    pub id: String,
    /// Company name.
    pub name: String,
    /// Account manager.
    #[serde(default)]
    pub manager: String,
    /// Relationship type (매입, 매출, ...).
    #[serde(rename = "type", default)]
    pub customer_type: String,
    /// Representative's name.
    #[serde(default)]
    pub ceo_name: String,
    /// Business registration number.
    #[serde(default)]
    pub business_number: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Region whose official prices apply to this customer.
    #[serde(default)]
    pub region: String,
    /// Default DC applied to this customer's transactions.
    #[serde(default)]
    pub discount: Decimal,
    /// Registration date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<NaiveDate>,
    /// Outstanding balance (derived).
    #[serde(default)]
    pub balance: Decimal,
    /// Profit (carried, not derived here).
    #[serde(default)]
    pub profit: Decimal,
    /// Sum of sale totals (derived).
    #[serde(default)]
    pub total_transaction: Decimal,
}

impl Customer {
    /// Create a customer in the given region with zero discount and balances.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manager: String::new(),
            customer_type: String::new(),
            ceo_name: String::new(),
            business_number: String::new(),
            phone: String::new(),
            address: String::new(),
            region: region.into(),
            discount: Decimal::ZERO,
            registration_date: None,
            balance: Decimal::ZERO,
            profit: Decimal::ZERO,
            total_transaction: Decimal::ZERO,
        }
    }

    /// Set the default DC.
    #[must_use]
    pub const fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    /// Set the account manager.
    #[must_use]
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = manager.into();
        self
    }

    /// Set the relationship type.
    #[must_use]
    pub fn with_type(mut self, customer_type: impl Into<String>) -> Self {
        self.customer_type = customer_type.into();
        self
    }

    /// Set the registration date.
    #[must_use]
    pub const fn with_registration_date(mut self, date: NaiveDate) -> Self {
        self.registration_date = Some(date);
        self
    }

    /// Region to price this customer in, falling back when none is set.
    #[must_use]
    pub fn region_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.region.is_empty() {
            fallback
        } else {
            &self.region
        }
    }
}
