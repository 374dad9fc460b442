//! Purchase/sale slips, payments and stock levels.
//!
//! Purchases and sales share one shape: a header owning an ordered list of
//! [`LineItem`]s. Which collection a [`Transaction`] lives in decides whether
//! it adds to or draws from stock, and which unit-price formula applies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::number::{mul_or_zero, EGGS_PER_PLATE};
use crate::quantity::{Quantities, QuantityField};

/// Which collection a slip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Goods bought in; adds to stock.
    Purchase,
    /// Goods sold; draws from stock and counts toward customer balances.
    Sale,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Purchase => write!(f, "purchase"),
            Self::Sale => write!(f, "sale"),
        }
    }
}

/// One line of a purchase or sale.
///
/// `quantity_box`, `quantity_egg` and `quantity_plate` describe the same
/// quantity; edit them through [`LineItem::set_quantity`] so they stay in
/// step. `amount` is always `quantity_box × price`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// The [`Item`] this line refers to.
    pub item_id: String,
    /// Quantity in packaging units.
    #[serde(default)]
    pub quantity_box: Decimal,
    /// Quantity in eggs.
    #[serde(default)]
    pub quantity_egg: Decimal,
    /// Quantity in plates (30 eggs).
    #[serde(default)]
    pub quantity_plate: Decimal,
    /// Per-egg discount.
    #[serde(default)]
    pub dc: Decimal,
    /// Price per packaging unit.
    #[serde(default)]
    pub price: Decimal,
    /// Line amount.
    #[serde(default)]
    pub amount: Decimal,
    /// Palette count.
    #[serde(default)]
    pub palettes: Decimal,
    /// Unit price minus raw official valuation.
    #[serde(default)]
    pub diff: Decimal,
}

impl LineItem {
    /// Create an empty line for an item.
    #[must_use]
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ..Self::default()
        }
    }

    /// Set the unit price and recompute the amount.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.set_price(price);
        self
    }

    /// Set the DC.
    #[must_use]
    pub const fn with_dc(mut self, dc: Decimal) -> Self {
        self.dc = dc;
        self
    }

    /// Set a quantity through conversion.
    #[must_use]
    pub fn with_quantity(mut self, field: QuantityField, value: Decimal, unit: Decimal) -> Self {
        self.set_quantity(field, value, unit);
        self
    }

    /// Set the palette count.
    #[must_use]
    pub const fn with_palettes(mut self, palettes: Decimal) -> Self {
        self.palettes = palettes;
        self
    }

    /// The three quantity fields.
    #[must_use]
    pub const fn quantities(&self) -> Quantities {
        Quantities {
            boxes: self.quantity_box,
            eggs: self.quantity_egg,
            plates: self.quantity_plate,
        }
    }

    /// Edit one quantity field, re-derive the other two and the amount.
    pub fn set_quantity(&mut self, field: QuantityField, value: Decimal, unit: Decimal) {
        let q = self.quantities().convert(field, value, unit);
        self.quantity_box = q.boxes;
        self.quantity_egg = q.eggs;
        self.quantity_plate = q.plates;
        self.recompute_amount();
    }

    /// Set the unit price and recompute the amount.
    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
        self.recompute_amount();
    }

    /// Recompute `amount = quantity_box × price`.
    pub fn recompute_amount(&mut self) -> Decimal {
        self.amount = mul_or_zero(self.quantity_box, self.price);
        self.amount
    }

    /// Whether any quantity was entered on this line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity_box.is_zero() && self.quantity_egg.is_zero() && self.quantity_plate.is_zero()
    }
}

/// A purchase or sale slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Slip number.
    pub id: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Counterparty; empty when none was selected.
    #[serde(default)]
    pub customer_id: String,
    /// Person in charge.
    #[serde(default)]
    pub manager: String,
    /// Free-form memo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Line items, in entry order.
    #[serde(rename = "items", default)]
    pub lines: Vec<LineItem>,
    /// Sum of line amounts.
    #[serde(default)]
    pub total_amount: Decimal,
}

/// A purchase slip.
pub type Purchase = Transaction;

/// A sale slip.
pub type Sale = Transaction;

impl Transaction {
    /// Create an empty slip.
    #[must_use]
    pub fn new(id: impl Into<String>, date: NaiveDate, customer_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            customer_id: customer_id.into(),
            manager: String::new(),
            memo: None,
            lines: Vec::new(),
            total_amount: Decimal::ZERO,
        }
    }

    /// Create a new ("신규") slip with one zeroed line per catalog item.
    ///
    /// No customer is selected yet. Lines start at the item's declared price.
    #[must_use]
    pub fn draft(id: impl Into<String>, date: NaiveDate, catalog: &[Item]) -> Self {
        let mut txn = Self::new(id, date, "");
        txn.lines = catalog
            .iter()
            .map(|item| LineItem::new(&item.id).with_price(item.price))
            .collect();
        txn
    }

    /// Append a line and refresh the total.
    #[must_use]
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self.recompute_total();
        self
    }

    /// Set the person in charge.
    #[must_use]
    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = manager.into();
        self
    }

    /// Set the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Whether a counterparty was selected.
    #[must_use]
    pub fn has_customer(&self) -> bool {
        !self.customer_id.trim().is_empty()
    }

    /// Recompute `total_amount` as the sum of line amounts.
    pub fn recompute_total(&mut self) -> Decimal {
        self.total_amount = self.lines.iter().map(|l| l.amount).sum();
        self.total_amount
    }

    /// Recompute every line amount, then the total.
    pub fn recompute(&mut self) -> Decimal {
        for line in &mut self.lines {
            line.recompute_amount();
        }
        self.recompute_total()
    }

    /// Total eggs over all lines.
    #[must_use]
    pub fn total_eggs(&self) -> Decimal {
        self.lines.iter().map(|l| l.quantity_egg).sum()
    }

    /// Total boxes over all lines.
    #[must_use]
    pub fn total_boxes(&self) -> Decimal {
        self.lines.iter().map(|l| l.quantity_box).sum()
    }

    /// Total plates, derived from the total egg count.
    #[must_use]
    pub fn total_plates(&self) -> Decimal {
        self.total_eggs() / EGGS_PER_PLATE
    }

    /// Total palettes over all lines.
    #[must_use]
    pub fn total_palettes(&self) -> Decimal {
        self.lines.iter().map(|l| l.palettes).sum()
    }

    /// Lines referring to an item.
    pub fn lines_for<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a LineItem> + 'a {
        self.lines.iter().filter(move |l| l.item_id == item_id)
    }
}

/// Money received from a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: String,
    /// Date received.
    pub date: NaiveDate,
    /// Paying customer.
    #[serde(default)]
    pub customer_id: String,
    /// Amount received.
    pub amount: Decimal,
    /// Payment method (현금, 계좌이체, ...).
    #[serde(default)]
    pub method: String,
    /// Free-form memo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Sale slip this payment settles, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,
}

impl Payment {
    /// Create a payment.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        customer_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            customer_id: customer_id.into(),
            amount,
            method: String::new(),
            memo: None,
            sale_id: None,
        }
    }

    /// Set the payment method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Link to a sale slip.
    #[must_use]
    pub fn with_sale(mut self, sale_id: impl Into<String>) -> Self {
        self.sale_id = Some(sale_id.into());
        self
    }
}

/// Net egg quantity held for an item. May be negative after over-selling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// The item.
    pub item_id: String,
    /// Purchased minus sold eggs.
    pub quantity_egg: Decimal,
}

impl Stock {
    /// Create a stock entry.
    #[must_use]
    pub fn new(item_id: impl Into<String>, quantity_egg: Decimal) -> Self {
        Self {
            item_id: item_id.into(),
            quantity_egg,
        }
    }

    /// Stock in plates.
    #[must_use]
    pub fn plates(&self) -> Decimal {
        self.quantity_egg / EGGS_PER_PLATE
    }
}
