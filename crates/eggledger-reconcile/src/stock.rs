//! Inventory recomputation and valuation.
//!
//! Stock is not a movement ledger. [`recompute_stock`] rebuilds it from
//! scratch on every purchase or sale change: every catalog item starts at
//! zero, purchased eggs are added and sold eggs subtracted. Over-selling is
//! allowed and shows up as negative stock.

use eggledger_core::{mul_or_zero, Item, Stock, Transaction, EGGS_PER_PLATE};
use eggledger_pricing::ReferenceData;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Rebuild per-item stock from all purchases and sales.
///
/// The result has one entry per catalog item, in catalog order. Lines whose
/// item is not in the catalog are skipped.
#[must_use]
pub fn recompute_stock(
    items: &[Item],
    purchases: &[Transaction],
    sales: &[Transaction],
) -> Vec<Stock> {
    let mut levels: HashMap<&str, Decimal> = items
        .iter()
        .map(|item| (item.id.as_str(), Decimal::ZERO))
        .collect();

    let signed = purchases
        .iter()
        .map(|t| (t, Decimal::ONE))
        .chain(sales.iter().map(|t| (t, Decimal::NEGATIVE_ONE)));
    for (txn, sign) in signed {
        for line in &txn.lines {
            match levels.get_mut(line.item_id.as_str()) {
                Some(level) => *level += sign * line.quantity_egg,
                None => {
                    tracing::debug!(
                        txn = %txn.id,
                        item = %line.item_id,
                        "line for unknown item skipped"
                    );
                }
            }
        }
    }

    items
        .iter()
        .map(|item| {
            let level = levels.get(item.id.as_str()).copied().unwrap_or_default();
            Stock::new(&item.id, level)
        })
        .collect()
}

/// Stock level of one item; zero when absent.
#[must_use]
pub fn stock_level(stock: &[Stock], item_id: &str) -> Decimal {
    stock
        .iter()
        .find(|s| s.item_id == item_id)
        .map_or(Decimal::ZERO, |s| s.quantity_egg)
}

/// One row of the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockValuation {
    /// The item.
    pub item_id: String,
    /// Item name, blank when the item is gone.
    pub item_name: String,
    /// Item spec.
    pub spec: String,
    /// Net eggs.
    pub quantity_egg: Decimal,
    /// Net plates, `eggs / 30`.
    pub plates: Decimal,
    /// Eggs per unit used for valuation.
    pub unit: Decimal,
    /// Reference unit price, `(official + packaging) × unit`.
    pub unit_price: Decimal,
    /// `eggs / unit × unit_price`.
    pub value: Decimal,
}

/// Value every stock entry at the latest official price of `region`.
#[must_use]
pub fn stock_valuation(
    stock: &[Stock],
    refs: &ReferenceData<'_>,
    region: &str,
) -> Vec<StockValuation> {
    stock
        .iter()
        .map(|entry| {
            let plates = entry.quantity_egg / EGGS_PER_PLATE;
            let Some(item) = refs.item(&entry.item_id) else {
                return StockValuation {
                    item_id: entry.item_id.clone(),
                    item_name: String::new(),
                    spec: String::new(),
                    quantity_egg: entry.quantity_egg,
                    plates,
                    unit: Decimal::ZERO,
                    unit_price: Decimal::ZERO,
                    value: Decimal::ZERO,
                };
            };
            let inputs = refs.book_inputs(item, region);
            let unit_price = inputs.base_price();
            let units = entry
                .quantity_egg
                .checked_div(inputs.unit)
                .unwrap_or(Decimal::ZERO);
            StockValuation {
                item_id: entry.item_id.clone(),
                item_name: item.name.clone(),
                spec: item.spec.clone(),
                quantity_egg: entry.quantity_egg,
                plates,
                unit: inputs.unit,
                unit_price,
                value: mul_or_zero(units, unit_price),
            }
        })
        .collect()
}

/// Total value of a valuation list.
#[must_use]
pub fn total_stock_value(rows: &[StockValuation]) -> Decimal {
    rows.iter().map(|r| r.value).sum()
}
