//! Unit price formulas.
//!
//! Prices are quoted per packaging unit (box). Official prices, packaging
//! costs and DC are per egg and are scaled by the unit size:
//!
//! | Context | Auto unit price |
//! |---------|-----------------|
//! | Purchase | `(official − dc) × unit` |
//! | Sale, price book | `(official − dc + packaging) × unit` |
//!
//! Purchases leave packaging cost out. Both forms are in use and each is
//! applied only in its own context.

use eggledger_core::{div_or_zero, mul_or_zero, LineItem, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reference::{PriceInputs, ReferenceData};

/// Where a price is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingContext {
    /// Purchase slip line; packaging cost excluded.
    Purchase,
    /// Sale slip line.
    Sale,
    /// Customer price-book row.
    PriceBook,
}

impl PriceInputs {
    /// Automatic unit price in a context.
    #[must_use]
    pub fn auto_price(&self, context: PricingContext, dc: Decimal) -> Decimal {
        match context {
            PricingContext::Purchase => mul_or_zero(self.official - dc, self.unit),
            PricingContext::Sale | PricingContext::PriceBook => {
                mul_or_zero(self.official - dc + self.packaging_cost, self.unit)
            }
        }
    }

    /// Reference price with no discount: `(official + packaging) × unit`.
    #[must_use]
    pub fn base_price(&self) -> Decimal {
        mul_or_zero(self.official + self.packaging_cost, self.unit)
    }

    /// Raw official valuation of one unit: `official × unit`.
    #[must_use]
    pub fn official_value(&self) -> Decimal {
        mul_or_zero(self.official, self.unit)
    }

    /// Unit price minus raw official valuation.
    #[must_use]
    pub fn unit_price_diff(&self, unit_price: Decimal) -> Decimal {
        unit_price - self.official_value()
    }

    /// Back-derive the DC that yields `final_price`.
    ///
    /// `dc = official + packaging − final_price / unit`. With a zero unit the
    /// quotient is taken as zero.
    #[must_use]
    pub fn invert_dc(&self, final_price: Decimal) -> Decimal {
        let per_egg = div_or_zero(final_price, self.unit);
        self.official + self.packaging_cost - per_egg
    }
}

/// Price one slip line from its DC and refresh its diff and amount.
pub fn price_line(line: &mut LineItem, inputs: &PriceInputs, context: PricingContext) {
    let price = inputs.auto_price(context, line.dc);
    line.diff = inputs.unit_price_diff(price);
    line.set_price(price);
}

/// Re-price every line of a slip for its customer's region and refresh the total.
///
/// Lines whose item is no longer in the catalog keep their current price.
pub fn reprice_transaction(
    txn: &mut Transaction,
    refs: &ReferenceData<'_>,
    context: PricingContext,
) {
    let region = refs.region_for(&txn.customer_id);
    for line in &mut txn.lines {
        if let Some(item) = refs.item(&line.item_id) {
            let inputs = refs.line_inputs(item, region);
            price_line(line, &inputs, context);
        }
    }
    txn.recompute_total();
}

/// Apply one DC to every line of a slip and re-price it.
///
/// Slip lines stay automatically priced; only the DC changes.
pub fn apply_bulk_dc(
    txn: &mut Transaction,
    dc: Decimal,
    refs: &ReferenceData<'_>,
    context: PricingContext,
) {
    for line in &mut txn.lines {
        line.dc = dc;
    }
    reprice_transaction(txn, refs, context);
}

/// The DC to pre-fill for bulk apply: the customer's default discount.
#[must_use]
pub fn default_bulk_dc(refs: &ReferenceData<'_>, customer_id: &str) -> Decimal {
    refs.customer(customer_id)
        .map_or(Decimal::ZERO, |c| c.discount)
}
