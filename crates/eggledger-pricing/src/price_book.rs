//! Customer price book.
//!
//! The price book holds one [`CustomerItemPrice`] for every (customer, item)
//! pair. [`sync_price_book`] rebuilds the whole collection whenever the
//! catalog or the customer list changes; the remaining functions back the
//! price-book screen: the joined row view, saving pending edits, and the two
//! bulk operations.

use eggledger_core::{
    mul_or_zero, Customer, CustomerItemPrice, Item, NaiveDate, PriceEdit, PriceInputType,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::reference::{latest_official_price, official_unit_price, PriceInputs, ReferenceData};
use crate::unit_price::PricingContext;

/// Pending edits keyed by item id.
pub type EditMap = HashMap<String, PriceEdit>;

/// Rebuild the full price book for the current customers and items.
///
/// Existing pairs are carried over unchanged. New pairs get a zeroed
/// auto-mode record stamped `today`. Pairs whose customer or item is gone
/// are dropped. Output order is customers, then items, as given.
#[must_use]
pub fn sync_price_book(
    previous: &[CustomerItemPrice],
    customers: &[Customer],
    items: &[Item],
    today: NaiveDate,
) -> Vec<CustomerItemPrice> {
    let mut existing: HashMap<(&str, &str), &CustomerItemPrice> = HashMap::new();
    for record in previous {
        existing
            .entry((record.customer_id.as_str(), record.item_id.as_str()))
            .or_insert(record);
    }

    let mut book = Vec::with_capacity(customers.len() * items.len());
    for customer in customers {
        for item in items {
            let record = existing.get(&(customer.id.as_str(), item.id.as_str())).map_or_else(
                || CustomerItemPrice::new(&customer.id, &item.id, today),
                |found| (*found).clone(),
            );
            book.push(record);
        }
    }
    book
}

/// Records belonging to one customer.
pub fn prices_for_customer<'a>(
    book: &'a [CustomerItemPrice],
    customer_id: &'a str,
) -> impl Iterator<Item = &'a CustomerItemPrice> + 'a {
    book.iter().filter(move |p| p.customer_id == customer_id)
}

/// A price-book record joined with its item, packaging and official price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBookRow {
    /// The customer.
    pub customer_id: String,
    /// The item.
    pub item_id: String,
    /// Item name, blank when the item is gone.
    pub item_name: String,
    /// Item spec.
    pub spec: String,
    /// Packaging name.
    pub packaging: String,
    /// Eggs per unit used for this row.
    pub unit: Decimal,
    /// `(official + packaging) × unit`.
    pub base_price: Decimal,
    /// Effective DC.
    pub dc: Decimal,
    /// Effective final price.
    pub final_price: Decimal,
    /// `final_price − base_price`.
    pub diff: Decimal,
    /// Pricing mode.
    pub price_input_type: PriceInputType,
    /// Pinned price in manual mode.
    pub manual_price: Option<Decimal>,
    /// Last modification date.
    pub modified: NaiveDate,
    /// Creation date.
    pub created: NaiveDate,
}

fn inputs_for<'a>(
    refs: &ReferenceData<'a>,
    record: &CustomerItemPrice,
) -> (Option<&'a Item>, PriceInputs) {
    let region = refs.region_for(&record.customer_id);
    match refs.item(&record.item_id) {
        Some(item) => (Some(item), refs.book_inputs(item, region)),
        None => (None, PriceInputs::new(Decimal::ZERO, Decimal::ZERO, Decimal::ONE)),
    }
}

/// Compute the effective (dc, final price) of a record under a pending edit.
///
/// A pinned manual price wins over everything and back-derives the DC.
/// Otherwise a pending final price back-derives the DC, and a pending DC (or
/// the stored one) yields the automatic final price.
fn effective_price(
    record: &CustomerItemPrice,
    edit: PriceEdit,
    inputs: &PriceInputs,
) -> (Decimal, Decimal) {
    if let Some(pinned) = record.pinned_price() {
        return (inputs.invert_dc(pinned), pinned);
    }
    match edit {
        PriceEdit::FinalPrice(price) => (inputs.invert_dc(price), price),
        PriceEdit::Dc(dc) => (dc, inputs.auto_price(PricingContext::PriceBook, dc)),
        PriceEdit::None => (
            record.dc,
            inputs.auto_price(PricingContext::PriceBook, record.dc),
        ),
    }
}

/// The price-book screen rows for one customer.
#[must_use]
pub fn price_book_rows(
    book: &[CustomerItemPrice],
    customer_id: &str,
    edits: &EditMap,
    refs: &ReferenceData<'_>,
) -> Vec<PriceBookRow> {
    prices_for_customer(book, customer_id)
        .map(|record| {
            let (item, inputs) = inputs_for(refs, record);
            let edit = edits
                .get(&record.item_id)
                .copied()
                .map_or(PriceEdit::None, PriceEdit::effective);
            let (dc, final_price) = effective_price(record, edit, &inputs);
            let base_price = inputs.base_price();
            PriceBookRow {
                customer_id: record.customer_id.clone(),
                item_id: record.item_id.clone(),
                item_name: item.map(|i| i.name.clone()).unwrap_or_default(),
                spec: item.map(|i| i.spec.clone()).unwrap_or_default(),
                packaging: item.map(|i| i.packaging.clone()).unwrap_or_default(),
                unit: inputs.unit,
                base_price,
                dc,
                final_price,
                diff: final_price - base_price,
                price_input_type: record.price_input_type,
                manual_price: record.manual_price,
                modified: record.modified,
                created: record.created,
            }
        })
        .collect()
}

/// Commit pending edits for one customer's rows.
///
/// Only rows with an entry in `edits` change:
///
/// - a non-zero final price pins the row and back-derives its DC;
/// - otherwise a non-zero DC pins the row at the price that DC yields;
/// - otherwise the row returns to auto mode, priced from its stored DC.
///
/// Returns the number of rows updated.
pub fn save_price_edits(
    book: &mut [CustomerItemPrice],
    customer_id: &str,
    edits: &EditMap,
    refs: &ReferenceData<'_>,
    today: NaiveDate,
) -> usize {
    let mut updated = 0;
    for record in book.iter_mut().filter(|p| p.customer_id == customer_id) {
        let Some(edit) = edits.get(&record.item_id) else {
            continue;
        };
        let (_, inputs) = inputs_for(refs, record);
        match edit.effective() {
            PriceEdit::FinalPrice(price) => record.pin(price, inputs.invert_dc(price)),
            PriceEdit::Dc(dc) => record.pin(inputs.auto_price(PricingContext::PriceBook, dc), dc),
            PriceEdit::None => {
                record.unpin(inputs.auto_price(PricingContext::PriceBook, record.dc));
            }
        }
        record.base_price = inputs.base_price();
        record.diff = record.final_price - record.base_price;
        record.modified = today;
        updated += 1;
    }
    updated
}

/// Apply one DC to every row of a customer and pin the resulting prices.
///
/// Unlike slip bulk apply, the affected rows switch to manual mode.
pub fn bulk_apply_dc(
    book: &mut [CustomerItemPrice],
    customer_id: &str,
    dc: Decimal,
    refs: &ReferenceData<'_>,
    today: NaiveDate,
) -> usize {
    let mut updated = 0;
    for record in book.iter_mut().filter(|p| p.customer_id == customer_id) {
        let (_, inputs) = inputs_for(refs, record);
        record.pin(inputs.auto_price(PricingContext::PriceBook, dc), dc);
        record.base_price = inputs.base_price();
        record.diff = record.final_price - record.base_price;
        record.modified = today;
        updated += 1;
    }
    updated
}

/// Re-price every row of a customer from the latest official price of `region`.
///
/// Each row's stored DC is kept; mode and manual price are left alone.
pub fn bulk_apply_official(
    book: &mut [CustomerItemPrice],
    customer_id: &str,
    region: &str,
    refs: &ReferenceData<'_>,
    today: NaiveDate,
) -> usize {
    let latest = latest_official_price(refs.official_prices, region);
    let mut updated = 0;
    for record in book.iter_mut().filter(|p| p.customer_id == customer_id) {
        let Some(item) = refs.item(&record.item_id) else {
            continue;
        };
        let book_inputs = refs.book_inputs(item, region);
        let inputs = PriceInputs::new(
            official_unit_price(latest, &item.spec),
            book_inputs.packaging_cost,
            book_inputs.unit,
        );
        record.base_price = inputs.base_price();
        record.final_price = record.base_price - mul_or_zero(record.dc, inputs.unit);
        record.diff = record.final_price - record.base_price;
        record.modified = today;
        updated += 1;
    }
    updated
}
