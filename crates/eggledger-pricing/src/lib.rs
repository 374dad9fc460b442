//! Price resolution and the customer price book for eggledger.
//!
//! This crate turns reference data into prices:
//!
//! - [`reference`] - Latest official price and packaging lookups
//! - [`unit_price`] - Per-context unit price formulas, DC inversion and slip re-pricing
//! - [`price_book`] - Customer × item price book sync, editing and bulk operations
//! - [`catalog`] - Item catalog price view and item form suggestions
//!
//! Missing reference data is never an error: an absent official price,
//! unknown spec or unmatched packaging name prices as zero.
//!
//! # Example
//!
//! ```
//! use eggledger_core::{EggSpec, Item, NaiveDate, OfficialPrice, Package};
//! use eggledger_pricing::{PricingContext, ReferenceData};
//! use rust_decimal_macros::dec;
//!
//! let items = vec![Item::new("1", "A001", "일반 대란", "대란", "일반포장", dec!(150))];
//! let packages = vec![Package::new("1", "일반포장", "150", "10")];
//! let prices = vec![
//!     OfficialPrice::new("경기", NaiveDate::from_ymd_opt(2025, 2, 12).unwrap())
//!         .with_price(EggSpec::Large, dec!(180)),
//! ];
//! let refs = ReferenceData::new(&items, &packages, &prices, &[]);
//!
//! let inputs = refs.line_inputs(&items[0], "경기");
//! assert_eq!(inputs.auto_price(PricingContext::Sale, dec!(20)), dec!(25500));
//! assert_eq!(inputs.auto_price(PricingContext::Purchase, dec!(0)), dec!(27000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod price_book;
pub mod reference;
pub mod unit_price;

pub use catalog::{item_price_view, suggest_item_price, suggest_item_unit, ItemPriceView};
pub use price_book::{
    bulk_apply_dc, bulk_apply_official, price_book_rows, prices_for_customer, save_price_edits,
    sync_price_book, EditMap, PriceBookRow,
};
pub use reference::{
    find_package, latest_official_price, latest_official_price_any, official_unit_price,
    packaging_cost, regions, PriceInputs, ReferenceData, DEFAULT_REGION,
};
pub use unit_price::{
    apply_bulk_dc, default_bulk_dc, price_line, reprice_transaction, PricingContext,
};
