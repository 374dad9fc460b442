//! Core types for eggledger
//!
//! This crate provides the record types shared by every eggledger crate:
//!
//! - [`Item`] - A sellable egg product and its [`EggSpec`] size category
//! - [`Package`] - A packaging option with per-egg cost and unit size
//! - [`OfficialPrice`] - A dated, regional reference price per spec
//! - [`Customer`] - A trading partner with derived balance fields
//! - [`Transaction`] / [`LineItem`] - Purchase and sale slips
//! - [`Payment`] - Money received from a customer
//! - [`Stock`] - Net egg quantity per item
//! - [`CustomerItemPrice`] - One row of the per-customer price book
//! - [`Quantities`] - Box / egg / plate cross-conversion
//!
//! # Example
//!
//! ```
//! use eggledger_core::{Item, LineItem, QuantityField};
//! use rust_decimal_macros::dec;
//!
//! let item = Item::new("1", "A001", "일반 대란", "대란", "일반포장", dec!(150));
//! let mut line = LineItem::new(&item.id).with_price(dec!(25500));
//!
//! line.set_quantity(QuantityField::Box, dec!(2), item.unit);
//!
//! assert_eq!(line.quantity_egg, dec!(300));
//! assert_eq!(line.quantity_plate, dec!(10));
//! assert_eq!(line.amount, dec!(51000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod customer;
pub mod item;
pub mod number;
pub mod official;
pub mod package;
pub mod price_book;
pub mod quantity;
pub mod transaction;

pub use customer::Customer;
pub use item::{EggSpec, Item, ParseSpecError, PriceInputType};
pub use number::{coerce_decimal, div_or_zero, mul_or_zero, EGGS_PER_PLATE};
pub use official::OfficialPrice;
pub use package::Package;
pub use price_book::{CustomerItemPrice, PriceEdit};
pub use quantity::{Quantities, QuantityField};
pub use transaction::{LineItem, Payment, Purchase, Sale, Stock, Transaction, TransactionKind};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
