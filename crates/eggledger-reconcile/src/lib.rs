//! Derived figures for eggledger: totals, stock and customer balances.
//!
//! Everything here is a full recompute over the collections passed in:
//!
//! - [`aggregate`] - Transaction list filters and footer totals
//! - [`stock`] - Per-item stock rebuilt from purchases and sales, and its valuation
//! - [`ledger`] - Customer `total_transaction` / `balance` reconciliation
//!
//! # Example
//!
//! ```
//! use eggledger_core::{Customer, NaiveDate, Payment};
//! use eggledger_reconcile::reconcile_on_payments;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 2, 12).unwrap();
//! let mut customers = vec![Customer::new("1", "산들란", "경기")];
//! customers[0].total_transaction = dec!(7000000);
//! let payments = vec![
//!     Payment::new("1", date, "1", dec!(2000000)),
//!     Payment::new("2", date, "1", dec!(500000)),
//! ];
//!
//! reconcile_on_payments(&mut customers, &payments);
//! assert_eq!(customers[0].balance, dec!(4500000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod ledger;
pub mod stock;

pub use aggregate::{
    filter_transactions, list_totals, transaction_total, ListTotals, TransactionFilter,
};
pub use ledger::{
    payment_history, payments_total, reconcile_on_payments, reconcile_on_sales, sales_total,
    PaymentHistoryEntry,
};
pub use stock::{recompute_stock, stock_level, stock_valuation, total_stock_value, StockValuation};
