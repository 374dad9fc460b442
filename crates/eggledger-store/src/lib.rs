//! In-memory eggledger repository.
//!
//! [`Store`] owns every collection and is the only place they change. After
//! each mutation it re-runs the dependent recomputes in a fixed order:
//!
//! | Change | Recompute |
//! |--------|-----------|
//! | item or customer | price book sync, stock |
//! | purchase or sale | stock, ledger (sales trigger) |
//! | payment | ledger (payments trigger) |
//!
//! Saves go through validation first and leave the store untouched when they
//! are rejected.
//!
//! # Example
//!
//! ```
//! use eggledger_core::{NaiveDate, QuantityField, TransactionKind};
//! use eggledger_store::{Store, StoreOptions};
//! use rust_decimal_macros::dec;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 2, 12).unwrap();
//! let mut store = Store::new(StoreOptions::new().with_today(today));
//!
//! let mut sale = store.new_draft(TransactionKind::Sale, today);
//! sale.customer_id = "1".to_string();
//! sale.lines[0].dc = dec!(20);
//! sale.lines[0].set_quantity(QuantityField::Box, dec!(2), dec!(150));
//! store.reprice(&mut sale, TransactionKind::Sale);
//! store.add_transaction(TransactionKind::Sale, sale).unwrap();
//!
//! assert_eq!(store.customer("1").unwrap().total_transaction, dec!(51000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod options;
mod seed;
mod snapshot;
mod store;

pub use options::StoreOptions;
pub use seed::{seed_customers, seed_items, seed_official_prices, seed_packages};
pub use snapshot::Snapshot;
pub use store::Store;

use eggledger_validate::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A save or removal was rejected; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error reading or writing a file.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A file was not valid JSON for the expected shape.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// The path involved.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
