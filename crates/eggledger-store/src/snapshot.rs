//! Whole-state JSON snapshots.

use eggledger_core::{
    Customer, CustomerItemPrice, Item, OfficialPrice, Package, Payment, Stock, Transaction,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::StoreError;

/// Every collection the store holds.
///
/// Derived collections (`stock`, `customer_item_prices` and the customers'
/// balance fields) are written out as-is but recomputed on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Item catalog.
    pub items: Vec<Item>,
    /// Packaging options.
    pub packages: Vec<Package>,
    /// Official price records.
    pub official_prices: Vec<OfficialPrice>,
    /// Customers.
    pub customers: Vec<Customer>,
    /// Purchase slips.
    pub purchases: Vec<Transaction>,
    /// Sale slips.
    pub sales: Vec<Transaction>,
    /// Payments received.
    pub payments: Vec<Payment>,
    /// Per-item stock.
    pub stock: Vec<Stock>,
    /// Customer price book.
    pub customer_item_prices: Vec<CustomerItemPrice>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a snapshot file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a snapshot file, replacing any existing one.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let text = self.to_json().map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
