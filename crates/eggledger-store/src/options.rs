//! Store options.

use chrono::{Local, NaiveDate};
use eggledger_pricing::DEFAULT_REGION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::StoreError;

/// Options controlling a [`Store`](crate::Store).
///
/// Every field has a default, so an empty JSON object is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreOptions {
    /// Region used to price customers without one.
    pub default_region: String,
    /// Fixed date for price-book timestamps. Local date when unset.
    pub today: Option<NaiveDate>,
    /// Whether a new store starts from the built-in seed data.
    pub seed: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_REGION.to_string(),
            today: None,
            seed: true,
        }
    }
}

impl StoreOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback region.
    #[must_use]
    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    /// Pin the date used for timestamps.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Start empty instead of from seed data.
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.seed = false;
        self
    }

    /// Read options from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The date to stamp new and modified records with.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = StoreOptions::default();
        assert_eq!(options.default_region, "경기");
        assert!(options.seed);
        assert_eq!(options.today, None);
    }

    #[test]
    fn test_partial_json() {
        let options: StoreOptions =
            serde_json::from_str(r#"{"today": "2025-02-12", "seed": false}"#).unwrap();
        assert_eq!(options.today, NaiveDate::from_ymd_opt(2025, 2, 12));
        assert_eq!(options.default_region, "경기");
        assert!(!options.seed);
        assert_eq!(options.today(), NaiveDate::from_ymd_opt(2025, 2, 12).unwrap());
    }
}
