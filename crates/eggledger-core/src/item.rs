//! Catalog items and egg size categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Egg size category.
///
/// Each category maps to one column of an [`OfficialPrice`](crate::OfficialPrice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EggSpec {
    /// 왕란
    King,
    /// 특란
    ExtraLarge,
    /// 대란
    Large,
    /// 중란
    Medium,
    /// 소란
    Small,
}

impl EggSpec {
    /// All categories, largest first.
    pub const ALL: [Self; 5] = [
        Self::King,
        Self::ExtraLarge,
        Self::Large,
        Self::Medium,
        Self::Small,
    ];

    /// The Korean trade name used on item records.
    #[must_use]
    pub const fn korean_name(&self) -> &'static str {
        match self {
            Self::King => "왕란",
            Self::ExtraLarge => "특란",
            Self::Large => "대란",
            Self::Medium => "중란",
            Self::Small => "소란",
        }
    }

    /// The field key used on official price records.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::King => "king",
            Self::ExtraLarge => "extraLarge",
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

/// Error returned when a spec string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown egg spec: {0}")]
pub struct ParseSpecError(pub String);

impl FromStr for EggSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|spec| spec.korean_name() == s || spec.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSpecError(s.to_string()))
    }
}

impl fmt::Display for EggSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.korean_name())
    }
}

/// Whether a price is derived automatically or pinned to an entered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceInputType {
    /// Recomputed from official price, packaging cost and DC.
    #[default]
    Auto,
    /// Pinned to a user-entered price.
    Manual,
}

/// A sellable egg product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Catalog code (e.g. "A001").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Size category as entered ("대란", "중란", ...).
    pub spec: String,
    /// Name of the [`Package`](crate::Package) this item ships in.
    pub packaging: String,
    /// Eggs per packaging unit (box).
    #[serde(default)]
    pub unit: Decimal,
    /// Declared price.
    #[serde(default)]
    pub price: Decimal,
    /// Pricing mode for the declared price.
    #[serde(default)]
    pub price_input_type: PriceInputType,
    /// Manually entered price override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_price: Option<Decimal>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Item {
    /// Create a new item with zero declared price in auto mode.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        spec: impl Into<String>,
        packaging: impl Into<String>,
        unit: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            spec: spec.into(),
            packaging: packaging.into(),
            unit,
            price: Decimal::ZERO,
            price_input_type: PriceInputType::Auto,
            manual_price: None,
            notes: None,
        }
    }

    /// Set the declared price.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Pin the item's price to a manually entered value.
    #[must_use]
    pub const fn with_manual_price(mut self, price: Decimal) -> Self {
        self.price_input_type = PriceInputType::Manual;
        self.manual_price = Some(price);
        self
    }

    /// The parsed size category, if the spec names a known one.
    #[must_use]
    pub fn egg_spec(&self) -> Option<EggSpec> {
        self.spec.parse().ok()
    }

    /// The manual price, but only when the item is in manual mode.
    #[must_use]
    pub fn pinned_price(&self) -> Option<Decimal> {
        match self.price_input_type {
            PriceInputType::Manual => self.manual_price,
            PriceInputType::Auto => None,
        }
    }
}
