//! Official regional reference prices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::EggSpec;

/// Official market price per egg for each spec, published for a region on a date.
///
/// Records are keyed by `(region, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialPrice {
    /// Region the price applies to (e.g. "경기").
    pub region: String,
    /// Publication date.
    pub date: NaiveDate,
    /// 왕란 price.
    pub king: Decimal,
    /// 특란 price.
    pub extra_large: Decimal,
    /// 대란 price.
    pub large: Decimal,
    /// 중란 price.
    pub medium: Decimal,
    /// 소란 price.
    pub small: Decimal,
}

impl OfficialPrice {
    /// Create a record with every spec priced at zero.
    #[must_use]
    pub fn new(region: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            region: region.into(),
            date,
            king: Decimal::ZERO,
            extra_large: Decimal::ZERO,
            large: Decimal::ZERO,
            medium: Decimal::ZERO,
            small: Decimal::ZERO,
        }
    }

    /// Set the price for one spec.
    #[must_use]
    pub fn with_price(mut self, spec: EggSpec, price: Decimal) -> Self {
        *self.price_mut(spec) = price;
        self
    }

    /// Set all five prices, largest spec first.
    #[must_use]
    pub const fn with_prices(mut self, prices: [Decimal; 5]) -> Self {
        let [king, extra_large, large, medium, small] = prices;
        self.king = king;
        self.extra_large = extra_large;
        self.large = large;
        self.medium = medium;
        self.small = small;
        self
    }

    /// The price for a spec.
    #[must_use]
    pub const fn price_for(&self, spec: EggSpec) -> Decimal {
        match spec {
            EggSpec::King => self.king,
            EggSpec::ExtraLarge => self.extra_large,
            EggSpec::Large => self.large,
            EggSpec::Medium => self.medium,
            EggSpec::Small => self.small,
        }
    }

    fn price_mut(&mut self, spec: EggSpec) -> &mut Decimal {
        match spec {
            EggSpec::King => &mut self.king,
            EggSpec::ExtraLarge => &mut self.extra_large,
            EggSpec::Large => &mut self.large,
            EggSpec::Medium => &mut self.medium,
            EggSpec::Small => &mut self.small,
        }
    }

    /// Whether this record has the given `(region, date)` key.
    #[must_use]
    pub fn has_key(&self, region: &str, date: NaiveDate) -> bool {
        self.region == region && self.date == date
    }
}
