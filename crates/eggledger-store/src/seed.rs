//! Built-in starting data.

use eggledger_core::{Customer, EggSpec, Item, NaiveDate, OfficialPrice, Package};
use rust_decimal::Decimal;

use crate::Snapshot;

const SEED_REGIONS: [&str; 3] = ["경기", "충청", "강원"];

/// Two catalog items.
#[must_use]
pub fn seed_items() -> Vec<Item> {
    let unit = Decimal::from(150);
    vec![
        Item::new("1", "A001", "일반 대란", EggSpec::Large.korean_name(), "일반포장", unit),
        Item::new("2", "A002", "일반 중란", EggSpec::Medium.korean_name(), "특수포장", unit),
    ]
}

/// Standard and special packaging.
#[must_use]
pub fn seed_packages() -> Vec<Package> {
    vec![
        Package::new("1", "일반포장", "150", "10"),
        Package::new("2", "특수포장", "150", "30"),
    ]
}

/// One official price sheet per seed region.
#[must_use]
pub fn seed_official_prices() -> Vec<OfficialPrice> {
    let prices = [200, 190, 180, 170, 160].map(Decimal::from);
    NaiveDate::from_ymd_opt(2025, 2, 12)
        .map(|date| {
            SEED_REGIONS
                .iter()
                .map(|region| OfficialPrice::new(*region, date).with_prices(prices))
                .collect()
        })
        .unwrap_or_default()
}

/// One customer.
#[must_use]
pub fn seed_customers() -> Vec<Customer> {
    vec![Customer::new("1", "산들란", "경기").with_discount(Decimal::from(50))]
}

impl Snapshot {
    /// Reference data only; no transactions.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            items: seed_items(),
            packages: seed_packages(),
            official_prices: seed_official_prices(),
            customers: seed_customers(),
            ..Self::default()
        }
    }
}
