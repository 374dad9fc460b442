//! Reference data lookups.
//!
//! Resolves the inputs every price formula needs: the current official
//! price for a region and spec, and a packaging's cost and unit size. Missing
//! data is not an error. An unknown region, an unrecognised spec or an
//! unmatched packaging name all resolve to zero.

use eggledger_core::{Customer, EggSpec, Item, OfficialPrice, Package};
use rust_decimal::Decimal;

/// Region used when a customer has none.
pub const DEFAULT_REGION: &str = "경기";

/// The latest official price published for a region.
///
/// "Latest" is the record with the greatest date. When two records share
/// that date the one appearing later in the slice wins.
#[must_use]
pub fn latest_official_price<'a>(
    prices: &'a [OfficialPrice],
    region: &str,
) -> Option<&'a OfficialPrice> {
    prices
        .iter()
        .filter(|p| p.region == region)
        .max_by_key(|p| p.date)
}

/// The latest official price across every region.
#[must_use]
pub fn latest_official_price_any(prices: &[OfficialPrice]) -> Option<&OfficialPrice> {
    prices.iter().max_by_key(|p| p.date)
}

/// Official per-egg price for a spec string; zero when either is unknown.
#[must_use]
pub fn official_unit_price(price: Option<&OfficialPrice>, spec: &str) -> Decimal {
    match (price, spec.parse::<EggSpec>()) {
        (Some(price), Ok(spec)) => price.price_for(spec),
        _ => Decimal::ZERO,
    }
}

/// First package whose name matches exactly.
#[must_use]
pub fn find_package<'a>(packages: &'a [Package], name: &str) -> Option<&'a Package> {
    packages.iter().find(|p| p.name == name)
}

/// Per-egg packaging cost by packaging name; zero when unmatched.
#[must_use]
pub fn packaging_cost(packages: &[Package], name: &str) -> Decimal {
    find_package(packages, name).map_or(Decimal::ZERO, Package::cost_per_egg)
}

/// Distinct regions with official prices, in first-seen order.
#[must_use]
pub fn regions(prices: &[OfficialPrice]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for price in prices {
        if !seen.contains(&price.region.as_str()) {
            seen.push(&price.region);
        }
    }
    seen
}

/// The three figures a price formula is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceInputs {
    /// Official per-egg price.
    pub official: Decimal,
    /// Per-egg packaging cost.
    pub packaging_cost: Decimal,
    /// Eggs per packaging unit.
    pub unit: Decimal,
}

impl PriceInputs {
    /// Bundle explicit inputs.
    #[must_use]
    pub const fn new(official: Decimal, packaging_cost: Decimal, unit: Decimal) -> Self {
        Self {
            official,
            packaging_cost,
            unit,
        }
    }
}

/// Borrowed view over the reference collections.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceData<'a> {
    /// Item catalog.
    pub items: &'a [Item],
    /// Packaging options.
    pub packages: &'a [Package],
    /// Official price records.
    pub official_prices: &'a [OfficialPrice],
    /// Customers.
    pub customers: &'a [Customer],
    /// Region used when a customer has none.
    pub default_region: &'a str,
}

impl<'a> ReferenceData<'a> {
    /// Build a view with [`DEFAULT_REGION`] as fallback.
    #[must_use]
    pub const fn new(
        items: &'a [Item],
        packages: &'a [Package],
        official_prices: &'a [OfficialPrice],
        customers: &'a [Customer],
    ) -> Self {
        Self {
            items,
            packages,
            official_prices,
            customers,
            default_region: DEFAULT_REGION,
        }
    }

    /// Use a different fallback region.
    #[must_use]
    pub const fn with_default_region(mut self, region: &'a str) -> Self {
        self.default_region = region;
        self
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&'a Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Look up a customer by id.
    #[must_use]
    pub fn customer(&self, id: &str) -> Option<&'a Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Region to price a customer in.
    #[must_use]
    pub fn region_for(&self, customer_id: &str) -> &'a str {
        self.customer(customer_id)
            .map_or(self.default_region, |c| c.region_or(self.default_region))
    }

    /// Official per-egg price for an item's spec in a region.
    #[must_use]
    pub fn official_for(&self, item: &Item, region: &str) -> Decimal {
        let latest = latest_official_price(self.official_prices, region);
        if latest.is_none() {
            tracing::debug!(region, "no official price for region, using 0");
        }
        official_unit_price(latest, &item.spec)
    }

    /// Inputs for pricing a transaction line.
    ///
    /// Slips size boxes by the item's own unit (zero when unset).
    #[must_use]
    pub fn line_inputs(&self, item: &Item, region: &str) -> PriceInputs {
        PriceInputs::new(
            self.official_for(item, region),
            self.packaging_cost_for(item),
            item.unit,
        )
    }

    /// Inputs for pricing a price-book row or a stock valuation.
    ///
    /// Uses the package's unit size when one was entered, else the item's
    /// unit when non-zero, else 1.
    #[must_use]
    pub fn book_inputs(&self, item: &Item, region: &str) -> PriceInputs {
        PriceInputs::new(
            self.official_for(item, region),
            self.packaging_cost_for(item),
            self.book_unit(item),
        )
    }

    /// Packaging cost for an item's packaging name.
    #[must_use]
    pub fn packaging_cost_for(&self, item: &Item) -> Decimal {
        let pkg = find_package(self.packages, &item.packaging);
        if pkg.is_none() {
            tracing::debug!(
                item = %item.id,
                packaging = %item.packaging,
                "packaging not found, using 0"
            );
        }
        pkg.map_or(Decimal::ZERO, Package::cost_per_egg)
    }

    fn book_unit(&self, item: &Item) -> Decimal {
        match find_package(self.packages, &item.packaging) {
            Some(pkg) if pkg.has_unit() => pkg.unit_size(),
            _ if !item.unit.is_zero() => item.unit,
            _ => Decimal::ONE,
        }
    }
}
