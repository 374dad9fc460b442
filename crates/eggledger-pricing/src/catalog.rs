//! Item catalog price view and item form suggestions.

use eggledger_core::{mul_or_zero, Item, OfficialPrice, Package};
use rust_decimal::Decimal;

use crate::reference::{
    find_package, latest_official_price_any, official_unit_price, packaging_cost, ReferenceData,
};

/// Catalog row pricing for one item in a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPriceView {
    /// `(official + packaging) × unit`.
    pub auto_price: Decimal,
    /// The pinned manual price, else the auto price.
    pub display_price: Decimal,
    /// `display_price − auto_price` for pinned items, else zero.
    pub price_diff: Decimal,
    /// Whether `display_price` is a pinned manual price.
    pub pinned: bool,
}

/// Price an item for the catalog table in `region`.
#[must_use]
pub fn item_price_view(item: &Item, region: &str, refs: &ReferenceData<'_>) -> ItemPriceView {
    let auto_price = refs.book_inputs(item, region).base_price();
    match item.pinned_price() {
        Some(manual) => ItemPriceView {
            auto_price,
            display_price: manual,
            price_diff: manual - auto_price,
            pinned: true,
        },
        None => ItemPriceView {
            auto_price,
            display_price: auto_price,
            price_diff: Decimal::ZERO,
            pinned: false,
        },
    }
}

/// Suggested declared price for an item being edited.
///
/// Needs a unit, a spec and a packaging name. Uses the latest official
/// price across all regions. Returns `None` unless the result is positive.
#[must_use]
pub fn suggest_item_price(
    unit: Decimal,
    spec: &str,
    packaging: &str,
    packages: &[Package],
    official_prices: &[OfficialPrice],
) -> Option<Decimal> {
    if unit.is_zero() || spec.is_empty() || packaging.is_empty() {
        return None;
    }
    let official = official_unit_price(latest_official_price_any(official_prices), spec);
    let price = mul_or_zero(unit, official + packaging_cost(packages, packaging));
    (price > Decimal::ZERO).then_some(price)
}

/// Unit size suggested when a packaging is picked on the item form.
#[must_use]
pub fn suggest_item_unit(packages: &[Package], packaging: &str) -> Option<Decimal> {
    find_package(packages, packaging)
        .filter(|p| p.has_unit())
        .map(Package::unit_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eggledger_core::{EggSpec, NaiveDate};
    use rust_decimal_macros::dec;

    fn fixtures() -> (Vec<Package>, Vec<OfficialPrice>) {
        let packages = vec![
            Package::new("1", "일반포장", "150", "10"),
            Package::new("2", "특수포장", "", "30"),
        ];
        let prices = vec![
            OfficialPrice::new("경기", NaiveDate::from_ymd_opt(2025, 2, 12).unwrap())
                .with_price(EggSpec::Large, dec!(180)),
            OfficialPrice::new("충청", NaiveDate::from_ymd_opt(2025, 2, 13).unwrap())
                .with_price(EggSpec::Large, dec!(190)),
        ];
        (packages, prices)
    }

    #[test]
    fn test_auto_item_view() {
        let (packages, prices) = fixtures();
        let items =
            vec![Item::new("1", "A001", "일반 대란", "대란", "일반포장", dec!(150))];
        let refs = ReferenceData::new(&items, &packages, &prices, &[]);
        let view = item_price_view(&items[0], "경기", &refs);
        assert_eq!(view.auto_price, dec!(28500));
        assert_eq!(view.display_price, dec!(28500));
        assert_eq!(view.price_diff, Decimal::ZERO);
        assert!(!view.pinned);
    }

    #[test]
    fn test_manual_item_view() {
        let (packages, prices) = fixtures();
        let items = vec![
            Item::new("1", "A001", "일반 대란", "대란", "일반포장", dec!(150))
                .with_manual_price(dec!(30000)),
        ];
        let refs = ReferenceData::new(&items, &packages, &prices, &[]);
        let view = item_price_view(&items[0], "경기", &refs);
        assert_eq!(view.display_price, dec!(30000));
        assert_eq!(view.price_diff, dec!(1500));
        assert!(view.pinned);
    }

    #[test]
    fn test_suggest_price_uses_latest_any_region() {
        let (packages, prices) = fixtures();
        assert_eq!(
            suggest_item_price(dec!(150), "대란", "일반포장", &packages, &prices),
            Some(dec!(30000))
        );
        assert_eq!(
            suggest_item_price(Decimal::ZERO, "대란", "일반포장", &packages, &prices),
            None
        );
        assert_eq!(suggest_item_price(dec!(150), "왕란", "", &packages, &prices), None);
        assert_eq!(suggest_item_price(dec!(150), "왕란", "없음", &[], &prices), None);
    }

    #[test]
    fn test_suggest_unit() {
        let (packages, _) = fixtures();
        assert_eq!(suggest_item_unit(&packages, "일반포장"), Some(dec!(150)));
        assert_eq!(suggest_item_unit(&packages, "특수포장"), None);
        assert_eq!(suggest_item_unit(&packages, "없음"), None);
    }
}
