//! Property-based tests for eggledger-pricing.
//!
//! Run with: cargo test -p eggledger-pricing --test `property_tests`

use eggledger_core::{Customer, CustomerItemPrice, Item, NaiveDate, PriceInputType};
use eggledger_pricing::{sync_price_book, PriceInputs, PricingContext};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_inputs() -> impl Strategy<Value = PriceInputs> {
    (0i64..500i64, 0i64..100i64, 1i64..500i64).prop_map(|(off, pkg, unit)| {
        PriceInputs::new(Decimal::from(off), Decimal::from(pkg), Decimal::from(unit))
    })
}

fn arb_final_price() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(Decimal::from)
}

fn arb_ids(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(1u32..50u32, 0..max)
        .prop_map(|set| set.into_iter().map(|n| n.to_string()).collect())
}

fn customers(ids: &[String]) -> Vec<Customer> {
    ids.iter().map(|id| Customer::new(id, format!("거래처{id}"), "경기")).collect()
}

fn items(ids: &[String]) -> Vec<Item> {
    ids.iter()
        .map(|id| {
            Item::new(id, format!("A{id}"), "대란", "대란", "일반포장", Decimal::from(150))
        })
        .collect()
}

// ============================================================================
// DC inversion
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Pinning a final price, inverting the DC and re-pricing returns the pin
    #[test]
    fn prop_dc_inversion_idempotent(inputs in arb_inputs(), price in arb_final_price()) {
        let dc = inputs.invert_dc(price);
        let repriced = inputs.auto_price(PricingContext::PriceBook, dc);
        prop_assert!((repriced - price).abs() < Decimal::new(1, 10));
    }

    /// Inverting the DC of an auto price recovers that DC exactly
    #[test]
    fn prop_auto_price_inverts_to_dc(inputs in arb_inputs(), dc in 0i64..100i64) {
        let dc = Decimal::from(dc);
        let price = inputs.auto_price(PricingContext::Sale, dc);
        prop_assert_eq!(inputs.invert_dc(price), dc);
    }
}

// ============================================================================
// Price book sync
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Exactly one record per customer × item pair, pins preserved
    #[test]
    fn prop_price_book_complete(
        before_customers in arb_ids(6),
        before_items in arb_ids(6),
        after_customers in arb_ids(6),
        after_items in arb_ids(6),
    ) {
        let mut book = sync_price_book(
            &[],
            &customers(&before_customers),
            &items(&before_items),
            date(2025, 1, 1),
        );
        for (n, record) in book.iter_mut().enumerate() {
            if n % 2 == 0 {
                record.pin(Decimal::from(20_000 + n), Decimal::from(n));
            }
        }

        let next = sync_price_book(
            &book,
            &customers(&after_customers),
            &items(&after_items),
            date(2025, 2, 1),
        );

        prop_assert_eq!(next.len(), after_customers.len() * after_items.len());
        let pairs: HashSet<(&str, &str)> = next
            .iter()
            .map(|p| (p.customer_id.as_str(), p.item_id.as_str()))
            .collect();
        prop_assert_eq!(pairs.len(), next.len());

        for record in &next {
            let previous: Option<&CustomerItemPrice> = book
                .iter()
                .find(|p| p.is_pair(&record.customer_id, &record.item_id));
            match previous {
                Some(previous) => prop_assert_eq!(record, previous),
                None => {
                    prop_assert_eq!(record.price_input_type, PriceInputType::Auto);
                    prop_assert_eq!(record.final_price, Decimal::ZERO);
                    prop_assert_eq!(record.manual_price, None);
                    prop_assert_eq!(record.created, date(2025, 2, 1));
                }
            }
        }
    }
}
