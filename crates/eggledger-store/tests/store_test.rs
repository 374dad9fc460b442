//! Integration tests for the store crate.
//!
//! Each test drives the store the way the screens do: mutate a collection,
//! then read back the derived figures the recomputes produced.

use eggledger_core::{
    Customer, EggSpec, Item, NaiveDate, OfficialPrice, Payment, PriceEdit, PriceInputType,
    QuantityField, Transaction, TransactionKind,
};
use eggledger_pricing::EditMap;
use eggledger_reconcile::TransactionFilter;
use eggledger_store::{Snapshot, Store, StoreError, StoreOptions};
use eggledger_validate::ErrorCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn seeded() -> Store {
    Store::new(StoreOptions::new().with_today(date(2025, 2, 12)))
}

/// A priced slip for customer "1" with `boxes` of item "1".
fn slip(store: &Store, kind: TransactionKind, dc: Decimal, boxes: Decimal) -> Transaction {
    let mut txn = store.new_draft(kind, date(2025, 2, 12));
    txn.customer_id = "1".to_string();
    txn.lines[0].dc = dc;
    txn.lines[0].set_quantity(QuantityField::Box, boxes, dec!(150));
    store.reprice(&mut txn, kind);
    txn
}

fn validation_code(err: StoreError) -> ErrorCode {
    match err {
        StoreError::Validation(e) => e.code,
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn test_seed_builds_price_book_and_stock() {
    let store = seeded();
    assert_eq!(store.items().len(), 2);
    assert_eq!(store.price_book().len(), 2);
    assert_eq!(store.stock().len(), 2);
    assert!(store.stock().iter().all(|s| s.quantity_egg.is_zero()));
    assert_eq!(store.regions(), vec!["경기", "충청", "강원"]);
}

#[test]
fn test_sale_example() {
    let mut store = seeded();
    let sale = slip(&store, TransactionKind::Sale, dec!(20), dec!(2));

    assert_eq!(sale.lines[0].price, dec!(25500));
    assert_eq!(sale.lines[0].amount, dec!(51000));
    assert_eq!(sale.lines[0].quantity_egg, dec!(300));
    assert_eq!(sale.lines[0].quantity_plate, dec!(10));

    store.add_transaction(TransactionKind::Sale, sale).unwrap();

    let customer = store.customer("1").unwrap();
    assert_eq!(customer.total_transaction, dec!(51000));
    assert_eq!(customer.balance, dec!(51000));
    assert_eq!(store.stock()[0].quantity_egg, dec!(-300));
}

#[test]
fn test_purchase_example() {
    let mut store = seeded();
    let purchase = slip(&store, TransactionKind::Purchase, Decimal::ZERO, dec!(3));
    assert_eq!(purchase.lines[0].price, dec!(27000));
    assert_eq!(purchase.lines[0].amount, dec!(81000));

    store.add_transaction(TransactionKind::Purchase, purchase).unwrap();
    assert_eq!(store.stock()[0].quantity_egg, dec!(450));
    assert_eq!(store.customer("1").unwrap().total_transaction, Decimal::ZERO);
}

#[test]
fn test_draft_ids_follow_collection_length() {
    let mut store = seeded();
    let first = slip(&store, TransactionKind::Sale, Decimal::ZERO, dec!(1));
    assert_eq!(first.id, "1");
    assert_eq!(first.lines.len(), 2);
    store.add_transaction(TransactionKind::Sale, first).unwrap();
    assert_eq!(store.new_draft(TransactionKind::Sale, date(2025, 2, 13)).id, "2");
    assert_eq!(store.new_draft(TransactionKind::Purchase, date(2025, 2, 13)).id, "1");
}

#[test]
fn test_rejected_save_changes_nothing() {
    let mut store = seeded();
    let draft = store.new_draft(TransactionKind::Sale, date(2025, 2, 12));
    let before = store.snapshot().clone();

    let err = store.add_transaction(TransactionKind::Sale, draft).unwrap_err();

    assert_eq!(validation_code(err), ErrorCode::CustomerNotSelected);
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn test_unknown_slip_update_and_remove() {
    let mut store = seeded();
    let sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, dec!(1));
    let err = store.update_transaction(TransactionKind::Sale, sale).unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::UnknownTransaction);

    let err = store.remove_transaction(TransactionKind::Purchase, "7").unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::UnknownTransaction);
}

#[test]
fn test_update_and_remove_sale_reconcile() {
    let mut store = seeded();
    let sale = slip(&store, TransactionKind::Sale, dec!(20), dec!(2));
    store.add_transaction(TransactionKind::Sale, sale).unwrap();

    let bigger = {
        let mut txn = store.transactions(TransactionKind::Sale)[0].clone();
        txn.lines[0].set_quantity(QuantityField::Box, dec!(4), dec!(150));
        txn
    };
    store.update_transaction(TransactionKind::Sale, bigger).unwrap();
    assert_eq!(store.customer("1").unwrap().total_transaction, dec!(102000));
    assert_eq!(store.stock()[0].quantity_egg, dec!(-600));

    store.remove_transaction(TransactionKind::Sale, "1").unwrap();
    assert_eq!(store.customer("1").unwrap().total_transaction, Decimal::ZERO);
    assert_eq!(store.stock()[0].quantity_egg, Decimal::ZERO);
}

#[test]
fn test_ledger_balance_example() {
    let mut store = seeded();
    let mut sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, Decimal::ONE);
    sale.lines[0].set_price(dec!(7000000));
    store.add_transaction(TransactionKind::Sale, sale).unwrap();

    store
        .add_payment(
            Payment::new("1", date(2025, 2, 13), "1", dec!(2000000)).with_method("계좌이체"),
        )
        .unwrap();
    store
        .add_payment(Payment::new("2", date(2025, 2, 14), "1", dec!(500000)).with_sale("1"))
        .unwrap();

    let customer = store.customer("1").unwrap();
    assert_eq!(customer.total_transaction, dec!(7000000));
    assert_eq!(customer.balance, dec!(4500000));

    let history = store.payment_history("1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].balance_after, dec!(5000000));
    assert_eq!(history[1].balance_after, dec!(4500000));

    store.remove_payment("2").unwrap();
    assert_eq!(store.customer("1").unwrap().balance, dec!(5000000));
}

#[test]
fn test_invalid_payment_rejected() {
    let mut store = seeded();
    let err = store
        .add_payment(Payment::new("1", date(2025, 2, 13), "1", Decimal::ZERO))
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::PaymentAmountNotPositive);
    assert!(store.payments().is_empty());

    let err = store.remove_payment("1").unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::UnknownPayment);
}

#[test]
fn test_catalog_changes_sync_price_book() {
    let mut store = seeded();
    let mut edits = EditMap::new();
    edits.entry("1".to_string()).or_default().set_final_price(dec!(24000));
    store.save_price_edits("1", &edits).unwrap();

    store.add_item(Item::new("3", "A003", "특수 특란", "특란", "특수포장", dec!(150)));
    store.add_customer(Customer::new("2", "충청상회", "충청"));

    assert_eq!(store.price_book().len(), 6);
    assert_eq!(store.stock().len(), 3);
    let pinned = store
        .price_book()
        .iter()
        .find(|p| p.is_pair("1", "1"))
        .unwrap();
    assert_eq!(pinned.manual_price, Some(dec!(24000)));

    assert!(store.remove_item("2"));
    assert_eq!(store.price_book().len(), 4);
    assert!(store.remove_customer("2"));
    assert_eq!(store.price_book().len(), 2);
    assert!(!store.remove_customer("2"));
}

#[test]
fn test_price_book_edits_and_bulk() {
    let mut store = seeded();
    let mut edits = EditMap::new();
    edits.entry("1".to_string()).or_default().set_dc(dec!(20));
    edits.entry("2".to_string()).or_default().set_final_price(dec!(24000));
    *edits.entry("2".to_string()).or_default() = PriceEdit::Dc(dec!(10));

    let rows = store.price_book_rows("1", &edits).unwrap();
    assert_eq!(rows[0].final_price, dec!(25500));
    assert_eq!(rows[1].dc, dec!(10));

    assert_eq!(store.save_price_edits("1", &edits).unwrap(), 2);
    assert!(store
        .price_book()
        .iter()
        .all(|p| p.price_input_type == PriceInputType::Manual));

    assert_eq!(store.bulk_apply_dc("1", dec!(30)).unwrap(), 2);
    assert_eq!(store.price_book()[0].final_price, dec!(24000));
    // 중란 in special packaging: (170 - 30 + 30) × 150
    assert_eq!(store.price_book()[1].final_price, dec!(25500));

    store.bulk_apply_official("1", "충청").unwrap();
    assert_eq!(store.price_book()[0].base_price, dec!(28500));

    let err = store.bulk_apply_dc("9", dec!(30)).unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::UnknownCustomer);
}

#[test]
fn test_official_price_maintenance_reprices() {
    let mut store = seeded();
    store.add_official_price(
        OfficialPrice::new("경기", date(2025, 3, 1)).with_price(EggSpec::Large, dec!(190)),
    );
    assert_eq!(store.official_prices().len(), 4);

    let sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, Decimal::ONE);
    assert_eq!(sale.lines[0].price, dec!(30000));

    store.add_official_price(
        OfficialPrice::new("경기", date(2025, 3, 1)).with_price(EggSpec::Large, dec!(185)),
    );
    assert_eq!(store.official_prices().len(), 4);

    assert!(store.remove_official_price("경기", date(2025, 3, 1)));
    assert!(!store.remove_official_price("경기", date(2025, 3, 1)));
    let sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, Decimal::ONE);
    assert_eq!(sale.lines[0].price, dec!(28500));
}

#[test]
fn test_bulk_dc_on_slip_and_customer_default() {
    let store = seeded();
    let mut sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, dec!(2));
    let dc = store.default_bulk_dc("1");
    assert_eq!(dc, dec!(50));

    store.apply_bulk_dc(&mut sale, TransactionKind::Sale, dc);

    assert!(sale.lines.iter().all(|l| l.dc == dec!(50)));
    assert_eq!(sale.lines[0].price, dec!(21000));
    assert_eq!(sale.total_amount, dec!(42000));
}

#[test]
fn test_list_filters_and_totals() {
    let mut store = seeded();
    store.add_customer(Customer::new("2", "충청상회", "충청"));
    let first = slip(&store, TransactionKind::Sale, Decimal::ZERO, dec!(2));
    store.add_transaction(TransactionKind::Sale, first).unwrap();
    let mut second = slip(&store, TransactionKind::Sale, Decimal::ZERO, dec!(1));
    second.customer_id = "2".to_string();
    second.date = date(2025, 3, 1);
    store.add_transaction(TransactionKind::Sale, second).unwrap();

    let all = store.list_totals(TransactionKind::Sale, &TransactionFilter::new());
    assert_eq!(all.count, 2);
    assert_eq!(all.boxes, dec!(3));

    let by_name = TransactionFilter::new().with_customer_name("산들란");
    assert_eq!(store.list_transactions(TransactionKind::Sale, &by_name).len(), 1);

    let february = TransactionFilter::new().with_end(date(2025, 2, 28));
    let totals = store.list_totals(TransactionKind::Sale, &february);
    assert_eq!(totals.count, 1);
    assert_eq!(totals.eggs, dec!(300));
}

#[test]
fn test_stock_valuation_and_item_views() {
    let mut store = seeded();
    let purchase = slip(&store, TransactionKind::Purchase, Decimal::ZERO, dec!(20));
    store.add_transaction(TransactionKind::Purchase, purchase).unwrap();

    let rows = store.stock_valuation("경기");
    assert_eq!(rows[0].quantity_egg, dec!(3000));
    assert_eq!(rows[0].plates, dec!(100));
    assert_eq!(rows[0].value, dec!(570000));

    let view = store.item_price_view("1", "경기").unwrap();
    assert_eq!(view.auto_price, dec!(28500));
    assert!(store.item_price_view("9", "경기").is_none());

    assert_eq!(store.suggest_item_price(dec!(150), "대란", "일반포장"), Some(dec!(28500)));
    assert_eq!(store.suggest_item_unit("특수포장"), Some(dec!(150)));
}

#[test]
fn test_update_customer_keeps_derived_fields() {
    let mut store = seeded();
    let sale = slip(&store, TransactionKind::Sale, Decimal::ZERO, Decimal::ONE);
    store.add_transaction(TransactionKind::Sale, sale).unwrap();

    let edited = Customer::new("1", "산들란농장", "충청").with_discount(dec!(30));
    assert!(store.update_customer(edited));

    let customer = store.customer("1").unwrap();
    assert_eq!(customer.name, "산들란농장");
    assert_eq!(customer.total_transaction, dec!(28500));
    assert!(!store.update_customer(Customer::new("9", "없음", "")));
}

#[test]
fn test_snapshot_round_trip_through_file() {
    let mut store = seeded();
    let sale = slip(&store, TransactionKind::Sale, dec!(20), dec!(2));
    store.add_transaction(TransactionKind::Sale, sale).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eggledger.json");
    store.save_snapshot(&path).unwrap();

    let loaded = Store::load(&path, StoreOptions::new().with_today(date(2025, 2, 12))).unwrap();
    assert_eq!(loaded.snapshot(), store.snapshot());
}

#[test]
fn test_load_recomputes_derived_fields() {
    let mut snapshot = Snapshot::seed();
    let sale = Transaction::new("1", date(2025, 2, 12), "1").with_line(
        eggledger_core::LineItem::new("1")
            .with_price(dec!(1000))
            .with_quantity(QuantityField::Box, dec!(3), dec!(150)),
    );
    snapshot.sales.push(sale);
    snapshot.customers[0].balance = dec!(999);

    let store = Store::from_snapshot(snapshot, StoreOptions::new().without_seed());

    assert_eq!(store.customer("1").unwrap().balance, dec!(3000));
    assert_eq!(store.stock()[0].quantity_egg, dec!(-450));
    assert_eq!(store.price_book().len(), 2);
}

#[test]
fn test_load_recomputes_stale_slip_totals() {
    let mut snapshot = Snapshot::seed();
    let mut sale = Transaction::new("1", date(2025, 2, 12), "1").with_line(
        eggledger_core::LineItem::new("1")
            .with_price(dec!(25500))
            .with_quantity(QuantityField::Box, dec!(2), dec!(150)),
    );
    sale.total_amount = Decimal::ZERO;
    snapshot.sales.push(sale);
    let mut purchase = Transaction::new("1", date(2025, 2, 12), "1").with_line(
        eggledger_core::LineItem::new("1").with_quantity(QuantityField::Box, dec!(3), dec!(150)),
    );
    purchase.lines[0].price = dec!(27000);
    snapshot.purchases.push(purchase);

    let store = Store::from_snapshot(snapshot, StoreOptions::new().without_seed());

    assert_eq!(store.transactions(TransactionKind::Sale)[0].total_amount, dec!(51000));
    let purchase = &store.transactions(TransactionKind::Purchase)[0];
    assert_eq!(purchase.lines[0].amount, dec!(81000));
    assert_eq!(purchase.total_amount, dec!(81000));
    let customer = store.customer("1").unwrap();
    assert_eq!(customer.total_transaction, dec!(51000));
    assert_eq!(customer.balance, dec!(51000));
}

#[test]
fn test_saved_slip_amounts_follow_price() {
    let mut store = seeded();
    let mut sale = store.new_draft(TransactionKind::Sale, date(2025, 2, 12));
    sale.customer_id = "1".to_string();
    sale.lines[0].set_quantity(QuantityField::Box, dec!(2), dec!(150));
    sale.lines[0].price = dec!(25500);

    store.add_transaction(TransactionKind::Sale, sale).unwrap();
    assert_eq!(store.transactions(TransactionKind::Sale)[0].total_amount, dec!(51000));
    assert_eq!(store.customer("1").unwrap().total_transaction, dec!(51000));

    let mut edited = store.transactions(TransactionKind::Sale)[0].clone();
    edited.lines[0].price = dec!(30000);
    store.update_transaction(TransactionKind::Sale, edited).unwrap();
    assert_eq!(store.customer("1").unwrap().total_transaction, dec!(60000));
}

#[test]
fn test_options_and_snapshot_errors() {
    let dir = tempfile::tempdir().unwrap();
    let options_path = dir.path().join("options.json");
    std::fs::write(&options_path, r#"{"defaultRegion": "충청", "seed": false}"#).unwrap();

    let options = StoreOptions::from_path(&options_path).unwrap();
    assert_eq!(options.default_region, "충청");
    let store = Store::new(options);
    assert!(store.items().is_empty());

    let missing = Store::load(&dir.path().join("missing.json"), StoreOptions::new());
    assert!(matches!(missing, Err(StoreError::Io { .. })));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        Store::load(&broken, StoreOptions::new()),
        Err(StoreError::Json { .. })
    ));
}
