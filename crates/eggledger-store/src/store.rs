//! The store and its recompute triggers.

use eggledger_core::{
    Customer, CustomerItemPrice, Item, NaiveDate, OfficialPrice, Package, Payment, Stock,
    Transaction, TransactionKind,
};
use eggledger_pricing::{
    apply_bulk_dc, default_bulk_dc, item_price_view, price_book_rows, regions,
    reprice_transaction, suggest_item_price, EditMap, ItemPriceView, PriceBookRow,
    PricingContext, ReferenceData,
};
use eggledger_reconcile::{
    filter_transactions, list_totals, payment_history, reconcile_on_payments, reconcile_on_sales,
    recompute_stock, stock_valuation, ListTotals, PaymentHistoryEntry, StockValuation,
    TransactionFilter,
};
use eggledger_validate::{
    ensure_valid, validate_known_customer, validate_known_payment, validate_known_transaction,
    validate_payment, validate_transaction,
};
use rust_decimal::Decimal;
use std::path::Path;

use crate::{Snapshot, StoreError, StoreOptions};

const fn pricing_context(kind: TransactionKind) -> PricingContext {
    match kind {
        TransactionKind::Purchase => PricingContext::Purchase,
        TransactionKind::Sale => PricingContext::Sale,
    }
}

/// In-memory repository for every eggledger collection.
#[derive(Debug, Clone)]
pub struct Store {
    options: StoreOptions,
    data: Snapshot,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl Store {
    /// Create a store, seeded unless the options say otherwise.
    #[must_use]
    pub fn new(options: StoreOptions) -> Self {
        let data = if options.seed {
            Snapshot::seed()
        } else {
            Snapshot::default()
        };
        Self::from_snapshot(data, options)
    }

    /// Create a store over existing data and run every recompute.
    #[must_use]
    pub fn from_snapshot(data: Snapshot, options: StoreOptions) -> Self {
        let mut store = Self { options, data };
        for txn in store.data.purchases.iter_mut().chain(&mut store.data.sales) {
            txn.recompute();
        }
        store.sync_price_book();
        store.recompute_stock();
        store.reconcile_sales();
        tracing::info!(
            items = store.data.items.len(),
            customers = store.data.customers.len(),
            purchases = store.data.purchases.len(),
            sales = store.data.sales.len(),
            payments = store.data.payments.len(),
            "store loaded"
        );
        store
    }

    /// Load a snapshot file.
    pub fn load(path: &Path, options: StoreOptions) -> Result<Self, StoreError> {
        let data = Snapshot::load(path)?;
        Ok(Self::from_snapshot(data, options))
    }

    /// Write the current state to a snapshot file.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        self.data.save(path)?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// The current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.data
    }

    /// Consume the store, returning its state.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.data
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// A borrowed view over the reference collections.
    #[must_use]
    pub fn references(&self) -> ReferenceData<'_> {
        ReferenceData::new(
            &self.data.items,
            &self.data.packages,
            &self.data.official_prices,
            &self.data.customers,
        )
        .with_default_region(&self.options.default_region)
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    fn sync_price_book(&mut self) {
        let today = self.options.today();
        self.data.customer_item_prices = eggledger_pricing::sync_price_book(
            &self.data.customer_item_prices,
            &self.data.customers,
            &self.data.items,
            today,
        );
        tracing::debug!(
            records = self.data.customer_item_prices.len(),
            "price book synced"
        );
    }

    fn recompute_stock(&mut self) {
        self.data.stock = recompute_stock(&self.data.items, &self.data.purchases, &self.data.sales);
        tracing::debug!(items = self.data.stock.len(), "stock recomputed");
    }

    fn reconcile_sales(&mut self) {
        reconcile_on_sales(&mut self.data.customers, &self.data.sales, &self.data.payments);
    }

    fn reconcile_payments(&mut self) {
        reconcile_on_payments(&mut self.data.customers, &self.data.payments);
    }

    fn catalog_changed(&mut self) {
        self.sync_price_book();
        self.recompute_stock();
    }

    fn transactions_changed(&mut self) {
        self.recompute_stock();
        self.reconcile_sales();
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// The item catalog.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.data.items
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.data.items.iter().find(|i| i.id == id)
    }

    /// Add an item to the catalog.
    pub fn add_item(&mut self, item: Item) {
        tracing::info!(item = %item.id, name = %item.name, "item added");
        self.data.items.push(item);
        self.catalog_changed();
    }

    /// Replace the item with the same id. Returns whether one was found.
    pub fn update_item(&mut self, item: Item) -> bool {
        let Some(slot) = self.data.items.iter_mut().find(|i| i.id == item.id) else {
            tracing::warn!(item = %item.id, "update for unknown item ignored");
            return false;
        };
        *slot = item;
        self.catalog_changed();
        true
    }

    /// Remove an item. Slips referring to it are kept.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.data.items.len();
        self.data.items.retain(|i| i.id != id);
        let removed = self.data.items.len() != before;
        if removed {
            tracing::info!(item = id, "item removed");
            self.catalog_changed();
        }
        removed
    }

    /// Catalog pricing for one item in a region.
    #[must_use]
    pub fn item_price_view(&self, item_id: &str, region: &str) -> Option<ItemPriceView> {
        let refs = self.references();
        refs.item(item_id)
            .map(|item| item_price_view(item, region, &refs))
    }

    /// Suggested declared price for an item being edited.
    #[must_use]
    pub fn suggest_item_price(
        &self,
        unit: Decimal,
        spec: &str,
        packaging: &str,
    ) -> Option<Decimal> {
        suggest_item_price(
            unit,
            spec,
            packaging,
            &self.data.packages,
            &self.data.official_prices,
        )
    }

    /// Unit size suggested for a packaging choice.
    #[must_use]
    pub fn suggest_item_unit(&self, packaging: &str) -> Option<Decimal> {
        eggledger_pricing::suggest_item_unit(&self.data.packages, packaging)
    }

    // ------------------------------------------------------------------
    // Packages
    // ------------------------------------------------------------------

    /// Packaging options.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.data.packages
    }

    /// Add a packaging option.
    pub fn add_package(&mut self, package: Package) {
        self.data.packages.push(package);
    }

    /// Replace the package with the same id. Returns whether one was found.
    pub fn update_package(&mut self, package: Package) -> bool {
        match self.data.packages.iter_mut().find(|p| p.id == package.id) {
            Some(slot) => {
                *slot = package;
                true
            }
            None => false,
        }
    }

    /// Remove a packaging option.
    pub fn remove_package(&mut self, id: &str) -> bool {
        let before = self.data.packages.len();
        self.data.packages.retain(|p| p.id != id);
        self.data.packages.len() != before
    }

    // ------------------------------------------------------------------
    // Official prices
    // ------------------------------------------------------------------

    /// Official price records.
    #[must_use]
    pub fn official_prices(&self) -> &[OfficialPrice] {
        &self.data.official_prices
    }

    /// Regions with official prices, in first-seen order.
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        regions(&self.data.official_prices)
    }

    /// Record an official price sheet.
    ///
    /// A sheet with the same region and date is replaced.
    pub fn add_official_price(&mut self, price: OfficialPrice) {
        tracing::info!(region = %price.region, date = %price.date, "official price recorded");
        if !self.update_official_price(price.clone()) {
            self.data.official_prices.push(price);
        }
    }

    /// Replace the sheet with the same region and date. Returns whether one was found.
    pub fn update_official_price(&mut self, price: OfficialPrice) -> bool {
        match self
            .data
            .official_prices
            .iter_mut()
            .find(|p| p.has_key(&price.region, price.date))
        {
            Some(slot) => {
                *slot = price;
                true
            }
            None => false,
        }
    }

    /// Remove the sheet for a region and date.
    pub fn remove_official_price(&mut self, region: &str, date: NaiveDate) -> bool {
        let before = self.data.official_prices.len();
        self.data.official_prices.retain(|p| !p.has_key(region, date));
        self.data.official_prices.len() != before
    }

    // ------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------

    /// Customers, with derived balance fields current.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.data.customers
    }

    /// Look up a customer.
    #[must_use]
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.data.customers.iter().find(|c| c.id == id)
    }

    /// Add a customer.
    pub fn add_customer(&mut self, customer: Customer) {
        tracing::info!(customer = %customer.id, name = %customer.name, "customer added");
        self.data.customers.push(customer);
        self.catalog_changed();
        self.reconcile_sales();
    }

    /// Replace the customer with the same id. Returns whether one was found.
    ///
    /// Balance, profit and total transaction are derived and carried over
    /// from the stored record.
    pub fn update_customer(&mut self, mut customer: Customer) -> bool {
        let Some(slot) = self.data.customers.iter_mut().find(|c| c.id == customer.id) else {
            tracing::warn!(customer = %customer.id, "update for unknown customer ignored");
            return false;
        };
        customer.balance = slot.balance;
        customer.profit = slot.profit;
        customer.total_transaction = slot.total_transaction;
        *slot = customer;
        self.catalog_changed();
        true
    }

    /// Remove a customer. Slips and payments referring to it are kept.
    pub fn remove_customer(&mut self, id: &str) -> bool {
        let before = self.data.customers.len();
        self.data.customers.retain(|c| c.id != id);
        let removed = self.data.customers.len() != before;
        if removed {
            tracing::info!(customer = id, "customer removed");
            self.catalog_changed();
        }
        removed
    }

    // ------------------------------------------------------------------
    // Purchases and sales
    // ------------------------------------------------------------------

    /// Purchase or sale slips.
    #[must_use]
    pub fn transactions(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Purchase => &self.data.purchases,
            TransactionKind::Sale => &self.data.sales,
        }
    }

    fn transactions_mut(&mut self, kind: TransactionKind) -> &mut Vec<Transaction> {
        match kind {
            TransactionKind::Purchase => &mut self.data.purchases,
            TransactionKind::Sale => &mut self.data.sales,
        }
    }

    /// A new ("신규") slip with one zeroed line per catalog item.
    ///
    /// Its id is one more than the number of slips of that kind.
    #[must_use]
    pub fn new_draft(&self, kind: TransactionKind, date: NaiveDate) -> Transaction {
        let id = self.transactions(kind).len() + 1;
        Transaction::draft(id.to_string(), date, &self.data.items)
    }

    /// Re-price every line of a slip from the current reference data.
    pub fn reprice(&self, txn: &mut Transaction, kind: TransactionKind) {
        reprice_transaction(txn, &self.references(), pricing_context(kind));
    }

    /// Apply one DC to every line of a slip. Lines stay automatically priced.
    pub fn apply_bulk_dc(&self, txn: &mut Transaction, kind: TransactionKind, dc: Decimal) {
        apply_bulk_dc(txn, dc, &self.references(), pricing_context(kind));
    }

    /// The DC to pre-fill for bulk apply once a customer is picked.
    #[must_use]
    pub fn default_bulk_dc(&self, customer_id: &str) -> Decimal {
        default_bulk_dc(&self.references(), customer_id)
    }

    /// Save a new slip.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        mut txn: Transaction,
    ) -> Result<(), StoreError> {
        ensure_valid(validate_transaction(&txn, kind))?;
        txn.recompute();
        tracing::info!(%kind, id = %txn.id, total = %txn.total_amount, "slip added");
        self.transactions_mut(kind).push(txn);
        self.transactions_changed();
        Ok(())
    }

    /// Replace the slip with the same id.
    pub fn update_transaction(
        &mut self,
        kind: TransactionKind,
        mut txn: Transaction,
    ) -> Result<(), StoreError> {
        validate_known_transaction(self.transactions(kind), &txn.id, kind)?;
        ensure_valid(validate_transaction(&txn, kind))?;
        txn.recompute();
        if let Some(slot) = self.transactions_mut(kind).iter_mut().find(|t| t.id == txn.id) {
            *slot = txn;
        }
        self.transactions_changed();
        Ok(())
    }

    /// Delete a slip by id.
    pub fn remove_transaction(
        &mut self,
        kind: TransactionKind,
        id: &str,
    ) -> Result<(), StoreError> {
        validate_known_transaction(self.transactions(kind), id, kind)?;
        self.transactions_mut(kind).retain(|t| t.id != id);
        tracing::info!(%kind, id, "slip removed");
        self.transactions_changed();
        Ok(())
    }

    /// Slips of one kind passing a filter.
    #[must_use]
    pub fn list_transactions(
        &self,
        kind: TransactionKind,
        filter: &TransactionFilter,
    ) -> Vec<&Transaction> {
        filter_transactions(self.transactions(kind), filter, &self.data.customers)
    }

    /// Footer totals for a filtered list.
    #[must_use]
    pub fn list_totals(&self, kind: TransactionKind, filter: &TransactionFilter) -> ListTotals {
        list_totals(self.list_transactions(kind, filter))
    }

    // ------------------------------------------------------------------
    // Stock
    // ------------------------------------------------------------------

    /// Per-item stock.
    #[must_use]
    pub fn stock(&self) -> &[Stock] {
        &self.data.stock
    }

    /// Stock valued at the latest official price of a region.
    #[must_use]
    pub fn stock_valuation(&self, region: &str) -> Vec<StockValuation> {
        stock_valuation(&self.data.stock, &self.references(), region)
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Payments received.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        &self.data.payments
    }

    /// A customer's payments with the running balance.
    ///
    /// Empty when the customer does not exist.
    #[must_use]
    pub fn payment_history(&self, customer_id: &str) -> Vec<PaymentHistoryEntry<'_>> {
        self.customer(customer_id)
            .map(|c| payment_history(c, &self.data.payments))
            .unwrap_or_default()
    }

    /// Record a payment.
    pub fn add_payment(&mut self, payment: Payment) -> Result<(), StoreError> {
        ensure_valid(validate_payment(&payment))?;
        tracing::info!(
            id = %payment.id,
            customer = %payment.customer_id,
            amount = %payment.amount,
            "payment added"
        );
        self.data.payments.push(payment);
        self.reconcile_payments();
        Ok(())
    }

    /// Replace the payment with the same id.
    pub fn update_payment(&mut self, payment: Payment) -> Result<(), StoreError> {
        validate_known_payment(&self.data.payments, &payment.id)?;
        ensure_valid(validate_payment(&payment))?;
        if let Some(slot) = self.data.payments.iter_mut().find(|p| p.id == payment.id) {
            *slot = payment;
        }
        self.reconcile_payments();
        Ok(())
    }

    /// Delete a payment by id.
    pub fn remove_payment(&mut self, id: &str) -> Result<(), StoreError> {
        validate_known_payment(&self.data.payments, id)?;
        self.data.payments.retain(|p| p.id != id);
        tracing::info!(id, "payment removed");
        self.reconcile_payments();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Price book
    // ------------------------------------------------------------------

    /// The whole price book.
    #[must_use]
    pub fn price_book(&self) -> &[CustomerItemPrice] {
        &self.data.customer_item_prices
    }

    /// One customer's price-book rows with pending edits applied.
    pub fn price_book_rows(
        &self,
        customer_id: &str,
        edits: &EditMap,
    ) -> Result<Vec<PriceBookRow>, StoreError> {
        validate_known_customer(&self.data.customers, customer_id)?;
        Ok(price_book_rows(
            &self.data.customer_item_prices,
            customer_id,
            edits,
            &self.references(),
        ))
    }

    fn edit_price_book<R>(
        &mut self,
        edit: impl FnOnce(&mut [CustomerItemPrice], &ReferenceData<'_>, NaiveDate) -> R,
    ) -> R {
        let mut book = std::mem::take(&mut self.data.customer_item_prices);
        let result = edit(&mut book, &self.references(), self.options.today());
        self.data.customer_item_prices = book;
        result
    }

    /// Commit pending edits for a customer. Returns the number of rows changed.
    pub fn save_price_edits(
        &mut self,
        customer_id: &str,
        edits: &EditMap,
    ) -> Result<usize, StoreError> {
        validate_known_customer(&self.data.customers, customer_id)?;
        let updated = self.edit_price_book(|book, refs, today| {
            eggledger_pricing::save_price_edits(book, customer_id, edits, refs, today)
        });
        tracing::info!(customer = customer_id, updated, "price edits saved");
        Ok(updated)
    }

    /// Pin every row of a customer at one DC.
    pub fn bulk_apply_dc(&mut self, customer_id: &str, dc: Decimal) -> Result<usize, StoreError> {
        validate_known_customer(&self.data.customers, customer_id)?;
        let updated = self.edit_price_book(|book, refs, today| {
            eggledger_pricing::bulk_apply_dc(book, customer_id, dc, refs, today)
        });
        tracing::info!(customer = customer_id, %dc, updated, "bulk DC applied to price book");
        Ok(updated)
    }

    /// Re-price every row of a customer from a region's latest official price.
    pub fn bulk_apply_official(
        &mut self,
        customer_id: &str,
        region: &str,
    ) -> Result<usize, StoreError> {
        validate_known_customer(&self.data.customers, customer_id)?;
        let updated = self.edit_price_book(|book, refs, today| {
            eggledger_pricing::bulk_apply_official(book, customer_id, region, refs, today)
        });
        tracing::info!(
            customer = customer_id,
            region,
            updated,
            "official price applied to price book"
        );
        Ok(updated)
    }
}
