//! Transaction list filtering and totals.

use eggledger_core::{Customer, NaiveDate, Transaction};
use rust_decimal::Decimal;

/// Filter for purchase and sale lists.
///
/// Every criterion is optional; an unset bound or name matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Inclusive lower date bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end: Option<NaiveDate>,
    /// Exact customer name.
    pub customer_name: Option<String>,
    /// Exact customer id.
    pub customer_id: Option<String>,
}

impl TransactionFilter {
    /// A filter that matches every transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to dates on or after `start`.
    #[must_use]
    pub const fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Restrict to dates on or before `end`.
    #[must_use]
    pub const fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Restrict to a customer by name. An empty name is ignored.
    #[must_use]
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.customer_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Restrict to a customer by id. An empty id is ignored.
    #[must_use]
    pub fn with_customer_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.customer_id = (!id.is_empty()).then_some(id);
        self
    }

    /// Whether a transaction passes the filter.
    ///
    /// The name criterion resolves the transaction's customer in
    /// `customers`; a transaction whose customer is gone never matches a
    /// name.
    #[must_use]
    pub fn matches(&self, txn: &Transaction, customers: &[Customer]) -> bool {
        if self.start.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| txn.date > end) {
            return false;
        }
        if let Some(id) = &self.customer_id {
            if &txn.customer_id != id {
                return false;
            }
        }
        if let Some(name) = &self.customer_name {
            let found = customers
                .iter()
                .find(|c| c.id == txn.customer_id)
                .is_some_and(|c| &c.name == name);
            if !found {
                return false;
            }
        }
        true
    }
}

/// Transactions passing `filter`, in their original order.
#[must_use]
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    customers: &[Customer],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t, customers))
        .collect()
}

/// Sum of a slip's line amounts.
#[must_use]
pub fn transaction_total(txn: &Transaction) -> Decimal {
    txn.lines.iter().map(|l| l.amount).sum()
}

/// Footer totals of a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTotals {
    /// Number of transactions.
    pub count: usize,
    /// Total eggs.
    pub eggs: Decimal,
    /// Total boxes.
    pub boxes: Decimal,
    /// Total plates.
    pub plates: Decimal,
    /// Total palettes.
    pub palettes: Decimal,
    /// Total amount.
    pub amount: Decimal,
}

impl ListTotals {
    /// Add one transaction.
    pub fn add(&mut self, txn: &Transaction) {
        self.count += 1;
        self.eggs += txn.total_eggs();
        self.boxes += txn.total_boxes();
        self.plates += txn.total_plates();
        self.palettes += txn.total_palettes();
        self.amount += transaction_total(txn);
    }
}

impl<'a> FromIterator<&'a Transaction> for ListTotals {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut totals = Self::default();
        for txn in iter {
            totals.add(txn);
        }
        totals
    }
}

/// Totals over `transactions`.
#[must_use]
pub fn list_totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> ListTotals {
    transactions.into_iter().collect()
}
