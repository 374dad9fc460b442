//! Customer ledger reconciliation.
//!
//! A customer's `total_transaction` and `balance` are derived from sales and
//! payments. Two recomputes exist and are kept separate:
//!
//! - [`reconcile_on_sales`] runs when the sales collection changes and
//!   refreshes both fields.
//! - [`reconcile_on_payments`] runs when the payments collection changes and
//!   refreshes `balance` only, from the last sales-derived total.

use eggledger_core::{Customer, Payment, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

fn sum_by_customer<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&'a T) -> (&'a str, Decimal),
) -> HashMap<&'a str, Decimal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for record in records {
        let (customer_id, amount) = key(record);
        *totals.entry(customer_id).or_default() += amount;
    }
    totals
}

/// Sum of sale totals for one customer.
#[must_use]
pub fn sales_total(sales: &[Transaction], customer_id: &str) -> Decimal {
    sales
        .iter()
        .filter(|s| s.customer_id == customer_id)
        .map(|s| s.total_amount)
        .sum()
}

/// Sum of payments received from one customer.
#[must_use]
pub fn payments_total(payments: &[Payment], customer_id: &str) -> Decimal {
    payments
        .iter()
        .filter(|p| p.customer_id == customer_id)
        .map(|p| p.amount)
        .sum()
}

/// Recompute `total_transaction` and `balance` for every customer.
pub fn reconcile_on_sales(customers: &mut [Customer], sales: &[Transaction], payments: &[Payment]) {
    let sold = sum_by_customer(sales, |s| (s.customer_id.as_str(), s.total_amount));
    let paid = sum_by_customer(payments, |p| (p.customer_id.as_str(), p.amount));

    for customer in customers.iter_mut() {
        let total = sold.get(customer.id.as_str()).copied().unwrap_or_default();
        let received = paid.get(customer.id.as_str()).copied().unwrap_or_default();
        customer.total_transaction = total;
        customer.balance = total - received;
    }
    tracing::debug!(
        customers = customers.len(),
        sales = sales.len(),
        payments = payments.len(),
        "ledger reconciled from sales"
    );
}

/// Recompute `balance` for every customer, keeping `total_transaction`.
pub fn reconcile_on_payments(customers: &mut [Customer], payments: &[Payment]) {
    let paid = sum_by_customer(payments, |p| (p.customer_id.as_str(), p.amount));

    for customer in customers.iter_mut() {
        let received = paid.get(customer.id.as_str()).copied().unwrap_or_default();
        customer.balance = customer.total_transaction - received;
    }
    tracing::debug!(
        customers = customers.len(),
        payments = payments.len(),
        "ledger reconciled from payments"
    );
}

/// One row of a customer's payment history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHistoryEntry<'a> {
    /// The payment.
    pub payment: &'a Payment,
    /// Balance left after this payment.
    pub balance_after: Decimal,
}

/// A customer's payments in date order with the balance after each.
///
/// The running balance starts from the customer's `total_transaction`.
/// Payments on the same date keep their collection order.
#[must_use]
pub fn payment_history<'a>(
    customer: &Customer,
    payments: &'a [Payment],
) -> Vec<PaymentHistoryEntry<'a>> {
    let mut own: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.customer_id == customer.id)
        .collect();
    own.sort_by_key(|p| p.date);

    let mut balance = customer.total_transaction;
    own.into_iter()
        .map(|payment| {
            balance -= payment.amount;
            PaymentHistoryEntry {
                payment,
                balance_after: balance,
            }
        })
        .collect()
}
