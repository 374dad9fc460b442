//! Save-time validation for eggledger.
//!
//! Computations never fail: missing reference data prices as zero and
//! unparsable input coerces to zero. The only failures surfaced to callers
//! are records a user tries to save without the required selections. A save
//! that fails validation must not change any state.
//!
//! # Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | V1001 | Slip saved without a customer |
//! | V1002 | Slip has no lines |
//! | V1003 | Slip id not found on update or remove |
//! | V2001 | Payment saved without a customer |
//! | V2002 | Payment amount not positive |
//! | V2003 | Payment id not found on update or remove |
//! | V3001 | Unknown customer for a price-book operation |
//!
//! # Example
//!
//! ```
//! use eggledger_core::{NaiveDate, Transaction, TransactionKind};
//! use eggledger_validate::{validate_transaction, ErrorCode};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 2, 12).unwrap();
//! let draft = Transaction::draft("1", date, &[]);
//!
//! let errors = validate_transaction(&draft, TransactionKind::Sale);
//! assert_eq!(errors[0].code, ErrorCode::CustomerNotSelected);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::NaiveDate;
use eggledger_core::{Customer, Payment, Transaction, TransactionKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // === Slip Errors (V1xxx) ===
    /// V1001: No customer selected on a purchase or sale.
    CustomerNotSelected,
    /// V1002: Slip has no lines.
    NoLineItems,
    /// V1003: Slip id not found.
    UnknownTransaction,

    // === Payment Errors (V2xxx) ===
    /// V2001: No customer selected on a payment.
    PaymentCustomerNotSelected,
    /// V2002: Payment amount is zero or negative.
    PaymentAmountNotPositive,
    /// V2003: Payment id not found.
    UnknownPayment,

    // === Price Book Errors (V3xxx) ===
    /// V3001: Customer does not exist.
    UnknownCustomer,
}

impl ErrorCode {
    /// Get the error code string (e.g., "V1001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CustomerNotSelected => "V1001",
            Self::NoLineItems => "V1002",
            Self::UnknownTransaction => "V1003",
            Self::PaymentCustomerNotSelected => "V2001",
            Self::PaymentAmountNotPositive => "V2002",
            Self::UnknownPayment => "V2003",
            Self::UnknownCustomer => "V3001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ValidationError {
    /// Error code.
    pub code: ErrorCode,
    /// Error message.
    pub message: String,
    /// Date of the record that caused the error, when it has one.
    pub date: Option<NaiveDate>,
    /// Additional context.
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            date: None,
            context: None,
        }
    }

    /// Attach the record date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Check a purchase or sale before it is saved.
#[must_use]
pub fn validate_transaction(txn: &Transaction, kind: TransactionKind) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !txn.has_customer() {
        let who = match kind {
            TransactionKind::Purchase => "supplier",
            TransactionKind::Sale => "customer",
        };
        errors.push(
            ValidationError::new(
                ErrorCode::CustomerNotSelected,
                format!("select a {who} before saving the {kind}"),
            )
            .with_date(txn.date)
            .with_context(format!("{kind} {}", txn.id)),
        );
    }

    if txn.lines.is_empty() {
        errors.push(
            ValidationError::new(ErrorCode::NoLineItems, format!("{kind} has no lines"))
                .with_date(txn.date)
                .with_context(format!("{kind} {}", txn.id)),
        );
    }

    errors
}

/// Check a payment before it is saved.
#[must_use]
pub fn validate_payment(payment: &Payment) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if payment.customer_id.trim().is_empty() {
        errors.push(
            ValidationError::new(
                ErrorCode::PaymentCustomerNotSelected,
                "select a customer before saving the payment",
            )
            .with_date(payment.date)
            .with_context(format!("payment {}", payment.id)),
        );
    }

    if payment.amount <= Decimal::ZERO {
        errors.push(
            ValidationError::new(
                ErrorCode::PaymentAmountNotPositive,
                format!("payment amount must be positive, got {}", payment.amount),
            )
            .with_date(payment.date)
            .with_context(format!("payment {}", payment.id)),
        );
    }

    errors
}

/// Check that an update or removal targets an existing slip.
pub fn validate_known_transaction(
    transactions: &[Transaction],
    id: &str,
    kind: TransactionKind,
) -> Result<(), ValidationError> {
    if transactions.iter().any(|t| t.id == id) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::UnknownTransaction,
            format!("{kind} {id} not found"),
        ))
    }
}

/// Check that an update or removal targets an existing payment.
pub fn validate_known_payment(payments: &[Payment], id: &str) -> Result<(), ValidationError> {
    if payments.iter().any(|p| p.id == id) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::UnknownPayment,
            format!("payment {id} not found"),
        ))
    }
}

/// Check that a price-book operation names an existing customer.
pub fn validate_known_customer(customers: &[Customer], id: &str) -> Result<(), ValidationError> {
    if customers.iter().any(|c| c.id == id) {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::UnknownCustomer,
            format!("customer {id} not found"),
        ))
    }
}

/// Collapse a list of errors to its first one.
pub fn ensure_valid(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    errors.into_iter().next().map_or(Ok(()), Err)
}
