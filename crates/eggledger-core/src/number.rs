//! Lenient numeric coercion for values entered through forms.
//!
//! Form fields arrive as text. Anything that does not parse as a number is
//! treated as zero rather than rejected, so a blank or garbled field never
//! blocks a recompute.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of eggs in one plate.
pub const EGGS_PER_PLATE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Coerce free-form text to a decimal, falling back to zero.
///
/// Accepts plain (`"150"`, `"-2.5"`) and scientific (`"1e3"`) notation.
/// Surrounding whitespace and thousands separators are ignored.
///
/// ```
/// use eggledger_core::coerce_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(coerce_decimal(" 150 "), dec!(150));
/// assert_eq!(coerce_decimal("1,200"), dec!(1200));
/// assert_eq!(coerce_decimal("abc"), dec!(0));
/// assert_eq!(coerce_decimal(""), dec!(0));
/// ```
#[must_use]
pub fn coerce_decimal(input: &str) -> Decimal {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// `a × b`, or zero when the product overflows.
#[must_use]
pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

/// `a ÷ b`, or zero when `b` is zero or the quotient overflows.
#[must_use]
pub fn div_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or(Decimal::ZERO)
}
