//! Lenient numeric coercion for values that cross into the calculator.
//!
//! The marketplace returns amounts as decimal strings and user input may be
//! blank. Nothing here fails: unparseable, absent, and negative values all
//! coerce to zero.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Coerces an optional amount to a non-negative decimal.
#[must_use]
pub fn coerce_amount(value: Option<Decimal>) -> Decimal {
    match value {
        Some(v) if v > Decimal::ZERO => v,
        _ => Decimal::ZERO,
    }
}

/// Parses a decimal string such as `"12.99"`, returning `None` when the text
/// is blank or not a number.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Rounds to cents for display and export.
#[must_use]
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp(2)
}
