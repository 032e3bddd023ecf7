//! Currency helpers shared by valuation, comparison, and rendering.

use rust_decimal::{Decimal, RoundingStrategy};

/// Applies a rate expressed in basis points and rounds to cents.
pub(crate) fn percent_of(amount: Decimal, basis_points: i64) -> Decimal {
    (amount * Decimal::new(basis_points, 4))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole-dollar display with thousands separators, e.g. `-$12,345`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let raw = rounded.abs().trunc().to_string();
    let grouped = group_digits(raw.split('.').next().unwrap_or("0"));

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Like [`format_currency`] but always carries a sign for non-zero amounts.
pub fn format_signed_currency(amount: Decimal) -> String {
    let formatted = format_currency(amount);
    if formatted.starts_with('-') || formatted == "$0" {
        formatted
    } else {
        format!("+{formatted}")
    }
}

pub fn format_quantity(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}
