//! Display formatting for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used by [`format_inr`].
pub const RUPEE: &str = "₹";

/// Groups integer digits the Indian way: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount with a currency symbol and Indian digit grouping.
///
/// Amounts are rounded to two decimal places; trailing fraction zeros are
/// dropped, so whole amounts have no decimal point.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = format!("{}{}{}", sign, symbol, group_indian(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount in rupees, e.g. `₹1,23,456`.
///
/// # Examples
///
/// ```
/// use payroll_engine::format::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::new(123456, 0)), "₹1,23,456");
/// assert_eq!(format_inr(Decimal::new(-1234550, 2)), "-₹12,345.5");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    format_currency(amount, RUPEE)
}

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
