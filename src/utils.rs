//! Currency, date and file-name formatting helpers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::RoundingStrategy;

use crate::error::ReportError;
use crate::types::Money;

/// Groups the integer digits the Indian way: last three, then pairs
/// (`12,34,567`).
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
    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

/// Absolute value with two decimals and Indian digit grouping, e.g.
/// `1,23,456.79`. Halves round away from zero.
pub fn format_indian(value: Money) -> String {
    let mut rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}.{frac_part}", group_indian(int_part))
}

/// Whether the value prints with a minus sign once rounded to paise.
fn is_visibly_negative(value: Money) -> bool {
    value.is_sign_negative()
        && !value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .is_zero()
}

/// Signed rupee amount as the `en-IN` locale prints it: `₹1,23,456.79`,
/// `-₹250.00`.
pub fn format_inr(value: Money) -> String {
    let sign = if is_visibly_negative(value) { "-" } else { "" };
    format!("{sign}₹{}", format_indian(value))
}

/// Rupee amount for fonts without a rupee glyph: `Rs. 250.00`, debits
/// suffixed with ` CR`.
pub fn format_inr_plain(value: Money, symbol: &str) -> String {
    let suffix = if is_visibly_negative(value) { " CR" } else { "" };
    format!("{symbol} {}{suffix}", format_indian(value))
}

/// Plain number for quantity-like cells: trailing zeros dropped.
#[inline]
pub fn format_plain(value: Money) -> String {
    value.normalize().to_string()
}

/// `dd/mm/yyyy`, the date format of the back office.
#[inline]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parses `dd/mm/yyyy` or ISO `yyyy-mm-dd`.
pub fn parse_date(value: &str) -> Result<NaiveDate, ReportError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map_err(|_| ReportError::Date {
            value: value.to_string(),
        })
}

/// Timestamp part of export file names: the instant in UTC, truncated to
/// seconds, with `:` replaced by `-` (`2024-01-05T10-20-30`).
#[inline]
pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}
