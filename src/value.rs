//! Normalization of raw cell values and lenient numeric coercion.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::{Number, Value};

use crate::types::Money;

/// Leading numeric prefix, the way `parseFloat` reads it.
static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number prefix regex")
});

/// A complete numeric literal.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid number regex")
});

/// Back-office timestamp, e.g. `2024-01-05 10:20:30.123`.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}$").expect("valid timestamp regex")
});

/// Display form of a raw cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// Missing or empty value, rendered as `-`.
    Placeholder,
    /// Numeric value.
    Number(Money),
    /// Anything else, verbatim.
    Text(String),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => f.write_str("-"),
            Self::Number(n) => write!(f, "{}", n.normalize()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Classifies a raw value for display. Never fails.
///
/// Numeric strings may carry surrounding whitespace. Those that look like
/// codes (`"007"`) stay text, back-office timestamps are cut to their date
/// part.
pub fn normalize(value: Option<&Value>) -> DisplayValue {
    match value {
        None | Some(Value::Null) => DisplayValue::Placeholder,
        Some(Value::Number(n)) => {
            number_to_decimal(n).map_or_else(|| DisplayValue::Text(n.to_string()), DisplayValue::Number)
        }
        Some(Value::String(s)) => normalize_str(s),
        Some(Value::Bool(b)) => DisplayValue::Text(b.to_string()),
        Some(other) => DisplayValue::Text(other.to_string()),
    }
}

/// String branch of [`normalize`].
pub fn normalize_str(s: &str) -> DisplayValue {
    if s.is_empty() {
        return DisplayValue::Placeholder;
    }
    let trimmed = s.trim();
    if let Some(number) = strict_number(trimmed) {
        if looks_like_code(trimmed) {
            return DisplayValue::Text(s.to_string());
        }
        return DisplayValue::Number(number);
    }
    if TIMESTAMP_RE.is_match(s) {
        let date = s.split(' ').next().unwrap_or(s);
        return DisplayValue::Text(date.to_string());
    }
    DisplayValue::Text(s.to_string())
}

/// A leading zero marks account numbers, ISIN fragments and similar codes.
fn looks_like_code(s: &str) -> bool {
    s.starts_with('0') || s.len() > s.trim_start_matches('0').len()
}

/// Amount of a row field with `parseFloat` semantics: the longest numeric
/// prefix counts, anything unparseable or missing is zero.
pub fn amount_or_zero(value: Option<&Value>) -> Money {
    match value {
        Some(Value::Number(n)) => number_to_decimal(n).unwrap_or_default(),
        Some(Value::String(s)) => NUMBER_PREFIX_RE
            .find(s.trim_start())
            .and_then(|m| parse_decimal(m.as_str()))
            .unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Amount of a row field with `Number(...)` semantics: the whole trimmed
/// string must be numeric, empty and null are zero, anything else (NaN) is
/// zero as well.
pub fn number_or_zero(value: Option<&Value>) -> Money {
    match value {
        Some(Value::Number(n)) => number_to_decimal(n).unwrap_or_default(),
        Some(Value::String(s)) => strict_number(s.trim()).unwrap_or_default(),
        Some(Value::Bool(true)) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

/// Parses a fully numeric string.
fn strict_number(s: &str) -> Option<Money> {
    if NUMBER_RE.is_match(s) {
        parse_decimal(s)
    } else {
        None
    }
}

/// Parses a numeric literal, accepting exponents.
fn parse_decimal(s: &str) -> Option<Money> {
    let s = s.strip_prefix('+').unwrap_or(s);
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Converts a JSON number without going through binary floating point when
/// possible.
fn number_to_decimal(n: &Number) -> Option<Money> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    parse_decimal(&n.to_string()).or_else(|| n.as_f64().and_then(Decimal::from_f64))
}
