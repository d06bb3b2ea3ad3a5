//! Type coercion from raw cell content.
//!
//! All coercers are total: unparseable input becomes `None` (or `false` for
//! booleans), never an error.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::grid::CellValue;

/// Text date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Tokens read as an affirmative answer.
const TRUE_TOKENS: &[&str] = &["YES", "TRUE", "1", "Y"];

/// Parse a date from a native date cell or from text.
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parse a date from text using the accepted formats.
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a decimal from a native number cell or from currency-ish text.
pub fn parse_decimal(value: &CellValue) -> Option<Decimal> {
    match value {
        CellValue::Number(n) => decimal_from_f64(*n),
        CellValue::Text(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Parse decimal text after removing `$` and `,`.
///
/// ```
/// use kom_core::coerce::parse_decimal_str;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal_str("$34,447.00"), Some(Decimal::new(3444700, 2)));
/// assert_eq!(parse_decimal_str("abc"), None);
/// ```
pub fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Parse a percentage cell such as `"100%"` or `5`.
pub fn parse_percent(value: &CellValue) -> Option<Decimal> {
    match value {
        CellValue::Text(s) => parse_decimal_str(&s.replace('%', "")),
        other => parse_decimal(other),
    }
}

/// Closed-world boolean: only `YES`, `TRUE`, `1` and `Y` are true.
pub fn parse_bool(value: &CellValue) -> bool {
    parse_bool_str(&value.to_text())
}

/// String form of [`parse_bool`].
pub fn parse_bool_str(s: &str) -> bool {
    let upper = s.trim().to_uppercase();
    !upper.is_empty() && TRUE_TOKENS.contains(&upper.as_str())
}

/// Parse a whole count written with digits only (`"5"`, not `"5.5"`).
pub fn parse_count(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Split a `"<dia>x<length>"` dimension into its two numbers.
pub fn split_dimensions(s: &str) -> Option<(Option<Decimal>, Option<Decimal>)> {
    let lower = s.to_lowercase();
    let (left, right) = lower.split_once('x')?;
    Some((parse_decimal_str(left), parse_decimal_str(right)))
}

/// Quantity as a whole number, but only if it is strictly positive.
pub fn positive_quantity(value: &CellValue) -> Option<i64> {
    let qty = parse_decimal(value)?;
    if qty <= Decimal::ZERO {
        return None;
    }
    qty.trunc().to_i64()
}

fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    // Display gives the shortest round-trip form, so 243.9 stays 243.9.
    Decimal::from_str(&n.to_string()).ok()
}
