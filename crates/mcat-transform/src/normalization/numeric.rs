//! Parsing of numeric, integer and flag values.
//!
//! All parsers trim surrounding whitespace and return `None` when the value
//! cannot be read for the requested kind. Callers decide what a failure means.

/// Parse a floating point value.
///
/// Accepts plain decimals, a leading sign, scientific notation and
/// `inf`/`infinity`. `NaN` has no place in a bounded domain and is rejected.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse a whole number.
///
/// Only an optional sign followed by ASCII digits is accepted; `2000.0` and
/// `1e3` are not integers.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a flag spelled as `0/1`, `true/false`, `yes/no` or `y/n` (any case).
pub fn parse_binary(value: &str) -> Option<bool> {
    let trimmed = value.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
