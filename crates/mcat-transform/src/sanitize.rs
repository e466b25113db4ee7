//! Field sanitizer.
//!
//! [`sanitize`] maps one raw value to a value inside the rule's domain and
//! reports what it had to do. Decisions are made in a fixed order:
//!
//! 1. empty after trimming: the rule default (`MISSING_DEFAULTED`)
//! 2. unparsable for the rule kind: the rule default (`PARSE_ERROR_DEFAULTED`)
//! 3. outside the bounds: the nearest bound, or the wrapped value for
//!    wrapping integer rules
//!
//! Text rules impute a sentinel instead of a default, and identifier rules
//! return no value at all when empty. The function is pure: it only looks
//! at the raw value and the rule.

use mcat_model::rule::{format_flag, format_float};
use mcat_model::{CleaningOutcome, FieldRule, Overflow, Preprocess, QualityCounters, RuleKind};

use crate::normalization::{parse_binary, parse_float, parse_integer};

/// Number of characters kept by [`Preprocess::LeadingYear`].
const YEAR_PREFIX_LEN: usize = 4;

/// Result of sanitizing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Cleaned value. `None` only for an identifier rule with an empty input.
    pub value: Option<String>,
    /// What the sanitizer did.
    pub outcome: CleaningOutcome,
}

impl Sanitized {
    fn new(value: impl Into<String>, outcome: CleaningOutcome) -> Self {
        Self {
            value: Some(value.into()),
            outcome,
        }
    }

    fn dropped() -> Self {
        Self {
            value: None,
            outcome: CleaningOutcome::MissingRequired,
        }
    }

    /// Returns true when the record holding this field must be dropped.
    pub fn is_dropped(&self) -> bool {
        self.value.is_none()
    }
}

/// Sanitize `raw` according to `rule`.
pub fn sanitize(raw: Option<&str>, rule: &FieldRule) -> Sanitized {
    let value = preprocess(raw.map(str::trim), rule.preprocess).filter(|v| !v.is_empty());

    match &rule.kind {
        RuleKind::Numeric { min, max, default } => match value {
            None => Sanitized::new(format_float(*default), CleaningOutcome::MissingDefaulted),
            Some(v) => match parse_float(v) {
                None => Sanitized::new(format_float(*default), CleaningOutcome::ParseErrorDefaulted),
                Some(n) if n < *min => Sanitized::new(format_float(*min), CleaningOutcome::ClippedLow),
                Some(n) if n > *max => Sanitized::new(format_float(*max), CleaningOutcome::ClippedHigh),
                Some(n) => Sanitized::new(format_float(n), CleaningOutcome::Ok),
            },
        },
        RuleKind::Integer {
            min,
            max,
            default,
            overflow,
        } => match value {
            None => Sanitized::new(default.to_string(), CleaningOutcome::MissingDefaulted),
            Some(v) => match parse_integer(v) {
                None => Sanitized::new(default.to_string(), CleaningOutcome::ParseErrorDefaulted),
                Some(n) if n < *min => Sanitized::new(min.to_string(), CleaningOutcome::ClippedLow),
                Some(n) if n > *max => match overflow {
                    Overflow::Clip => Sanitized::new(max.to_string(), CleaningOutcome::ClippedHigh),
                    Overflow::Wrap => {
                        Sanitized::new(wrap(n, *min, *max).to_string(), CleaningOutcome::Wrapped)
                    }
                },
                Some(n) => Sanitized::new(n.to_string(), CleaningOutcome::Ok),
            },
        },
        RuleKind::Binary { default } => match value {
            None => Sanitized::new(format_flag(*default), CleaningOutcome::MissingDefaulted),
            Some(v) => match parse_binary(v) {
                Some(flag) => Sanitized::new(format_flag(flag), CleaningOutcome::Ok),
                None => Sanitized::new(format_flag(*default), CleaningOutcome::ParseErrorDefaulted),
            },
        },
        RuleKind::Text { sentinel } => match value {
            None => Sanitized::new(sentinel.as_str(), CleaningOutcome::Imputed),
            Some(v) => Sanitized::new(v, CleaningOutcome::Ok),
        },
        RuleKind::Identifier => match value {
            None => Sanitized::dropped(),
            Some(v) => Sanitized::new(v, CleaningOutcome::Ok),
        },
    }
}

/// Sanitize `raw` and count the outcome in `counters`.
pub fn sanitize_counted(
    raw: Option<&str>,
    rule: &FieldRule,
    counters: &mut QualityCounters,
) -> Sanitized {
    let result = sanitize(raw, rule);
    counters.record(rule, result.outcome);
    result
}

fn preprocess(value: Option<&str>, preprocess: Preprocess) -> Option<&str> {
    match preprocess {
        Preprocess::None => value,
        // Shorter values have no year to take and count as missing.
        Preprocess::LeadingYear => value.and_then(|v| {
            v.char_indices()
                .nth(YEAR_PREFIX_LEN - 1)
                .map(|(idx, c)| &v[..idx + c.len_utf8()])
        }),
    }
}

/// Reduce `value > max` into `[min, max]` modulo the cycle length.
fn wrap(value: i64, min: i64, max: i64) -> i64 {
    let cycle = i128::from(max) - i128::from(min) + 1;
    let offset = (i128::from(value) - i128::from(min)).rem_euclid(cycle);
    // offset < cycle, so the sum lies in [min, max]
    i64::try_from(offset + i128::from(min)).unwrap_or(min)
}
