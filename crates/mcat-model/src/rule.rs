//! Declarative per-column sanitization rules.
//!
//! A [`FieldRule`] is static configuration: it describes the domain of one
//! column and how missing, unparsable and out-of-range values are resolved.
//! Rules never hold mutable state.

use crate::outcome::CleaningOutcome;

/// How an integer above the upper bound is brought back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Replace with the nearest bound.
    Clip,
    /// Reduce modulo the cycle length `max - min + 1`.
    Wrap,
}

/// Transformation applied to the raw value before the kind is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocess {
    /// Use the raw value as-is.
    #[default]
    None,
    /// Keep only the leading 4 characters (a year taken from a date).
    /// Shorter values are treated as missing.
    LeadingYear,
}

/// Domain of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Floating point value clipped to `[min, max]`.
    Numeric { min: f64, max: f64, default: f64 },
    /// Integer value clipped (or wrapped) to `[min, max]`.
    Integer {
        min: i64,
        max: i64,
        default: i64,
        overflow: Overflow,
    },
    /// Flag normalized to `0` or `1`.
    Binary { default: bool },
    /// Free text; empty values are imputed with `sentinel`.
    Text { sentinel: String },
    /// Required text without default; empty values drop the record.
    Identifier,
}

impl RuleKind {
    /// Short kind label used in rule listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Numeric { .. } => "numeric",
            Self::Integer {
                overflow: Overflow::Wrap,
                ..
            } => "integer (wrap)",
            Self::Integer { .. } => "integer",
            Self::Binary { .. } => "binary",
            Self::Text { .. } => "text",
            Self::Identifier => "identifier",
        }
    }

    /// Returns true for kinds with numeric bounds.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Numeric { .. } | Self::Integer { .. })
    }
}

/// Sanitization rule for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// Column name as it appears in the header.
    pub column: &'static str,
    /// Prefix of the quality counters for this column (e.g. `VALENCE`).
    pub counter_prefix: &'static str,
    /// Value domain and defaults.
    pub kind: RuleKind,
    /// Transformation applied before parsing.
    pub preprocess: Preprocess,
}

impl FieldRule {
    pub fn new(column: &'static str, counter_prefix: &'static str, kind: RuleKind) -> Self {
        Self {
            column,
            counter_prefix,
            kind,
            preprocess: Preprocess::None,
        }
    }

    pub fn numeric(column: &'static str, prefix: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self::new(column, prefix, RuleKind::Numeric { min, max, default })
    }

    pub fn integer(column: &'static str, prefix: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self::new(
            column,
            prefix,
            RuleKind::Integer {
                min,
                max,
                default,
                overflow: Overflow::Clip,
            },
        )
    }

    pub fn binary(column: &'static str, prefix: &'static str) -> Self {
        Self::new(column, prefix, RuleKind::Binary { default: false })
    }

    pub fn text(column: &'static str, prefix: &'static str, sentinel: &str) -> Self {
        Self::new(
            column,
            prefix,
            RuleKind::Text {
                sentinel: sentinel.to_string(),
            },
        )
    }

    pub fn identifier(column: &'static str, prefix: &'static str) -> Self {
        Self::new(column, prefix, RuleKind::Identifier)
    }

    /// Switch integer overflow handling to modulo wrapping.
    #[must_use]
    pub fn wrapping(mut self) -> Self {
        if let RuleKind::Integer { overflow, .. } = &mut self.kind {
            *overflow = Overflow::Wrap;
        }
        self
    }

    #[must_use]
    pub fn with_preprocess(mut self, preprocess: Preprocess) -> Self {
        self.preprocess = preprocess;
        self
    }

    /// Rendered default value, if the rule has one.
    pub fn default_value(&self) -> Option<String> {
        match &self.kind {
            RuleKind::Numeric { default, .. } => Some(format_float(*default)),
            RuleKind::Integer { default, .. } => Some(default.to_string()),
            RuleKind::Binary { default } => Some(format_flag(*default).to_string()),
            RuleKind::Text { sentinel } => Some(sentinel.clone()),
            RuleKind::Identifier => None,
        }
    }

    /// Rendered `[min, max]` bounds for bounded kinds.
    pub fn bounds_label(&self) -> Option<String> {
        match &self.kind {
            RuleKind::Numeric { min, max, .. } => {
                Some(format!("[{}, {}]", format_float(*min), format_float(*max)))
            }
            RuleKind::Integer { min, max, .. } => Some(format!("[{min}, {max}]")),
            RuleKind::Binary { .. } => Some("{0, 1}".to_string()),
            RuleKind::Text { .. } | RuleKind::Identifier => None,
        }
    }

    /// Returns true for integer rules that wrap above the upper bound.
    pub fn is_wrapping(&self) -> bool {
        matches!(
            self.kind,
            RuleKind::Integer {
                overflow: Overflow::Wrap,
                ..
            }
        )
    }

    /// Name of the quality counter incremented for `outcome`.
    ///
    /// Wrapping rules only clip below the lower bound, which is counted
    /// as `<PREFIX>_NEGATIVE_CLIPPED`.
    ///
    /// Returns `None` for [`CleaningOutcome::Ok`], which is never counted.
    pub fn counter_name(&self, outcome: CleaningOutcome) -> Option<String> {
        let suffix = match outcome {
            CleaningOutcome::Ok => return None,
            CleaningOutcome::MissingDefaulted => "MISSING".to_string(),
            CleaningOutcome::ParseErrorDefaulted => "PARSE_ERR".to_string(),
            CleaningOutcome::ClippedLow if self.is_wrapping() => "NEGATIVE_CLIPPED".to_string(),
            CleaningOutcome::ClippedLow | CleaningOutcome::ClippedHigh => "CLIPPED".to_string(),
            CleaningOutcome::Imputed => "IMPUTED_UNKNOWN".to_string(),
            CleaningOutcome::Wrapped => match &self.kind {
                RuleKind::Integer { min, max, .. } => format!("MOD_{}", max - min + 1),
                _ => "WRAPPED".to_string(),
            },
            CleaningOutcome::MissingRequired => "MISSING_DROPPED".to_string(),
        };
        Some(format!("{}_{suffix}", self.counter_prefix))
    }
}

/// Render a float so that it always reads as a decimal (`-60.0`, `0.5`).
pub fn format_float(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Render a flag as `0` or `1`.
pub fn format_flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
