//! Chart record rejection reasons.

use std::fmt;

use mcat_model::ChartColumn;

/// Why a chart record was rejected. Each reason maps to one quality counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Line did not have 7 or 8 fields.
    MalformedRecord { observed: usize },
    /// Date is not `YYYY-MM-DD`.
    InvalidDate,
    /// A required text column is empty.
    MissingRequiredField { column: ChartColumn },
    /// A numeric column is not an integer.
    InvalidNumber { column: ChartColumn },
    /// "Last Week" is neither an integer nor a null token.
    InvalidLastWeek,
}

impl RejectReason {
    /// Quality counter incremented for this reason.
    pub fn counter_name(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::InvalidDate => "INVALID_DATE",
            Self::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Self::InvalidNumber { .. } => "INVALID_NUMBER",
            Self::InvalidLastWeek => "INVALID_LAST_WEEK",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { observed } => {
                write!(f, "expected 7 or 8 fields, got {observed}")
            }
            Self::InvalidDate => f.write_str("date is not YYYY-MM-DD"),
            Self::MissingRequiredField { column } => write!(f, "{} is empty", column.name()),
            Self::InvalidNumber { column } => write!(f, "{} is not an integer", column.name()),
            Self::InvalidLastWeek => f.write_str("Last Week is not an integer or '#'"),
        }
    }
}
