use serde::{Deserialize, Serialize};

/// Result of sanitizing a single field.
///
/// Every outcome other than [`CleaningOutcome::Ok`] is counted once per
/// field per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleaningOutcome {
    /// Value parsed and was already inside its domain.
    Ok,
    /// Value was empty after trimming; the rule default was used.
    MissingDefaulted,
    /// Value did not parse for the rule kind; the rule default was used.
    ParseErrorDefaulted,
    /// Value was below the lower bound and was replaced by it.
    ClippedLow,
    /// Value was above the upper bound and was replaced by it.
    ClippedHigh,
    /// Empty text was replaced by the rule sentinel.
    Imputed,
    /// Integer above the upper bound was reduced modulo the cycle length.
    Wrapped,
    /// Required value was empty; the whole record is dropped.
    MissingRequired,
}

impl CleaningOutcome {
    /// Canonical outcome name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::MissingDefaulted => "MISSING_DEFAULTED",
            Self::ParseErrorDefaulted => "PARSE_ERROR_DEFAULTED",
            Self::ClippedLow => "CLIPPED_LOW",
            Self::ClippedHigh => "CLIPPED_HIGH",
            Self::Imputed => "IMPUTED",
            Self::Wrapped => "WRAPPED",
            Self::MissingRequired => "MISSING_REQUIRED",
        }
    }

    /// Returns true when the raw value was kept as-is.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns true when the value was replaced by a bound.
    pub fn is_clipped(&self) -> bool {
        matches!(self, Self::ClippedLow | Self::ClippedHigh)
    }
}

impl std::fmt::Display for CleaningOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
