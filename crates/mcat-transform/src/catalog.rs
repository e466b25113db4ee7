//! Catalog record cleaning.
//!
//! Applies the [`CatalogRules`] table to every field of a 19-column catalog
//! line. Field problems are repaired and counted; a wrong field count, a
//! blank line or a missing identifier drops the record.

use std::fmt;

use mcat_ingest::{is_header_line, join_fields, tokenize, unescape_quotes};
use mcat_model::{CATALOG_COLUMN_COUNT, CATALOG_HEADER_TOKEN, QualityCounters};

use crate::rules::CatalogRules;
use crate::sanitize::sanitize;

/// Why a catalog line produced no output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSkip {
    /// Line was empty or whitespace only.
    BlankLine,
    /// Line did not have exactly 19 fields.
    BadFieldCount { observed: usize },
    /// The identifier field was empty.
    MissingId,
}

impl CatalogSkip {
    /// Record-level counter for this skip. `None` when the field rule
    /// already counted it.
    pub fn counter_name(self) -> Option<&'static str> {
        match self {
            Self::BlankLine => Some("BLANK_LINE"),
            Self::BadFieldCount { .. } => Some("BAD_NUM_FIELDS"),
            Self::MissingId => None,
        }
    }
}

impl fmt::Display for CatalogSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankLine => f.write_str("blank line"),
            Self::BadFieldCount { observed } => {
                write!(f, "expected {CATALOG_COLUMN_COUNT} fields, got {observed}")
            }
            Self::MissingId => f.write_str("id is empty"),
        }
    }
}

/// Result of cleaning one catalog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLine {
    /// Header passed through unchanged.
    Header(String),
    /// Cleaned record fields in column order.
    Record(Vec<String>),
    /// No output for this line.
    Skipped(CatalogSkip),
}

/// Cleans catalog lines with a fixed rule table and delimiter.
#[derive(Debug, Clone)]
pub struct CatalogCleaner {
    rules: CatalogRules,
    delimiter: char,
}

impl Default for CatalogCleaner {
    fn default() -> Self {
        Self::new(CatalogRules::default(), ',')
    }
}

impl CatalogCleaner {
    pub fn new(rules: CatalogRules, delimiter: char) -> Self {
        Self { rules, delimiter }
    }

    pub fn rules(&self) -> &CatalogRules {
        &self.rules
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Clean one physical line.
    ///
    /// `first_line` is true only for the first line of the input; a header is
    /// recognized there and nowhere else.
    pub fn clean_line(
        &self,
        line: &str,
        first_line: bool,
        counters: &mut QualityCounters,
    ) -> CatalogLine {
        if first_line && is_header_line(line, CATALOG_HEADER_TOKEN) {
            return CatalogLine::Header(line.to_string());
        }
        if line.trim().is_empty() {
            return self.skip(CatalogSkip::BlankLine, counters);
        }

        let tokenized = tokenize(line, self.delimiter, CATALOG_COLUMN_COUNT);
        if !tokenized.has_field_count(CATALOG_COLUMN_COUNT) {
            return self.skip(
                CatalogSkip::BadFieldCount {
                    observed: tokenized.observed,
                },
                counters,
            );
        }

        match self.clean_fields(&tokenized.fields, counters) {
            Some(fields) => CatalogLine::Record(fields),
            None => CatalogLine::Skipped(CatalogSkip::MissingId),
        }
    }

    /// Sanitize a tokenized record field by field.
    ///
    /// Returns `None` when a required field is empty; only that drop is
    /// counted, the other fields of a dropped record are not.
    pub fn clean_fields(
        &self,
        raw: &[String],
        counters: &mut QualityCounters,
    ) -> Option<Vec<String>> {
        let mut cleaned = Vec::with_capacity(self.rules.len());
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for (idx, rule) in self.rules.iter().enumerate() {
            let value = raw.get(idx).map(|field| unescape_quotes(field));
            let result = sanitize(value.as_deref(), rule);
            match result.value {
                Some(value) => {
                    cleaned.push(value);
                    outcomes.push((rule, result.outcome));
                }
                None => {
                    counters.record(rule, result.outcome);
                    return None;
                }
            }
        }

        for (rule, outcome) in outcomes {
            counters.record(rule, outcome);
        }
        Some(cleaned)
    }

    /// Render cleaned fields as one output line.
    pub fn format_record(&self, fields: &[String]) -> String {
        join_fields(fields, self.delimiter)
    }

    fn skip(&self, reason: CatalogSkip, counters: &mut QualityCounters) -> CatalogLine {
        if let Some(name) = reason.counter_name() {
            counters.increment(name);
        }
        CatalogLine::Skipped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETAINED: &str =
        "0.5,1969,0.3,,0.6,200000,0.7,1,abc123,0.1,13,0.2,-70,1,,55,1969-05-01,0.9,50";

    #[test]
    fn test_record_is_repaired() {
        let cleaner = CatalogCleaner::default();
        let mut counters = QualityCounters::new();
        let CatalogLine::Record(fields) = cleaner.clean_line(RETAINED, false, &mut counters) else {
            panic!("record should be retained");
        };
        assert_eq!(fields[3], "Unknown Artist");
        assert_eq!(fields[10], "1");
        assert_eq!(fields[12], "-60.0");
        assert_eq!(fields[14], "Unknown Title");
        assert_eq!(fields[16], "1969");
        assert_eq!(counters.get("ARTISTS_IMPUTED_UNKNOWN"), 1);
        assert_eq!(counters.get("NAME_IMPUTED_UNKNOWN"), 1);
        assert_eq!(counters.get("KEY_MOD_12"), 1);
        assert_eq!(counters.get("LOUD_CLIPPED"), 1);
        assert_eq!(counters.total(), 4);
    }

    #[test]
    fn test_missing_id_drops_record() {
        let cleaner = CatalogCleaner::default();
        let mut counters = QualityCounters::new();
        let line = RETAINED.replace("abc123", " ");
        let result = cleaner.clean_line(&line, false, &mut counters);
        assert_eq!(result, CatalogLine::Skipped(CatalogSkip::MissingId));
        assert_eq!(counters.get("ID_MISSING_DROPPED"), 1);
        assert_eq!(counters.total(), 1);
    }

    #[test]
    fn test_header_only_on_first_line() {
        let cleaner = CatalogCleaner::default();
        let mut counters = QualityCounters::new();
        let header = "valence,year,acousticness,artists,danceability,duration_ms,energy,explicit,id,instrumentalness,key,liveness,loudness,mode,name,popularity,release_date,speechiness,tempo";
        assert_eq!(
            cleaner.clean_line(header, true, &mut counters),
            CatalogLine::Header(header.to_string())
        );
        assert!(matches!(
            cleaner.clean_line(header, false, &mut counters),
            CatalogLine::Record(_)
        ));
    }

    #[test]
    fn test_blank_and_bad_field_count() {
        let cleaner = CatalogCleaner::default();
        let mut counters = QualityCounters::new();
        assert_eq!(
            cleaner.clean_line("   ", false, &mut counters),
            CatalogLine::Skipped(CatalogSkip::BlankLine)
        );
        assert_eq!(
            cleaner.clean_line("0.5,1969", false, &mut counters),
            CatalogLine::Skipped(CatalogSkip::BadFieldCount { observed: 2 })
        );
        let long = format!("{RETAINED},extra");
        assert_eq!(
            cleaner.clean_line(&long, false, &mut counters),
            CatalogLine::Skipped(CatalogSkip::BadFieldCount { observed: 20 })
        );
        assert_eq!(counters.get("BLANK_LINE"), 1);
        assert_eq!(
            CatalogSkip::BadFieldCount { observed: 2 }.to_string(),
            "expected 19 fields, got 2"
        );
        assert_eq!(counters.get("BAD_NUM_FIELDS"), 2);
    }

    #[test]
    fn test_quoted_artists_are_requoted() {
        let cleaner = CatalogCleaner::default();
        let mut counters = QualityCounters::new();
        let line = RETAINED.replacen(",,", ",\"['A', 'B \"\"C\"\"']\",", 1);
        let CatalogLine::Record(fields) = cleaner.clean_line(&line, false, &mut counters) else {
            panic!("record should be retained");
        };
        assert_eq!(fields[3], "['A', 'B \"C\"']");
        let output = cleaner.format_record(&fields);
        assert!(output.starts_with("0.5,1969,0.3,\"['A', 'B \"\"C\"\"']\",0.6,"));
    }
}
