//! Weekly chart record validation.
//!
//! A chart record is accepted or rejected as a whole; nothing is repaired
//! except the "Last Week" null token and the quoting of Song and Artist.

use std::sync::LazyLock;

use mcat_ingest::{Tokenized, join_fields, strip_enclosing_quotes, tokenize, unescape_quotes};
use mcat_model::{
    CHART_FIELD_CAP, CHART_HEADER, CHART_OUTPUT_COLUMN_COUNT, ChartColumn, LAST_WEEK_NULL_MARKER,
    QualityCounters,
};
use mcat_transform::parse_integer;
use regex::Regex;

use crate::reason::RejectReason;

/// Strict `YYYY-MM-DD` shape. Only the shape is checked, not the calendar.
static CHART_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid chart date regex")
});

/// Tokens in "Last Week" that mean the song was not charted the week before.
const LAST_WEEK_NULL_TOKENS: &[&str] = &["#", ""];

/// Free-text columns that get their quoting normalized.
const TEXT_COLUMNS: &[ChartColumn] = &[ChartColumn::Song, ChartColumn::Artist];

/// Returns true if `value` has the `YYYY-MM-DD` shape.
pub fn is_valid_chart_date(value: &str) -> bool {
    CHART_DATE_REGEX.is_match(value)
}

/// A chart record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRecord {
    fields: Vec<String>,
}

impl ChartRecord {
    /// Cleaned value of `column`.
    pub fn get(&self, column: ChartColumn) -> &str {
        &self.fields[column.index()]
    }

    /// Previous week's rank, `None` for the null marker.
    pub fn last_week(&self) -> Option<i64> {
        parse_integer(self.get(ChartColumn::LastWeek))
    }

    /// The 7 output fields in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Render as one output line.
    pub fn to_line(&self, delimiter: char) -> String {
        join_fields(&self.fields, delimiter)
    }
}

/// Result of validating one chart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartLine {
    /// First line of the input, replaced by [`CHART_HEADER`].
    Header,
    Record(ChartRecord),
    Rejected(RejectReason),
}

/// Validates chart lines against the 7-column chart schema.
#[derive(Debug, Clone)]
pub struct ChartValidator {
    delimiter: char,
    required: Vec<ChartColumn>,
    numeric: Vec<ChartColumn>,
}

impl Default for ChartValidator {
    fn default() -> Self {
        Self::new(',')
    }
}

impl ChartValidator {
    /// Validator with Song and Artist required and Rank, Peak Position and
    /// Weeks in Charts numeric.
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            required: vec![ChartColumn::Song, ChartColumn::Artist],
            numeric: vec![
                ChartColumn::Rank,
                ChartColumn::PeakPosition,
                ChartColumn::WeeksInCharts,
            ],
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Replace the set of columns that must be non-empty.
    #[must_use]
    pub fn with_required(mut self, required: Vec<ChartColumn>) -> Self {
        self.required = required;
        self
    }

    /// Replace the set of columns that must hold an integer.
    #[must_use]
    pub fn with_numeric(mut self, numeric: Vec<ChartColumn>) -> Self {
        self.numeric = numeric;
        self
    }

    /// Output header line.
    pub fn header(&self) -> String {
        if self.delimiter == ',' {
            CHART_HEADER.to_string()
        } else {
            join_fields(&ChartColumn::ALL.map(ChartColumn::name), self.delimiter)
        }
    }

    /// Validate one physical line and count any rejection.
    ///
    /// The first line of the input is always the header slot and is never
    /// validated.
    pub fn validate_line(
        &self,
        line: &str,
        first_line: bool,
        counters: &mut QualityCounters,
    ) -> ChartLine {
        if first_line {
            return ChartLine::Header;
        }
        let tokenized = tokenize(line, self.delimiter, CHART_FIELD_CAP);
        match self.validate(&tokenized) {
            Ok(record) => ChartLine::Record(record),
            Err(reason) => {
                counters.increment(reason.counter_name());
                ChartLine::Rejected(reason)
            }
        }
    }

    /// Validate an already tokenized record.
    pub fn validate(&self, tokenized: &Tokenized) -> Result<ChartRecord, RejectReason> {
        let observed = tokenized.observed;
        if !(CHART_OUTPUT_COLUMN_COUNT..=CHART_FIELD_CAP).contains(&observed) {
            return Err(RejectReason::MalformedRecord { observed });
        }

        let mut fields: Vec<String> = tokenized.fields[..CHART_OUTPUT_COLUMN_COUNT]
            .iter()
            .map(|field| field.trim().to_string())
            .collect();

        if !is_valid_chart_date(&fields[ChartColumn::Date.index()]) {
            return Err(RejectReason::InvalidDate);
        }

        for column in TEXT_COLUMNS {
            let field = &mut fields[column.index()];
            *field = unescape_quotes(strip_enclosing_quotes(field)).trim().to_string();
        }

        if let Some(column) = self
            .required
            .iter()
            .find(|column| fields[column.index()].is_empty())
        {
            return Err(RejectReason::MissingRequiredField { column: *column });
        }

        for column in &self.numeric {
            let field = &mut fields[column.index()];
            match parse_integer(field) {
                Some(value) => *field = value.to_string(),
                None => return Err(RejectReason::InvalidNumber { column: *column }),
            }
        }

        let last_week = &mut fields[ChartColumn::LastWeek.index()];
        if LAST_WEEK_NULL_TOKENS.contains(&last_week.as_str()) {
            *last_week = LAST_WEEK_NULL_MARKER.to_string();
        } else {
            match parse_integer(last_week) {
                Some(value) => *last_week = value.to_string(),
                None => return Err(RejectReason::InvalidLastWeek),
            }
        }

        Ok(ChartRecord { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(line: &str) -> Result<ChartRecord, RejectReason> {
        ChartValidator::default().validate(&tokenize(line, ',', CHART_FIELD_CAP))
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_valid_chart_date("2021-11-06"));
        assert!(!is_valid_chart_date("2021-1-06"));
        assert!(!is_valid_chart_date("06/11/2021"));
        assert!(!is_valid_chart_date("2021-11-06T00:00"));
        assert!(!is_valid_chart_date("２０２１-11-06"));
    }

    #[test]
    fn test_accepts_seven_and_eight_fields() {
        let record = validate("2021-11-06,Easy On Me,Adele,1,1,1,3").unwrap();
        assert_eq!(record.get(ChartColumn::Artist), "Adele");
        assert_eq!(record.last_week(), Some(1));

        let record = validate("2021-11-06,Easy On Me,Adele,1,1,1,3,ignored").unwrap();
        assert_eq!(record.fields().len(), CHART_OUTPUT_COLUMN_COUNT);
        assert_eq!(record.to_line(','), "2021-11-06,Easy On Me,Adele,1,1,1,3");
    }

    #[test]
    fn test_last_week_null_tokens() {
        let record = validate("2021-11-06,Stay,The Kid LAROI,2,#,1,16").unwrap();
        assert_eq!(record.get(ChartColumn::LastWeek), "NULL");
        assert_eq!(record.last_week(), None);

        let record = validate("2021-11-06,Stay,The Kid LAROI,2, ,1,16").unwrap();
        assert_eq!(record.get(ChartColumn::LastWeek), "NULL");

        assert_eq!(
            validate("2021-11-06,Stay,The Kid LAROI,2,new,1,16"),
            Err(RejectReason::InvalidLastWeek)
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            validate("2021-11-06,Stay,The Kid LAROI"),
            Err(RejectReason::MalformedRecord { observed: 3 })
        );
        assert_eq!(
            validate("1,2,3,4,5,6,7,8,9"),
            Err(RejectReason::MalformedRecord { observed: 9 })
        );
        assert_eq!(
            validate("11/06/2021,Stay,The Kid LAROI,2,3,1,16"),
            Err(RejectReason::InvalidDate)
        );
        assert_eq!(
            validate("2021-11-06,,The Kid LAROI,2,3,1,16"),
            Err(RejectReason::MissingRequiredField {
                column: ChartColumn::Song
            })
        );
        assert_eq!(
            validate("2021-11-06,Stay,The Kid LAROI,2,3,one,16"),
            Err(RejectReason::InvalidNumber {
                column: ChartColumn::PeakPosition
            })
        );
    }

    #[test]
    fn test_quotes_are_normalized() {
        let record = validate(r#"2021-11-06,"Bad Habits, Live",Ed Sheeran,5,4,2,19"#).unwrap();
        assert_eq!(record.get(ChartColumn::Song), "Bad Habits, Live");
        assert_eq!(
            record.to_line(','),
            r#"2021-11-06,"Bad Habits, Live",Ed Sheeran,5,4,2,19"#
        );

        let record = validate(r#"2021-11-06,"The ""Real"" Slim Shady",Eminem,5,4,2,19"#).unwrap();
        assert_eq!(record.get(ChartColumn::Song), r#"The "Real" Slim Shady"#);
    }

    #[test]
    fn test_validate_line_counts_and_header() {
        let validator = ChartValidator::default();
        let mut counters = QualityCounters::new();
        assert_eq!(
            validator.validate_line("date,song,artist", true, &mut counters),
            ChartLine::Header
        );
        assert!(matches!(
            validator.validate_line("garbage", false, &mut counters),
            ChartLine::Rejected(RejectReason::MalformedRecord { observed: 1 })
        ));
        assert!(matches!(
            validator.validate_line("2021-11-06,Stay,X,+2,#,1,16", false, &mut counters),
            ChartLine::Record(_)
        ));
        assert_eq!(counters.get("MALFORMED_RECORD"), 1);
        assert_eq!(counters.total(), 1);
        assert_eq!(validator.header(), CHART_HEADER);
        assert_eq!(
            ChartValidator::new(';').header(),
            "Date;Song;Artist;Rank;Last Week;Peak Position;Weeks in Charts"
        );
    }

    #[test]
    fn test_custom_required_columns() {
        let validator = ChartValidator::default()
            .with_required(vec![ChartColumn::Song])
            .with_numeric(vec![ChartColumn::Rank]);
        let record = validator
            .validate(&tokenize("2021-11-06,Stay,,2,3,x,y", ',', CHART_FIELD_CAP))
            .unwrap();
        assert_eq!(record.get(ChartColumn::PeakPosition), "x");
    }
}
