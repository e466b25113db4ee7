//! Folding catalog lines into a [`YearTable`].

use mcat_ingest::{is_header_line, tokenize};
use mcat_model::{CATALOG_COLUMN_COUNT, CATALOG_HEADER_TOKEN, QualityCounters};
use mcat_transform::{CatalogCleaner, CatalogLine};

use crate::feature::{FeatureError, FeatureVector};
use crate::table::YearTable;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineFold {
    /// Header or blank line; nothing to fold.
    Ignored,
    /// Folded into the accumulator for `year`.
    Folded { year: i32 },
    /// Parsed, but the year is outside the window.
    OutOfRange { year: i32 },
    /// Not usable as a feature vector.
    Skipped(String),
}

/// Turns catalog lines into feature vectors and folds them by year.
#[derive(Debug, Clone)]
pub struct LineAggregator {
    delimiter: char,
    cleaner: Option<CatalogCleaner>,
}

impl LineAggregator {
    /// Aggregator that parses lines as they are and skips any line with an
    /// unparsable feature.
    pub fn strict(delimiter: char) -> Self {
        Self {
            delimiter,
            cleaner: None,
        }
    }

    /// Aggregator that runs every line through `cleaner` first.
    pub fn sanitizing(cleaner: CatalogCleaner) -> Self {
        Self {
            delimiter: cleaner.delimiter(),
            cleaner: Some(cleaner),
        }
    }

    pub fn is_sanitizing(&self) -> bool {
        self.cleaner.is_some()
    }

    /// Fold one physical line into `table`.
    ///
    /// A case-insensitive `valence` header is only recognized when
    /// `first_line` is true.
    pub fn fold_line(
        &self,
        line: &str,
        first_line: bool,
        table: &mut YearTable,
        counters: &mut QualityCounters,
    ) -> LineFold {
        let vector = match &self.cleaner {
            Some(cleaner) => match cleaner.clean_line(line, first_line, counters) {
                CatalogLine::Header(_) => return LineFold::Ignored,
                CatalogLine::Skipped(reason) => return LineFold::Skipped(reason.to_string()),
                CatalogLine::Record(fields) => FeatureVector::from_fields(&fields),
            },
            None => {
                if first_line && is_header_line(line, CATALOG_HEADER_TOKEN) {
                    return LineFold::Ignored;
                }
                if line.trim().is_empty() {
                    counters.increment("BLANK_LINE");
                    return LineFold::Ignored;
                }
                let tokenized = tokenize(line, self.delimiter, CATALOG_COLUMN_COUNT);
                if tokenized.observed < CATALOG_COLUMN_COUNT {
                    Err(FeatureError::TooFewFields {
                        observed: tokenized.observed,
                    })
                } else {
                    FeatureVector::from_fields(&tokenized.fields)
                }
            }
        };

        match vector {
            Ok(vector) => {
                if table.fold_counted(&vector, counters) {
                    LineFold::Folded { year: vector.year }
                } else {
                    LineFold::OutOfRange { year: vector.year }
                }
            }
            Err(err) => {
                counters.increment(err.counter_name());
                LineFold::Skipped(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "valence,year,acousticness,artists,danceability,duration_ms,energy,explicit,id,instrumentalness,key,liveness,loudness,mode,name,popularity,release_date,speechiness,tempo";

    fn line(valence: &str, year: &str) -> String {
        format!("{valence},{year},0.3,\"['A', 'B']\",0.6,200000,0.7,1,abc,0.1,1,0.2,-6.5,1,Song,55,{year},0.9,120.0")
    }

    #[test]
    fn test_strict_fold() {
        let aggregator = LineAggregator::strict(',');
        let mut table = YearTable::default();
        let mut counters = QualityCounters::new();

        assert_eq!(
            aggregator.fold_line(HEADER, true, &mut table, &mut counters),
            LineFold::Ignored
        );
        assert_eq!(
            aggregator.fold_line(&line("0.4", "1970"), false, &mut table, &mut counters),
            LineFold::Folded { year: 1970 }
        );
        assert_eq!(
            aggregator.fold_line(&line("0.6", "1970"), false, &mut table, &mut counters),
            LineFold::Folded { year: 1970 }
        );
        assert_eq!(
            aggregator.fold_line(&line("0.6", "1900"), false, &mut table, &mut counters),
            LineFold::OutOfRange { year: 1900 }
        );
        assert!(matches!(
            aggregator.fold_line(&line("", "1970"), false, &mut table, &mut counters),
            LineFold::Skipped(_)
        ));
        assert!(matches!(
            aggregator.fold_line("0.5,1970", false, &mut table, &mut counters),
            LineFold::Skipped(_)
        ));

        assert_eq!(counters.get("FEATURE_PARSE_ERR"), 2);
        assert_eq!(counters.get("YEAR_OUT_OF_RANGE"), 1);
        let rows = table.finalize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].song_count, 2);
        assert!((rows[0].avg_valence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sanitizing_fold_repairs_features() {
        let aggregator = LineAggregator::sanitizing(CatalogCleaner::default());
        assert!(aggregator.is_sanitizing());
        let mut table = YearTable::default();
        let mut counters = QualityCounters::new();

        assert_eq!(
            aggregator.fold_line(&line("", "1970"), false, &mut table, &mut counters),
            LineFold::Folded { year: 1970 }
        );
        assert_eq!(counters.get("VALENCE_MISSING"), 1);
        let acc = table.get(1970).unwrap();
        assert_eq!(acc.sums()[0], 0.5);

        let no_id = line("0.5", "1970").replace(",abc,", ",,");
        assert!(matches!(
            aggregator.fold_line(&no_id, false, &mut table, &mut counters),
            LineFold::Skipped(_)
        ));
        assert_eq!(counters.get("ID_MISSING_DROPPED"), 1);
    }
}
