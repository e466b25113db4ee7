//! Accumulators keyed by year.

use std::collections::BTreeMap;

use mcat_model::{AggregationConfig, QualityCounters};

use crate::accumulator::Accumulator;
use crate::feature::FeatureVector;
use crate::summary::SummaryRow;

/// Counter for records whose year lies outside the configured window.
pub const YEAR_OUT_OF_RANGE: &str = "YEAR_OUT_OF_RANGE";

/// One accumulator per year inside a year window.
///
/// Years are created on first fold, so every year present has a non-zero
/// count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearTable {
    range: AggregationConfig,
    years: BTreeMap<i32, Accumulator>,
}

impl YearTable {
    pub fn new(range: AggregationConfig) -> Self {
        Self {
            range,
            years: BTreeMap::new(),
        }
    }

    pub fn range(&self) -> AggregationConfig {
        self.range
    }

    /// Fold `vector` into its year. Returns false when the year is outside
    /// the window and the vector was ignored.
    pub fn fold(&mut self, vector: &FeatureVector) -> bool {
        if !self.range.contains(vector.year) {
            return false;
        }
        self.years.entry(vector.year).or_default().fold(vector);
        true
    }

    /// [`fold`](Self::fold), counting excluded years.
    pub fn fold_counted(&mut self, vector: &FeatureVector, counters: &mut QualityCounters) -> bool {
        let folded = self.fold(vector);
        if !folded {
            counters.increment(YEAR_OUT_OF_RANGE);
        }
        folded
    }

    /// Combine with a partial table built over other records.
    pub fn merge(&mut self, other: YearTable) {
        for (year, acc) in other.years {
            self.years.entry(year).or_default().merge(&acc);
        }
    }

    #[must_use]
    pub fn merged(mut self, other: YearTable) -> Self {
        self.merge(other);
        self
    }

    pub fn get(&self, year: i32) -> Option<&Accumulator> {
        self.years.get(&year)
    }

    /// Number of distinct years seen.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Records folded over all years.
    pub fn record_count(&self) -> u64 {
        self.years.values().map(Accumulator::count).sum()
    }

    /// Summary rows in ascending year order.
    pub fn finalize(&self) -> Vec<SummaryRow> {
        self.years
            .iter()
            .filter_map(|(year, acc)| acc.finalize(*year))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(year: i32, valence: f64) -> FeatureVector {
        FeatureVector::new(year, [valence, 0.5, 0.5, 0.5, 0.0, 0.5, -10.0, 0.25, 120.0])
    }

    #[test]
    fn test_year_window() {
        let mut table = YearTable::default();
        let mut counters = QualityCounters::new();
        assert!(table.fold_counted(&vector(1970, 0.4), &mut counters));
        assert!(table.fold_counted(&vector(1970, 0.6), &mut counters));
        assert!(!table.fold_counted(&vector(1900, 0.9), &mut counters));
        assert!(!table.fold_counted(&vector(2021, 0.9), &mut counters));
        assert_eq!(counters.get(YEAR_OUT_OF_RANGE), 2);

        let rows = table.finalize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 1970);
        assert!((rows[0].avg_valence - 0.5).abs() < 1e-12);
        assert_eq!(rows[0].song_count, 2);
    }

    #[test]
    fn test_merge_and_order() {
        let mut a = YearTable::default();
        a.fold(&vector(2001, 0.5));
        a.fold(&vector(1965, 0.5));
        let mut b = YearTable::default();
        b.fold(&vector(1965, 0.25));
        b.fold(&vector(1980, 1.0));

        let merged = a.merged(b);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.record_count(), 4);
        assert_eq!(merged.get(1965).map(Accumulator::count), Some(2));
        let years: Vec<i32> = merged.finalize().iter().map(|row| row.year).collect();
        assert_eq!(years, vec![1965, 1980, 2001]);
    }

    #[test]
    fn test_custom_window() {
        let mut table = YearTable::new(AggregationConfig {
            min_year: 1900,
            max_year: 1950,
        });
        assert!(table.fold(&vector(1900, 0.1)));
        assert!(!table.fold(&vector(1970, 0.1)));
    }
}
