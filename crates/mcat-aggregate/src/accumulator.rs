//! Mergeable running sums for one year.
//!
//! `merge` is associative and commutative, so partial accumulators built
//! over disjoint record sets can be combined in any grouping or order.
//! Floating point addition is not exactly associative: a parallel merge may
//! differ from a sequential fold in the last bits of each sum.

use crate::feature::{FEATURE_COUNT, FeatureVector};
use crate::summary::SummaryRow;

/// Running per-feature sums and record count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    sums: [f64; FEATURE_COUNT],
    count: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one feature vector.
    pub fn fold(&mut self, vector: &FeatureVector) {
        for (sum, value) in self.sums.iter_mut().zip(vector.values) {
            *sum += value;
        }
        self.count += 1;
    }

    /// Combine with a partial accumulator for the same year.
    pub fn merge(&mut self, other: &Accumulator) {
        for (sum, value) in self.sums.iter_mut().zip(other.sums) {
            *sum += value;
        }
        self.count += other.count;
    }

    #[must_use]
    pub fn merged(mut self, other: &Accumulator) -> Self {
        self.merge(other);
        self
    }

    pub fn sums(&self) -> &[f64; FEATURE_COUNT] {
        &self.sums
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Averages for `year`, or `None` when nothing was folded.
    pub fn finalize(&self, year: i32) -> Option<SummaryRow> {
        if self.is_empty() {
            return None;
        }
        let count = self.count as f64;
        Some(SummaryRow::new(year, self.sums.map(|sum| sum / count), self.count))
    }
}

impl<'a> FromIterator<&'a FeatureVector> for Accumulator {
    fn from_iter<I: IntoIterator<Item = &'a FeatureVector>>(iter: I) -> Self {
        let mut acc = Self::new();
        for vector in iter {
            acc.fold(vector);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(valence: f64) -> FeatureVector {
        FeatureVector::new(1970, [valence, 0.5, 0.5, 0.5, 0.0, 0.5, -10.0, 0.25, 120.0])
    }

    #[test]
    fn test_fold_and_finalize() {
        let acc: Accumulator = [vector(0.4), vector(0.6)].iter().collect();
        assert_eq!(acc.count(), 2);

        let row = acc.finalize(1970).unwrap();
        assert_eq!(row.year, 1970);
        assert!((row.avg_valence - 0.5).abs() < 1e-12);
        assert_eq!(row.avg_tempo, 120.0);
        assert_eq!(row.song_count, 2);
    }

    #[test]
    fn test_empty_accumulator_has_no_summary() {
        assert!(Accumulator::new().is_empty());
        assert_eq!(Accumulator::new().finalize(1999), None);
    }

    #[test]
    fn test_merge_adds_sums_and_counts() {
        let a: Accumulator = [vector(0.25)].iter().collect();
        let b: Accumulator = [vector(0.5), vector(0.75)].iter().collect();
        let merged = a.merged(&b);
        assert_eq!(merged.count(), 3);
        assert_eq!(merged.sums()[0], 1.5);
        assert_eq!(merged, b.merged(&a));
        assert_eq!(merged.merged(&Accumulator::new()), merged);
    }
}
