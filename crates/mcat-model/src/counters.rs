//! Quality telemetry counters.
//!
//! Each worker keeps its own [`QualityCounters`] and the caller merges them
//! by addition when the job ends. Counters are plain values: no locks, no
//! global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::outcome::CleaningOutcome;
use crate::rule::FieldRule;

/// Mapping from counter name to occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityCounters {
    counts: BTreeMap<String, u64>,
}

impl QualityCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `name` by one.
    pub fn increment(&mut self, name: &str) {
        self.add(name, 1);
    }

    /// Increment `name` by `amount`.
    pub fn add(&mut self, name: &str, amount: u64) {
        if let Some(count) = self.counts.get_mut(name) {
            *count += amount;
        } else {
            self.counts.insert(name.to_string(), amount);
        }
    }

    /// Count the outcome of one field decision. `Ok` is not counted.
    pub fn record(&mut self, rule: &FieldRule, outcome: CleaningOutcome) {
        if let Some(name) = rule.counter_name(outcome) {
            self.add(&name, 1);
        }
    }

    /// Fold another worker's counters into this one.
    pub fn merge(&mut self, other: QualityCounters) {
        for (name, count) in other.counts {
            *self.counts.entry(name).or_insert(0) += count;
        }
    }

    /// Combine two counter sets. Associative and commutative.
    #[must_use]
    pub fn merged(mut self, other: QualityCounters) -> Self {
        self.merge(other);
        self
    }

    /// Count for `name`, zero when never incremented.
    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Sum over all counters.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for QualityCounters {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counters = Self::new();
        for (name, count) in iter {
            counters.add(&name, count);
        }
        counters
    }
}
