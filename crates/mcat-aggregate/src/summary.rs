//! Finalized per-year averages.

use serde::Serialize;

use crate::feature::{FEATURE_COUNT, Feature};

/// Columns of the aggregation output, matching the field order of [`SummaryRow`].
pub const SUMMARY_COLUMNS: [&str; 11] = [
    "year",
    "avg_valence",
    "avg_danceability",
    "avg_energy",
    "avg_acousticness",
    "avg_instrumentalness",
    "avg_liveness",
    "avg_loudness",
    "avg_speechiness",
    "avg_tempo",
    "song_count",
];

/// One output row: the average of every feature for one year.
///
/// Field order is the output column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    pub year: i32,
    pub avg_valence: f64,
    pub avg_danceability: f64,
    pub avg_energy: f64,
    pub avg_acousticness: f64,
    pub avg_instrumentalness: f64,
    pub avg_liveness: f64,
    pub avg_loudness: f64,
    pub avg_speechiness: f64,
    pub avg_tempo: f64,
    pub song_count: u64,
}

impl SummaryRow {
    /// Build a row from averages in [`Feature::ALL`] order.
    pub fn new(year: i32, averages: [f64; FEATURE_COUNT], song_count: u64) -> Self {
        let avg = |feature: Feature| averages[feature.index()];
        Self {
            year,
            avg_valence: avg(Feature::Valence),
            avg_danceability: avg(Feature::Danceability),
            avg_energy: avg(Feature::Energy),
            avg_acousticness: avg(Feature::Acousticness),
            avg_instrumentalness: avg(Feature::Instrumentalness),
            avg_liveness: avg(Feature::Liveness),
            avg_loudness: avg(Feature::Loudness),
            avg_speechiness: avg(Feature::Speechiness),
            avg_tempo: avg(Feature::Tempo),
            song_count,
        }
    }
}
