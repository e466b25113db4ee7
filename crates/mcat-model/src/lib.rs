//! Music catalog data model.
//!
//! Shared types for the cleaning and aggregation crates:
//!
//! - **Schemas**: column order of the catalog (19 columns) and chart (7+1 columns) inputs
//! - **Field rules**: declarative per-column sanitization rules
//! - **Outcomes**: the result attached to every field decision
//! - **Counters**: additive quality telemetry, mergeable across workers
//! - **Configuration**: job settings loaded from TOML

pub mod config;
pub mod counters;
pub mod error;
pub mod outcome;
pub mod rule;
pub mod schema;

pub use config::{AggregationConfig, JobConfig, RuleOverride};
pub use counters::QualityCounters;
pub use error::{ConfigError, Result};
pub use outcome::CleaningOutcome;
pub use rule::{FieldRule, Overflow, Preprocess, RuleKind};
pub use schema::{
    CATALOG_COLUMN_COUNT, CATALOG_HEADER_TOKEN, CHART_FIELD_CAP, CHART_HEADER,
    CHART_OUTPUT_COLUMN_COUNT, CatalogColumn, ChartColumn, LAST_WEEK_NULL_MARKER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_serialize_as_flat_map() {
        let mut counters = QualityCounters::new();
        counters.increment("VALENCE_CLIPPED");
        counters.increment("VALENCE_CLIPPED");
        counters.increment("KEY_MOD_12");

        let json = serde_json::to_string(&counters).expect("serialize counters");
        assert_eq!(json, r#"{"KEY_MOD_12":1,"VALENCE_CLIPPED":2}"#);

        let round: QualityCounters = serde_json::from_str(&json).expect("deserialize counters");
        assert_eq!(round, counters);
    }
}
