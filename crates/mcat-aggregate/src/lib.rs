//! Per-year aggregation of audio features.
//!
//! Records are reduced to a [`FeatureVector`], folded into an
//! [`Accumulator`] per year inside a [`YearTable`], and finalized into
//! [`SummaryRow`]s. Tables built over disjoint chunks of the input merge
//! into the same result regardless of how the input was split.

pub mod accumulator;
pub mod feature;
pub mod lines;
pub mod summary;
pub mod table;

pub use accumulator::Accumulator;
pub use feature::{FEATURE_COUNT, Feature, FeatureError, FeatureVector};
pub use lines::{LineAggregator, LineFold};
pub use summary::{SUMMARY_COLUMNS, SummaryRow};
pub use table::{YEAR_OUT_OF_RANGE, YearTable};
