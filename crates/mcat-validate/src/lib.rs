//! Structural validation of weekly chart records.
//!
//! Unlike catalog cleaning, chart records are never repaired field by field:
//! a record either passes every check or is rejected with a [`RejectReason`]
//! that the caller counts and moves past.

pub mod chart;
pub mod reason;

pub use chart::{ChartLine, ChartRecord, ChartValidator, is_valid_chart_date};
pub use reason::RejectReason;
