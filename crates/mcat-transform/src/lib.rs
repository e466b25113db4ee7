//! Field sanitization for music catalog records.
//!
//! - [`sanitize`]: one raw value plus one [`mcat_model::FieldRule`] in, a
//!   cleaned value and its [`mcat_model::CleaningOutcome`] out
//! - [`CatalogRules`]: the declarative rule table for the 19 catalog columns,
//!   with optional per-field overrides from the job configuration
//! - [`CatalogCleaner`]: applies the table to whole catalog lines

pub mod catalog;
pub mod normalization;
pub mod rules;
pub mod sanitize;

pub use catalog::{CatalogCleaner, CatalogLine, CatalogSkip};
pub use normalization::{parse_binary, parse_float, parse_integer};
pub use rules::CatalogRules;
pub use sanitize::{Sanitized, sanitize, sanitize_counted};
