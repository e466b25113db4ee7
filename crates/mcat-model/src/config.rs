//! Job configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an
//! empty file (or no file) yields the standard job.
//!
//! ```toml
//! delimiter = ","
//! chunk_size = 10000
//! threads = 4
//!
//! [aggregation]
//! min_year = 1960
//! max_year = 2020
//!
//! [rules.tempo]
//! max = 250.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default number of lines per parallel work unit.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Settings for one cleaning or aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Field delimiter.
    pub delimiter: char,
    /// Lines per parallel work unit.
    pub chunk_size: usize,
    /// Worker threads; `None` uses the rayon default.
    pub threads: Option<usize>,
    /// Year window for the aggregation stage.
    pub aggregation: AggregationConfig,
    /// Per-field overrides of the built-in catalog rules, keyed by column name.
    pub rules: BTreeMap<String, RuleOverride>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: None,
            aggregation: AggregationConfig::default(),
            rules: BTreeMap::new(),
        }
    }
}

/// Years that participate in aggregation (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregationConfig {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            min_year: 1960,
            max_year: 2020,
        }
    }
}

impl AggregationConfig {
    pub fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

/// Replacement bounds/default for a numeric or integer rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: Option<f64>,
}

impl RuleOverride {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.default.is_none()
    }
}

impl JobConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Check settings that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter {
                delimiter: self.delimiter,
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.aggregation.min_year > self.aggregation.max_year {
            return Err(ConfigError::InvalidYearRange {
                min_year: self.aggregation.min_year,
                max_year: self.aggregation.max_year,
            });
        }
        Ok(())
    }
}
