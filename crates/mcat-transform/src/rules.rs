//! Declarative rule table for the catalog schema.

use std::collections::BTreeMap;

use mcat_model::{CatalogColumn, ConfigError, FieldRule, Preprocess, RuleKind, RuleOverride};

/// One rule per catalog column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRules {
    rules: Vec<FieldRule>,
}

impl Default for CatalogRules {
    fn default() -> Self {
        let rules = CatalogColumn::ALL.into_iter().map(default_rule).collect();
        Self { rules }
    }
}

fn default_rule(column: CatalogColumn) -> FieldRule {
    let name = column.name();
    match column {
        CatalogColumn::Valence => FieldRule::numeric(name, "VALENCE", 0.0, 1.0, 0.5),
        CatalogColumn::Year => FieldRule::integer(name, "YEAR", 1921, 2020, 2000),
        CatalogColumn::Acousticness => FieldRule::numeric(name, "ACOUSTIC", 0.0, 1.0, 0.5),
        CatalogColumn::Artists => FieldRule::text(name, "ARTISTS", "Unknown Artist"),
        CatalogColumn::Danceability => FieldRule::numeric(name, "DANCE", 0.0, 0.99, 0.5),
        CatalogColumn::DurationMs => FieldRule::integer(name, "DUR", 5108, 5_400_000, 180_000),
        CatalogColumn::Energy => FieldRule::numeric(name, "ENERGY", 0.0, 1.0, 0.5),
        CatalogColumn::Explicit => FieldRule::binary(name, "EXPL"),
        CatalogColumn::Id => FieldRule::identifier(name, "ID"),
        CatalogColumn::Instrumentalness => FieldRule::numeric(name, "INSTR", 0.0, 1.0, 0.0),
        CatalogColumn::Key => FieldRule::integer(name, "KEY", 0, 11, 0).wrapping(),
        CatalogColumn::Liveness => FieldRule::numeric(name, "LIVENESS", 0.0, 1.0, 0.5),
        CatalogColumn::Loudness => FieldRule::numeric(name, "LOUD", -60.0, 3.85, -10.0),
        CatalogColumn::Mode => FieldRule::binary(name, "MODE"),
        CatalogColumn::Name => FieldRule::text(name, "NAME", "Unknown Title"),
        CatalogColumn::Popularity => FieldRule::integer(name, "POP", 0, 100, 50),
        CatalogColumn::ReleaseDate => FieldRule::integer(name, "RELDATE", 1921, 2020, 1970)
            .with_preprocess(Preprocess::LeadingYear),
        CatalogColumn::Speechiness => FieldRule::numeric(name, "SPEECH", 0.0, 0.97, 0.48),
        CatalogColumn::Tempo => FieldRule::numeric(name, "TEMPO", 0.0, 244.0, 120.0),
    }
}

impl CatalogRules {
    /// Built-in table with `overrides` applied on top.
    ///
    /// Overrides are keyed by column name (case-insensitive) and may only
    /// target numeric or integer rules.
    pub fn with_overrides(
        overrides: &BTreeMap<String, RuleOverride>,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::default();
        for (field, rule_override) in overrides {
            if rule_override.is_empty() {
                continue;
            }
            let column = CatalogColumn::from_name(field).ok_or_else(|| ConfigError::UnknownField {
                field: field.clone(),
            })?;
            let rule = &mut table.rules[column.index()];
            apply_override(rule, rule_override)?;
            tracing::debug!(field = rule.column, bounds = ?rule.bounds_label(), "applied rule override");
        }
        Ok(table)
    }

    /// Rule for `column`.
    pub fn get(&self, column: CatalogColumn) -> &FieldRule {
        &self.rules[column.index()]
    }

    /// Rules in column order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn apply_override(rule: &mut FieldRule, rule_override: &RuleOverride) -> Result<(), ConfigError> {
    let field = rule.column.to_string();
    match &mut rule.kind {
        RuleKind::Numeric { min, max, default } => {
            let new_min = rule_override.min.unwrap_or(*min);
            let new_max = rule_override.max.unwrap_or(*max);
            let new_default = rule_override.default.unwrap_or(*default);
            check_bounds(&field, new_min, new_max, new_default)?;
            *min = new_min;
            *max = new_max;
            *default = new_default;
        }
        RuleKind::Integer {
            min, max, default, ..
        } => {
            let new_min = whole(&field, rule_override.min)?.unwrap_or(*min);
            let new_max = whole(&field, rule_override.max)?.unwrap_or(*max);
            let new_default = whole(&field, rule_override.default)?.unwrap_or(*default);
            check_bounds(&field, new_min as f64, new_max as f64, new_default as f64)?;
            *min = new_min;
            *max = new_max;
            *default = new_default;
        }
        RuleKind::Binary { .. } | RuleKind::Text { .. } | RuleKind::Identifier => {
            return Err(ConfigError::NotNumeric { field });
        }
    }
    Ok(())
}

fn whole(field: &str, value: Option<f64>) -> Result<Option<i64>, ConfigError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 => Ok(Some(v as i64)),
        Some(v) => Err(ConfigError::NotInteger {
            field: field.to_string(),
            value: v,
        }),
    }
}

fn check_bounds(field: &str, min: f64, max: f64, default: f64) -> Result<(), ConfigError> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(ConfigError::InvalidBounds {
            field: field.to_string(),
            min,
            max,
        });
    }
    if !(min..=max).contains(&default) {
        return Err(ConfigError::DefaultOutOfBounds {
            field: field.to_string(),
            default,
            min,
            max,
        });
    }
    Ok(())
}
