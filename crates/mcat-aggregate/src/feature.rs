//! Audio feature vectors.

use mcat_model::{CATALOG_COLUMN_COUNT, CatalogColumn};
use mcat_transform::{parse_float, parse_integer};
use thiserror::Error;

/// Number of averaged audio features.
pub const FEATURE_COUNT: usize = 9;

/// Averaged audio features, in summary column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Valence,
    Danceability,
    Energy,
    Acousticness,
    Instrumentalness,
    Liveness,
    Loudness,
    Speechiness,
    Tempo,
}

impl Feature {
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Valence,
        Self::Danceability,
        Self::Energy,
        Self::Acousticness,
        Self::Instrumentalness,
        Self::Liveness,
        Self::Loudness,
        Self::Speechiness,
        Self::Tempo,
    ];

    /// Catalog column the feature is read from.
    pub fn column(self) -> CatalogColumn {
        match self {
            Self::Valence => CatalogColumn::Valence,
            Self::Danceability => CatalogColumn::Danceability,
            Self::Energy => CatalogColumn::Energy,
            Self::Acousticness => CatalogColumn::Acousticness,
            Self::Instrumentalness => CatalogColumn::Instrumentalness,
            Self::Liveness => CatalogColumn::Liveness,
            Self::Loudness => CatalogColumn::Loudness,
            Self::Speechiness => CatalogColumn::Speechiness,
            Self::Tempo => CatalogColumn::Tempo,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Why a catalog record could not become a feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("expected at least 19 fields, got {observed}")]
    TooFewFields { observed: usize },
    #[error("{column} is not a number")]
    NotNumeric { column: &'static str },
}

impl FeatureError {
    /// Quality counter for a record skipped by the aggregation stage.
    pub fn counter_name(&self) -> &'static str {
        "FEATURE_PARSE_ERR"
    }
}

/// The 9 audio features of one record plus its year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub year: i32,
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(year: i32, values: [f64; FEATURE_COUNT]) -> Self {
        Self { year, values }
    }

    /// Read the year and features from catalog-ordered fields.
    ///
    /// Parsing is strict: any unparsable or non-finite feature, or an
    /// unparsable year, rejects the record.
    /// Fields past the 19th are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, FeatureError> {
        if fields.len() < CATALOG_COLUMN_COUNT {
            return Err(FeatureError::TooFewFields {
                observed: fields.len(),
            });
        }
        let field = |column: CatalogColumn| fields[column.index()].as_ref();

        let year = parse_integer(field(CatalogColumn::Year))
            .and_then(|year| i32::try_from(year).ok())
            .ok_or(FeatureError::NotNumeric {
                column: CatalogColumn::Year.name(),
            })?;

        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let column = feature.column();
            values[feature.index()] = parse_float(field(column))
                .filter(|value| value.is_finite())
                .ok_or(FeatureError::NotNumeric {
                    column: column.name(),
                })?;
        }
        Ok(Self { year, values })
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> Vec<&str> {
        line.split(',').collect()
    }

    #[test]
    fn test_from_fields() {
        let fields = row("0.5,1969,0.3,x,0.6,200000,0.7,1,abc,0.1,1,0.2,-60.0,1,y,55,1969,0.9,50.0");
        let vector = FeatureVector::from_fields(&fields).unwrap();
        assert_eq!(vector.year, 1969);
        assert_eq!(
            vector.values,
            [0.5, 0.6, 0.7, 0.3, 0.1, 0.2, -60.0, 0.9, 50.0]
        );
        assert_eq!(vector.get(Feature::Loudness), -60.0);
    }

    #[test]
    fn test_from_fields_errors() {
        assert_eq!(
            FeatureVector::from_fields(&row("0.5,1969")),
            Err(FeatureError::TooFewFields { observed: 2 })
        );

        let bad_year = row("0.5,1969.0,0.3,x,0.6,1,0.7,1,a,0.1,1,0.2,-6,1,y,5,1969,0.9,50");
        assert_eq!(
            FeatureVector::from_fields(&bad_year),
            Err(FeatureError::NotNumeric { column: "year" })
        );

        let bad_tempo = row("0.5,1969,0.3,x,0.6,1,0.7,1,a,0.1,1,0.2,-6,1,y,5,1969,0.9,");
        let err = FeatureVector::from_fields(&bad_tempo).unwrap_err();
        assert_eq!(err.to_string(), "tempo is not a number");
        assert_eq!(err.counter_name(), "FEATURE_PARSE_ERR");
    }

    #[test]
    fn test_from_fields_rejects_infinite_features() {
        let loud = row("0.5,1969,0.3,x,0.6,1,0.7,1,a,0.1,1,0.2,inf,1,y,5,1969,0.9,50");
        let err = FeatureVector::from_fields(&loud).unwrap_err();
        assert_eq!(err, FeatureError::NotNumeric { column: "loudness" });
        assert_eq!(err.counter_name(), "FEATURE_PARSE_ERR");

        let tempo = row("0.5,1969,0.3,x,0.6,1,0.7,1,a,0.1,1,0.2,-6,1,y,5,1969,0.9,-infinity");
        assert_eq!(
            FeatureVector::from_fields(&tempo),
            Err(FeatureError::NotNumeric { column: "tempo" })
        );
    }
}
