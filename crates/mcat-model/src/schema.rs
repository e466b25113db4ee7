//! Column layouts of the two record shapes.

/// Number of columns in a catalog record.
pub const CATALOG_COLUMN_COUNT: usize = 19;

/// Leading token that identifies a catalog header line (case-insensitive).
pub const CATALOG_HEADER_TOKEN: &str = "valence";

/// Header written for cleaned chart output.
pub const CHART_HEADER: &str = "Date,Song,Artist,Rank,Last Week,Peak Position,Weeks in Charts";

/// Maximum number of fields read from a chart line (7 columns plus one ignored trailer).
pub const CHART_FIELD_CAP: usize = 8;

/// Number of columns in cleaned chart output.
pub const CHART_OUTPUT_COLUMN_COUNT: usize = 7;

/// Explicit null marker for an absent "Last Week" rank.
pub const LAST_WEEK_NULL_MARKER: &str = "NULL";

/// Catalog columns in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogColumn {
    Valence,
    Year,
    Acousticness,
    Artists,
    Danceability,
    DurationMs,
    Energy,
    Explicit,
    Id,
    Instrumentalness,
    Key,
    Liveness,
    Loudness,
    Mode,
    Name,
    Popularity,
    ReleaseDate,
    Speechiness,
    Tempo,
}

impl CatalogColumn {
    pub const ALL: [Self; CATALOG_COLUMN_COUNT] = [
        Self::Valence,
        Self::Year,
        Self::Acousticness,
        Self::Artists,
        Self::Danceability,
        Self::DurationMs,
        Self::Energy,
        Self::Explicit,
        Self::Id,
        Self::Instrumentalness,
        Self::Key,
        Self::Liveness,
        Self::Loudness,
        Self::Mode,
        Self::Name,
        Self::Popularity,
        Self::ReleaseDate,
        Self::Speechiness,
        Self::Tempo,
    ];

    /// Zero-based position in the record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Year => "year",
            Self::Acousticness => "acousticness",
            Self::Artists => "artists",
            Self::Danceability => "danceability",
            Self::DurationMs => "duration_ms",
            Self::Energy => "energy",
            Self::Explicit => "explicit",
            Self::Id => "id",
            Self::Instrumentalness => "instrumentalness",
            Self::Key => "key",
            Self::Liveness => "liveness",
            Self::Loudness => "loudness",
            Self::Mode => "mode",
            Self::Name => "name",
            Self::Popularity => "popularity",
            Self::ReleaseDate => "release_date",
            Self::Speechiness => "speechiness",
            Self::Tempo => "tempo",
        }
    }

    /// Look up a column by header name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(name))
    }
}

/// Chart columns in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartColumn {
    Date,
    Song,
    Artist,
    Rank,
    LastWeek,
    PeakPosition,
    WeeksInCharts,
}

impl ChartColumn {
    pub const ALL: [Self; CHART_OUTPUT_COLUMN_COUNT] = [
        Self::Date,
        Self::Song,
        Self::Artist,
        Self::Rank,
        Self::LastWeek,
        Self::PeakPosition,
        Self::WeeksInCharts,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Song => "Song",
            Self::Artist => "Artist",
            Self::Rank => "Rank",
            Self::LastWeek => "Last Week",
            Self::PeakPosition => "Peak Position",
            Self::WeeksInCharts => "Weeks in Charts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_index() {
        for (idx, column) in CatalogColumn::ALL.into_iter().enumerate() {
            assert_eq!(column.index(), idx);
        }
        assert_eq!(CatalogColumn::Id.index(), 8);
        assert_eq!(CatalogColumn::Tempo.index(), 18);
    }

    #[test]
    fn test_catalog_from_name() {
        assert_eq!(CatalogColumn::from_name("Loudness"), Some(CatalogColumn::Loudness));
        assert_eq!(CatalogColumn::from_name(" release_date "), Some(CatalogColumn::ReleaseDate));
        assert_eq!(CatalogColumn::from_name("bpm"), None);
    }

    #[test]
    fn test_chart_header_matches_columns() {
        let joined = ChartColumn::ALL
            .into_iter()
            .map(ChartColumn::name)
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(joined, CHART_HEADER);
    }
}
