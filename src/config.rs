use serde::{Deserialize, Serialize};

/// Result cap for every recommendation query.
pub const DEFAULT_LIMIT: usize = 100;

/// Names of the input columns holding lyrics, song name and artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub text: String,
    pub name: String,
    pub artist: String,
}

impl ColumnNames {
    pub fn required(&self) -> [&str; 3] {
        [&self.text, &self.name, &self.artist]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            text: "text".into(),
            name: "song".into(),
            artist: "artist".into(),
        }
    }
}

/// Settings for building and querying a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Maximum number of names returned per query.
    pub limit: usize,
    pub columns: ColumnNames,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            columns: ColumnNames::default(),
        }
    }
}
