use thiserror::Error;

/// Failures while turning a tabular source into song records. Fatal at
/// startup: nothing is served from a catalog that failed to ingest.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Missing columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Problems with a mood lexicon definition.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to parse lexicon: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lexicon has no moods")]
    Empty,

    #[error("Mood '{0}' has no keywords")]
    NoKeywords(String),

    #[error("Mood label '{0}' is reserved")]
    ReservedLabel(String),

    #[error("Duplicate mood label '{0}'")]
    DuplicateLabel(String),

    #[error("Invalid keyword pattern for mood '{label}': {source}")]
    Pattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}

/// A query that resolved to nothing. This is an expected outcome, not a
/// system failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("Song not found.")]
    Song(String),

    #[error("No songs found.")]
    Artist(String),

    #[error("No songs found.")]
    Mood(String),
}
