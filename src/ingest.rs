//! Schema-checked ingestion of song tables.
//!
//! The input is any table with at least a lyrics column, a song-name column
//! and an artist column (names from [`ColumnNames`]). Extra columns are
//! ignored; missing cells become empty strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ColumnNames;
use crate::error::IngestError;

/// One raw input row, before mood tagging and indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub text: String,
    pub name: String,
    pub artist: String,
}

impl SongRecord {
    pub fn new(name: &str, artist: &str, text: &str) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
            artist: artist.into(),
        }
    }
}

/// Fail with every required column that `available` lacks.
pub(crate) fn check_columns(
    columns: &ColumnNames,
    available: impl Fn(&str) -> bool,
) -> Result<(), IngestError> {
    let missing: Vec<String> = columns
        .required()
        .iter()
        .filter(|c| !available(*c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns { missing })
    }
}

/// Read a CSV file with a header row.
pub fn read_csv_path(path: &Path, columns: &ColumnNames) -> Result<Vec<SongRecord>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = read_csv(file, columns)?;
    info!("Loaded {} songs from {}", records.len(), path.display());
    Ok(records)
}

/// Read CSV data with a header row. Short rows are padded with empty cells.
pub fn read_csv<R: Read>(reader: R, columns: &ColumnNames) -> Result<Vec<SongRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    check_columns(columns, |c| position(c).is_some())?;
    let [text_idx, name_idx, artist_idx] = columns.required().map(position);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("").to_string();
        records.push(SongRecord {
            text: cell(text_idx),
            name: cell(name_idx),
            artist: cell(artist_idx),
        });
    }
    debug!(rows = records.len(), "parsed CSV");
    Ok(records)
}

/// Convert JSON objects into records. A column counts as present when any
/// row carries it. Null and absent cells become `""`; other non-string
/// cells use their JSON rendering.
pub fn from_json_rows(rows: &[Value], columns: &ColumnNames) -> Result<Vec<SongRecord>, IngestError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    check_columns(columns, |c| rows.iter().any(|r| r.get(c).is_some()))?;

    Ok(rows
        .iter()
        .map(|row| SongRecord {
            text: cell_text(row, &columns.text),
            name: cell_text(row, &columns.name),
            artist: cell_text(row, &columns.artist),
        })
        .collect())
}

fn cell_text(row: &Value, field: &str) -> String {
    match row.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
