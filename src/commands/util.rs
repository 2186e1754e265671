use nu_protocol::{LabeledError, PipelineData, Record, Signature, Span, SyntaxShape, Value};

use crate::algo::mood;
use crate::config::{ColumnNames, RecommenderConfig, DEFAULT_LIMIT};
use crate::error::{IngestError, NotFound};
use crate::ingest::{self, SongRecord};
use crate::service::Recommender;

/// Add the flags shared by every catalog query command.
pub fn catalog_flags(sig: Signature) -> Signature {
    sig.named(
        "text-field",
        SyntaxShape::String,
        "Column containing lyrics (default: text)",
        None,
    )
    .named(
        "name-field",
        SyntaxShape::String,
        "Column containing the song name (default: song)",
        None,
    )
    .named(
        "artist-field",
        SyntaxShape::String,
        "Column containing the artist (default: artist)",
        None,
    )
    .named(
        "limit",
        SyntaxShape::Int,
        "Maximum number of results (default: 100)",
        Some('n'),
    )
}

fn config_from_call(call: &nu_plugin::EvaluatedCall) -> Result<RecommenderConfig, LabeledError> {
    let defaults = ColumnNames::default();
    let columns = ColumnNames {
        text: call.get_flag::<String>("text-field")?.unwrap_or(defaults.text),
        name: call.get_flag::<String>("name-field")?.unwrap_or(defaults.name),
        artist: call
            .get_flag::<String>("artist-field")?
            .unwrap_or(defaults.artist),
    };
    let limit = call
        .get_flag::<i64>("limit")?
        .map(|n| n.max(0) as usize)
        .unwrap_or(DEFAULT_LIMIT);
    Ok(RecommenderConfig { limit, columns })
}

/// Turn a piped table into song records. A column counts as present when
/// any row carries it; missing or non-string cells become `""`.
pub fn records_from_rows(
    rows: &[Value],
    columns: &ColumnNames,
) -> Result<Vec<SongRecord>, IngestError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    ingest::check_columns(columns, |c| {
        rows.iter().any(|r| r.get_data_by_key(c).is_some())
    })?;

    Ok(rows
        .iter()
        .map(|row| SongRecord {
            text: cell_text(row, &columns.text),
            name: cell_text(row, &columns.name),
            artist: cell_text(row, &columns.artist),
        })
        .collect())
}

pub fn cell_text(row: &Value, field: &str) -> String {
    row.get_data_by_key(field)
        .and_then(|v| v.coerce_string().ok())
        .unwrap_or_default()
}

/// Build a recommender over the piped table using the call's flags.
pub fn recommender_from_input(
    call: &nu_plugin::EvaluatedCall,
    input: PipelineData,
) -> Result<Recommender, LabeledError> {
    let config = config_from_call(call)?;
    let rows: Vec<Value> = input.into_iter().collect();
    let records = records_from_rows(&rows, &config.columns)
        .map_err(|e| LabeledError::new(e.to_string()).with_label("invalid song table", call.head))?;
    Ok(Recommender::from_records(
        records,
        mood::default_classifier(),
        &config,
    ))
}

/// Render a query outcome: a list of names, or an `{error: ...}` record.
pub fn names_or_error(result: Result<Vec<String>, NotFound>, span: Span) -> PipelineData {
    let value = match result {
        Ok(names) => Value::list(
            names.into_iter().map(|n| Value::string(n, span)).collect(),
            span,
        ),
        Err(e) => {
            let mut record = Record::new();
            record.push("error", Value::string(e.to_string(), span));
            Value::record(record, span)
        }
    };
    PipelineData::Value(value, None)
}

/// Append one column to a record Value. Non-records get wrapped first.
pub fn append_column(row: Value, col_name: &str, col_value: Value, span: Span) -> Value {
    match row {
        Value::Record { val, .. } => {
            let mut record = val.into_owned();
            record.push(col_name, col_value);
            Value::record(record, span)
        }
        other => {
            let mut record = Record::new();
            record.push("value", other);
            record.push(col_name, col_value);
            Value::record(record, span)
        }
    }
}
