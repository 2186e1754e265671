//! Shared operation wrappers for all interfaces (CLI, MCP, plugin).
//!
//! Each `op_*` function is a pure, synchronous wrapper over the catalog and
//! recommender. Output is `serde_json::Value`, with no dependency on rmcp,
//! clap, or nu-plugin.
//!
//! Query results use one response shape everywhere:
//! `{"recommendations": [...]}` on success, `{"error": "..."}` when the
//! query matched nothing.

use std::path::Path;

use serde_json::{json, Value};

use crate::algo::mood::{self, MoodClassifier};
use crate::config::RecommenderConfig;
use crate::error::NotFound;
use crate::ingest;
use crate::service::Recommender;

// ── Loading ──────────────────────────────────────────────────────────────────

/// Build a recommender from a CSV file, using the resolved default lexicon.
pub fn load_csv(path: &Path, config: &RecommenderConfig) -> Result<Recommender, String> {
    load_csv_with(path, config, mood::default_classifier())
}

/// Build a recommender from a CSV file with an explicit classifier.
pub fn load_csv_with(
    path: &Path,
    config: &RecommenderConfig,
    classifier: MoodClassifier,
) -> Result<Recommender, String> {
    let records = ingest::read_csv_path(path, &config.columns).map_err(|e| e.to_string())?;
    Ok(Recommender::from_records(records, classifier, config))
}

/// Build a recommender from JSON records with an explicit classifier.
pub fn load_rows(
    rows: &[Value],
    config: &RecommenderConfig,
    classifier: MoodClassifier,
) -> Result<Recommender, String> {
    let records = ingest::from_json_rows(rows, &config.columns).map_err(|e| e.to_string())?;
    Ok(Recommender::from_records(records, classifier, config))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Render a query outcome as a response body.
pub fn recommendations(result: Result<Vec<String>, NotFound>) -> Value {
    match result {
        Ok(names) => json!({ "recommendations": names }),
        Err(e) => not_found(&e),
    }
}

fn not_found(e: &NotFound) -> Value {
    json!({ "error": e.to_string() })
}

/// Whether a response body is a not-found signal.
pub fn is_not_found(body: &Value) -> bool {
    body.get("error").is_some()
}

// ── Operations ───────────────────────────────────────────────────────────────

pub fn op_recommend_song(rec: &Recommender, name: &str) -> Value {
    recommendations(rec.recommend_by_song(name))
}

pub fn op_recommend_artist(rec: &Recommender, artist: &str) -> Value {
    recommendations(rec.recommend_by_artist(artist))
}

pub fn op_recommend_mood(rec: &Recommender, mood: &str) -> Value {
    recommendations(rec.recommend_by_mood(mood))
}

/// Like [`op_recommend_song`] but with artist, mood and cosine score per hit.
pub fn op_similar(rec: &Recommender, name: &str) -> Value {
    match rec.similar_songs(name) {
        Ok(hits) => json!({ "song": name, "similar": hits }),
        Err(e) => not_found(&e),
    }
}

/// Tag each record with a `_mood` column computed from `field`.
pub fn op_classify(rows: &[Value], field: &str, classifier: &MoodClassifier) -> Value {
    let output: Vec<Value> = rows
        .iter()
        .cloned()
        .map(|mut row| {
            let text = row.get(field).and_then(|v| v.as_str()).unwrap_or("");
            let label = classifier.classify(text).to_string();
            if let Some(obj) = row.as_object_mut() {
                obj.insert("_mood".into(), Value::String(label));
            }
            row
        })
        .collect();

    Value::Array(output)
}

/// The lexicon in precedence order.
pub fn op_moods(classifier: &MoodClassifier) -> Value {
    let lexicon = classifier.lexicon();
    json!({
        "name": lexicon.name,
        "version": lexicon.version,
        "moods": lexicon.moods,
        "fallback": mood::UNKNOWN_MOOD,
    })
}

pub fn op_stats(rec: &Recommender) -> Value {
    serde_json::to_value(rec.stats()).unwrap_or(Value::Null)
}
