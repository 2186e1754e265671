//! CLI integration tests.
//!
//! These tests spawn the `songrec` binary over the fixture catalog and check
//! the JSON printed on stdout along with the exit status.

#![cfg(feature = "cli")]

use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Command;

fn manifest_path(parts: &[&str]) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        path.push(part);
    }
    path.to_string_lossy().into_owned()
}

/// Run `songrec --dataset <fixture> <args>`, returning parsed stdout and
/// the exit code.
fn songrec(args: &[&str]) -> (Value, Option<i32>) {
    songrec_with("songs.csv", args)
}

fn songrec_with(fixture: &str, args: &[&str]) -> (Value, Option<i32>) {
    let bin = manifest_path(&["target", "debug", "songrec"]);
    let output = Command::new(&bin)
        .arg("--dataset")
        .arg(manifest_path(&["tests", "fixtures", fixture]))
        .args(args)
        .env("SONGREC_LEXICON", manifest_path(&["lexicons", "moods.json"]))
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn {bin}: {e}"));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (parsed, output.status.code())
}

#[test]
fn cli_song_not_found_exits_1() {
    let (body, code) = songrec(&["song", "song z"]);
    assert_eq!(body, json!({"error": "Song not found."}));
    assert_eq!(code, Some(1));
}

#[test]
fn cli_artist_not_found_exits_1() {
    let (body, code) = songrec(&["artist", "nobody known"]);
    assert_eq!(body, json!({"error": "No songs found."}));
    assert_eq!(code, Some(1));
}

#[test]
fn cli_artist_success_exits_0() {
    let (body, code) = songrec(&["artist", "X"]);
    assert_eq!(body, json!({"recommendations": ["Song A", "Song B"]}));
    assert_eq!(code, Some(0));
}

#[test]
fn cli_limit_caps_results() {
    let (body, code) = songrec(&["--limit", "2", "song", "forever yours"]);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
    assert_eq!(body["recommendations"][0], "Moonlight Kiss");
    assert_eq!(code, Some(0));
}

#[test]
fn cli_reads_json_dataset() {
    let (body, code) = songrec_with("songs.json", &["mood", "sad"]);
    assert_eq!(body, json!({"recommendations": ["Song A"]}));
    assert_eq!(code, Some(0));
}
