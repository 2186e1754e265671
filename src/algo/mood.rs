use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::tokenizer;
use crate::error::LexiconError;

/// Embedded default lexicon, compiled from `lexicons/moods.json`.
/// Users override by placing a file at `$XDG_DATA_HOME/songrec/lexicon.json`
/// or pointing `$SONGREC_LEXICON` at one.
const EMBEDDED_DEFAULT: &str = include_str!("../../lexicons/moods.json");

/// Label assigned when no mood's keywords occur in the text.
pub const UNKNOWN_MOOD: &str = "unknown";

/// One mood and the words that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub label: String,
    pub keywords: Vec<String>,
}

/// An ordered mood lexicon. Declaration order decides which mood wins when
/// a text triggers several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodLexicon {
    pub name: String,
    pub version: String,
    pub moods: Vec<MoodEntry>,
}

impl MoodLexicon {
    /// Mood labels in declaration order.
    pub fn labels(&self) -> Vec<&str> {
        self.moods.iter().map(|m| m.label.as_str()).collect()
    }

    /// The embedded default lexicon, ignoring any user override.
    pub fn embedded() -> Self {
        parse_lexicon(EMBEDDED_DEFAULT).expect("embedded default lexicon is invalid JSON")
    }
}

/// Keyword-based mood tagger over a validated lexicon.
///
/// Each mood compiles to a single `\b(?:kw1|kw2|...)\b` pattern, so a
/// keyword only matches as a whole word ("dark" does not fire inside
/// "darkness") and multi-word keywords match as a literal phrase.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    lexicon: MoodLexicon,
    patterns: Vec<Regex>,
}

impl MoodClassifier {
    /// Validate the lexicon and compile its patterns. Labels and keywords
    /// are lowercased.
    pub fn new(mut lexicon: MoodLexicon) -> Result<Self, LexiconError> {
        if lexicon.moods.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut seen = HashSet::new();
        let mut patterns = Vec::with_capacity(lexicon.moods.len());
        for mood in &mut lexicon.moods {
            mood.label = tokenizer::normalize(mood.label.trim());
            if mood.label.is_empty() || mood.label == UNKNOWN_MOOD {
                return Err(LexiconError::ReservedLabel(mood.label.clone()));
            }
            if !seen.insert(mood.label.clone()) {
                return Err(LexiconError::DuplicateLabel(mood.label.clone()));
            }

            mood.keywords = mood
                .keywords
                .iter()
                .map(|k| tokenizer::normalize(k.trim()))
                .filter(|k| !k.is_empty())
                .collect();
            if mood.keywords.is_empty() {
                return Err(LexiconError::NoKeywords(mood.label.clone()));
            }

            let alternation = mood
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"\b(?:{alternation})\b")).map_err(|source| {
                LexiconError::Pattern {
                    label: mood.label.clone(),
                    source,
                }
            })?;
            patterns.push(pattern);
        }

        Ok(Self { lexicon, patterns })
    }

    /// Label of the first mood (in lexicon order) with a keyword in `text`,
    /// or [`UNKNOWN_MOOD`].
    pub fn classify(&self, text: &str) -> &str {
        let lower = tokenizer::normalize(text);
        self.lexicon
            .moods
            .iter()
            .zip(&self.patterns)
            .find(|(_, pattern)| pattern.is_match(&lower))
            .map(|(mood, _)| mood.label.as_str())
            .unwrap_or(UNKNOWN_MOOD)
    }

    pub fn lexicon(&self) -> &MoodLexicon {
        &self.lexicon
    }

    /// Whether `label` is a lexicon label or [`UNKNOWN_MOOD`].
    pub fn is_label(&self, label: &str) -> bool {
        label == UNKNOWN_MOOD || self.lexicon.moods.iter().any(|m| m.label == label)
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(MoodLexicon::embedded()).expect("embedded default lexicon is invalid")
    }
}

/// Resolve the active mood classifier using this order:
///
/// 1. `$SONGREC_LEXICON` env var (path to JSON file)
/// 2. `$XDG_DATA_HOME/songrec/lexicon.json` (user override)
/// 3. `~/.local/share/songrec/lexicon.json` (fallback XDG path)
/// 4. Embedded compile-time default from `lexicons/moods.json`
///
/// A step whose file is unreadable, unparsable or not a valid lexicon is
/// skipped with a warning.
pub fn default_classifier() -> MoodClassifier {
    let env_path = std::env::var_os("SONGREC_LEXICON").map(PathBuf::from);
    let xdg_path = xdg_lexicon_path(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    );
    resolve_classifier(env_path.as_deref(), xdg_path.as_deref())
}

fn resolve_classifier(env_path: Option<&Path>, xdg_path: Option<&Path>) -> MoodClassifier {
    if let Some(path) = env_path {
        match load_classifier(path) {
            Ok(c) => {
                info!("Using mood lexicon from SONGREC_LEXICON: {}", path.display());
                return c;
            }
            Err(e) => warn!("ignoring SONGREC_LEXICON: {e}"),
        }
    }

    if let Some(path) = xdg_path.filter(|p| p.exists()) {
        match load_classifier(path) {
            Ok(c) => {
                info!("Using mood lexicon from {}", path.display());
                return c;
            }
            Err(e) => warn!("ignoring {}: {e}", path.display()),
        }
    }

    MoodClassifier::default()
}

fn load_classifier(path: &Path) -> Result<MoodClassifier, LexiconError> {
    MoodClassifier::new(load_lexicon(path)?)
}

/// Parse a lexicon from a JSON string.
pub fn parse_lexicon(json: &str) -> Result<MoodLexicon, LexiconError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a lexicon from a file path.
pub fn load_lexicon(path: &Path) -> Result<MoodLexicon, LexiconError> {
    let json = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_lexicon(&json)
}

fn xdg_lexicon_path(data_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let data_home = data_home.or_else(|| home.map(|h| h.join(".local/share")))?;
    Some(data_home.join("songrec/lexicon.json"))
}
