//! The immutable in-memory song catalog.
//!
//! Built once from ingested records: every song is mood-tagged, the TF-IDF
//! model is fitted over all lyrics, and exact-match lookup tables are filled.
//! Nothing is mutated afterwards, so a `Catalog` behind an `Arc` can serve
//! any number of concurrent readers.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::algo::mood::{MoodClassifier, UNKNOWN_MOOD};
use crate::algo::tfidf::TfidfModel;
use crate::algo::tokenizer;
use crate::ingest::SongRecord;

/// A catalog item. `id` is the row position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: usize,
    pub text: String,
    pub name: String,
    pub artist: String,
    pub normalized_name: String,
    pub mood: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    songs: Vec<Song>,
    /// normalized name -> first song id carrying it
    by_name: HashMap<String, usize>,
    /// lowercased artist -> song ids, insertion order
    by_artist: HashMap<String, Vec<usize>>,
    /// mood label -> song ids, insertion order
    by_mood: HashMap<String, Vec<usize>>,
    model: TfidfModel,
    classifier: MoodClassifier,
}

impl Catalog {
    /// Tag, vectorize and index `records`. When two songs share a
    /// normalized name, name lookup resolves to the first one.
    pub fn build(records: Vec<SongRecord>, classifier: MoodClassifier) -> Self {
        let moods: Vec<String> = records
            .par_iter()
            .map(|r| classifier.classify(&r.text).to_string())
            .collect();

        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let model = TfidfModel::build(&texts);

        let songs: Vec<Song> = records
            .into_iter()
            .zip(moods)
            .enumerate()
            .map(|(id, (record, mood))| Song {
                id,
                normalized_name: tokenizer::normalize(&record.name),
                text: record.text,
                name: record.name,
                artist: record.artist,
                mood,
            })
            .collect();

        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut by_artist: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_mood: HashMap<String, Vec<usize>> = HashMap::new();
        for song in &songs {
            by_name.entry(song.normalized_name.clone()).or_insert(song.id);
            by_artist
                .entry(tokenizer::normalize(&song.artist))
                .or_default()
                .push(song.id);
            by_mood.entry(song.mood.clone()).or_default().push(song.id);
        }

        info!(
            songs = songs.len(),
            artists = by_artist.len(),
            vocabulary = model.dimensions(),
            "catalog built"
        );

        Self {
            songs,
            by_name,
            by_artist,
            by_mood,
            model,
            classifier,
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn model(&self) -> &TfidfModel {
        &self.model
    }

    pub fn classifier(&self) -> &MoodClassifier {
        &self.classifier
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Song> {
        self.by_name
            .get(&tokenizer::normalize(name))
            .map(|&id| &self.songs[id])
    }

    /// Case-insensitive exact artist lookup, in catalog order.
    pub fn find_by_artist(&self, artist: &str) -> Vec<&Song> {
        self.lookup(&self.by_artist, &tokenizer::normalize(artist))
    }

    /// Songs tagged with `mood` (case-insensitive), in catalog order.
    pub fn find_by_mood(&self, mood: &str) -> Vec<&Song> {
        self.lookup(&self.by_mood, &tokenizer::normalize(mood))
    }

    fn lookup(&self, index: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&Song> {
        index
            .get(key)
            .map(|ids| ids.iter().map(|&id| &self.songs[id]).collect())
            .unwrap_or_default()
    }

    pub fn artist_count(&self) -> usize {
        self.by_artist.len()
    }

    /// Song count per mood: lexicon order, then `unknown`.
    pub fn mood_counts(&self) -> Vec<(String, usize)> {
        self.classifier
            .lexicon()
            .labels()
            .into_iter()
            .chain(std::iter::once(UNKNOWN_MOOD))
            .map(|label| {
                let count = self.by_mood.get(label).map_or(0, Vec::len);
                (label.to_string(), count)
            })
            .collect()
    }
}
