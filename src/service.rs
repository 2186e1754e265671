use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::algo::mood::MoodClassifier;
use crate::algo::{similarity, tokenizer};
use crate::catalog::{Catalog, Song};
use crate::config::RecommenderConfig;
use crate::error::NotFound;
use crate::ingest::SongRecord;

/// A similarity hit with its cosine score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSong {
    pub id: usize,
    pub name: String,
    pub artist: String,
    pub mood: String,
    pub score: f64,
}

/// Summary of a built catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub songs: usize,
    pub artists: usize,
    pub vocabulary: usize,
    pub moods: Vec<MoodCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: usize,
}

/// Read-only query front end over a shared [`Catalog`].
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    limit: usize,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, config: &RecommenderConfig) -> Self {
        Self {
            catalog,
            limit: config.limit,
        }
    }

    /// Build a catalog from records and wrap it.
    pub fn from_records(
        records: Vec<SongRecord>,
        classifier: MoodClassifier,
        config: &RecommenderConfig,
    ) -> Self {
        Self::new(Arc::new(Catalog::build(records, classifier)), config)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn resolve_song(&self, name: &str) -> Result<&Song, NotFound> {
        if name.trim().is_empty() {
            return Err(NotFound::Song(name.to_string()));
        }
        self.catalog
            .find_by_name(name)
            .ok_or_else(|| NotFound::Song(name.to_string()))
    }

    /// Songs most similar to `name` by lyric TF-IDF cosine, best first,
    /// never including the song itself.
    pub fn similar_songs(&self, name: &str) -> Result<Vec<ScoredSong>, NotFound> {
        let source = self.resolve_song(name)?;
        let ranked = similarity::rank_similar(self.catalog.model(), source.id, self.limit);
        debug!(query = name, source = source.id, hits = ranked.len(), "similar songs");

        Ok(ranked
            .into_iter()
            .map(|(id, score)| {
                let song = &self.catalog.songs()[id];
                ScoredSong {
                    id,
                    name: song.name.clone(),
                    artist: song.artist.clone(),
                    mood: song.mood.clone(),
                    score,
                }
            })
            .collect())
    }

    /// Names of the songs most similar to `name`.
    pub fn recommend_by_song(&self, name: &str) -> Result<Vec<String>, NotFound> {
        Ok(self
            .similar_songs(name)?
            .into_iter()
            .map(|s| s.name)
            .collect())
    }

    /// Names of songs by `artist`, in catalog order.
    pub fn recommend_by_artist(&self, artist: &str) -> Result<Vec<String>, NotFound> {
        let songs = if artist.trim().is_empty() {
            Vec::new()
        } else {
            self.catalog.find_by_artist(artist)
        };
        debug!(query = artist, hits = songs.len(), "songs by artist");
        self.names(songs)
            .ok_or_else(|| NotFound::Artist(artist.to_string()))
    }

    /// Names of songs tagged with `mood`, in catalog order.
    pub fn recommend_by_mood(&self, mood: &str) -> Result<Vec<String>, NotFound> {
        let label = tokenizer::normalize(mood);
        let songs = if self.catalog.classifier().is_label(&label) {
            self.catalog.find_by_mood(&label)
        } else {
            debug!(query = mood, "not a mood label");
            Vec::new()
        };
        debug!(query = mood, hits = songs.len(), "songs by mood");
        self.names(songs)
            .ok_or_else(|| NotFound::Mood(mood.to_string()))
    }

    fn names(&self, songs: Vec<&Song>) -> Option<Vec<String>> {
        if songs.is_empty() {
            return None;
        }
        Some(
            songs
                .into_iter()
                .take(self.limit)
                .map(|s| s.name.clone())
                .collect(),
        )
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            songs: self.catalog.len(),
            artists: self.catalog.artist_count(),
            vocabulary: self.catalog.model().dimensions(),
            moods: self
                .catalog
                .mood_counts()
                .into_iter()
                .map(|(mood, count)| MoodCount { mood, count })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommender(records: Vec<SongRecord>) -> Recommender {
        Recommender::from_records(records, MoodClassifier::default(), &RecommenderConfig::default())
    }

    fn two_songs() -> Recommender {
        recommender(vec![
            SongRecord::new("Song A", "X", "I cry alone at night"),
            SongRecord::new("Song B", "X", "we dance and party all night"),
        ])
    }

    #[test]
    fn artist_query_is_case_insensitive() {
        let r = two_songs();
        assert_eq!(r.recommend_by_artist("x").unwrap(), vec!["Song A", "Song B"]);
    }

    #[test]
    fn absent_song_is_not_found() {
        let r = two_songs();
        assert_eq!(
            r.recommend_by_song("song z"),
            Err(NotFound::Song("song z".into()))
        );
    }

    #[test]
    fn song_query_excludes_itself() {
        let r = two_songs();
        assert_eq!(r.recommend_by_song("SONG A").unwrap(), vec!["Song B"]);
    }

    #[test]
    fn single_song_catalog_has_no_neighbours() {
        let r = recommender(vec![SongRecord::new("Only", "X", "lonely")]);
        assert_eq!(r.recommend_by_song("only").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn empty_queries_are_not_found() {
        let r = recommender(vec![SongRecord::new("", "", "")]);
        assert!(r.recommend_by_song("").is_err());
        assert!(r.recommend_by_song("   ").is_err());
        assert!(r.recommend_by_artist("").is_err());
        assert!(r.recommend_by_mood("").is_err());
    }

    #[test]
    fn mood_query() {
        let r = two_songs();
        assert_eq!(r.recommend_by_mood("Energetic_Hype").unwrap(), vec!["Song B"]);
        assert_eq!(
            r.recommend_by_mood("romantic"),
            Err(NotFound::Mood("romantic".into()))
        );
        assert_eq!(
            r.recommend_by_mood("happy"),
            Err(NotFound::Mood("happy".into()))
        );
    }

    #[test]
    fn mood_query_matches_unknown_label() {
        let r = recommender(vec![
            SongRecord::new("Plain", "X", "just words"),
            SongRecord::new("Hype", "X", "jump"),
        ]);
        assert_eq!(r.recommend_by_mood("UNKNOWN").unwrap(), vec!["Plain"]);
    }

    #[test]
    fn results_capped_at_limit() {
        let records: Vec<SongRecord> = (0..250)
            .map(|i| SongRecord::new(&format!("Track {i}"), "Prolific", "love love heart"))
            .collect();
        let r = recommender(records);
        let by_artist = r.recommend_by_artist("prolific").unwrap();
        assert_eq!(by_artist.len(), 100);
        assert_eq!(by_artist[0], "Track 0");
        assert_eq!(by_artist[99], "Track 99");
        assert_eq!(r.recommend_by_mood("romantic").unwrap().len(), 100);

        let similar = r.recommend_by_song("track 5").unwrap();
        assert_eq!(similar.len(), 100);
        assert!(!similar.contains(&"Track 5".to_string()));
        // identical scores fall back to catalog order
        assert_eq!(similar[0], "Track 0");
        assert_eq!(similar[5], "Track 6");
    }

    #[test]
    fn custom_limit() {
        let config = RecommenderConfig {
            limit: 1,
            ..Default::default()
        };
        let r = Recommender::from_records(
            vec![
                SongRecord::new("A", "X", "run"),
                SongRecord::new("B", "X", "lift"),
            ],
            MoodClassifier::default(),
            &config,
        );
        assert_eq!(r.recommend_by_artist("x").unwrap(), vec!["A"]);
        assert_eq!(r.limit(), 1);
    }

    #[test]
    fn similar_songs_are_scored() {
        let r = recommender(vec![
            SongRecord::new("A", "X", "love heart kiss"),
            SongRecord::new("B", "Y", "love heart"),
            SongRecord::new("C", "Z", "party dance"),
        ]);
        let hits = r.similar_songs("a").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "B");
        assert!(hits[0].score > 0.0 && hits[0].score <= 1.0);
        assert_eq!(hits[1].score, 0.0);
        assert_eq!(hits[0].mood, "romantic");
    }

    #[test]
    fn stats_summary() {
        let stats = two_songs().stats();
        assert_eq!(stats.songs, 2);
        assert_eq!(stats.artists, 1);
        assert_eq!(stats.moods.len(), 7);
    }
}
