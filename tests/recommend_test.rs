//! End-to-end properties of the recommender over in-memory catalogs.

use nu_plugin_songrec::algo::mood::MoodClassifier;
use nu_plugin_songrec::algo::similarity;
use nu_plugin_songrec::config::RecommenderConfig;
use nu_plugin_songrec::{NotFound, Recommender, SongRecord};

fn build(records: Vec<SongRecord>) -> Recommender {
    Recommender::from_records(records, MoodClassifier::default(), &RecommenderConfig::default())
}

fn lyrics_catalog() -> Vec<SongRecord> {
    let words = [
        "love", "heart", "night", "dance", "party", "rain", "fire", "road", "dream", "sky",
        "ocean", "river", "summer", "winter", "city", "lights",
    ];
    (0..300)
        .map(|i| {
            let text = format!(
                "{} {} {} {}",
                words[i % words.len()],
                words[(i * 7 + 3) % words.len()],
                words[(i * 5 + 1) % words.len()],
                if i % 11 == 0 { "" } else { "tonight" }
            );
            let artist = format!("Artist {}", i % 13);
            SongRecord::new(&format!("Track {i}"), &artist, &text)
        })
        .collect()
}

#[test]
fn scenario_two_songs() {
    let rec = build(vec![
        SongRecord::new("Song A", "X", "I cry alone at night"),
        SongRecord::new("Song B", "X", "we dance and party all night"),
    ]);
    let catalog = rec.catalog();
    assert_eq!(catalog.classifier().classify("I cry alone at night"), "sad");
    assert_eq!(catalog.songs()[1].mood, "energetic_hype");
    assert_eq!(rec.recommend_by_artist("x").unwrap(), vec!["Song A", "Song B"]);
    assert_eq!(
        rec.recommend_by_song("song z"),
        Err(NotFound::Song("song z".into()))
    );
}

#[test]
fn song_never_recommends_itself() {
    let rec = build(lyrics_catalog());
    for i in (0..300).step_by(17) {
        let name = format!("Track {i}");
        let names = rec.recommend_by_song(&name).unwrap();
        assert_eq!(names.len(), 100);
        assert!(!names.contains(&name));
    }
}

#[test]
fn song_results_sorted_by_score() {
    let rec = build(lyrics_catalog());
    let hits = rec.similar_songs("track 42").unwrap();
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].id < pair[1].id);
        }
    }
}

#[test]
fn filters_capped_and_ordered() {
    let rec = build(lyrics_catalog());
    let names = rec.recommend_by_artist("ARTIST 3").unwrap();
    let ids: Vec<usize> = names
        .iter()
        .map(|n| n.trim_start_matches("Track ").parse().unwrap())
        .collect();
    assert!(ids.len() <= 100);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.iter().all(|id| id % 13 == 3));

    let catalog = rec.catalog();
    for label in catalog.classifier().lexicon().labels() {
        if let Ok(names) = rec.recommend_by_mood(label) {
            assert!(names.len() <= 100);
        }
    }
}

#[test]
fn rebuild_is_deterministic() {
    let a = build(lyrics_catalog());
    let b = build(lyrics_catalog());
    assert_eq!(a.catalog().model(), b.catalog().model());
    assert_eq!(
        a.recommend_by_song("Track 7").unwrap(),
        b.recommend_by_song("Track 7").unwrap()
    );
    assert_eq!(
        a.recommend_by_mood("romantic"),
        b.recommend_by_mood("romantic")
    );
}

#[test]
fn cosine_bounds_over_catalog() {
    let rec = build(lyrics_catalog());
    let model = rec.catalog().model();
    for source in [0, 11, 150] {
        let sims = similarity::similarities(model, source);
        assert_eq!(sims.len(), 300);
        for &s in &sims {
            assert!((0.0..=1.0 + 1e-12).contains(&s));
        }
        let own = sims[source];
        let empty = model.vector(source).unwrap().is_zero();
        if empty {
            assert_eq!(own, 0.0);
        } else {
            assert!((own - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn duplicate_names_resolve_to_first() {
    let rec = build(vec![
        SongRecord::new("Echo", "First", "love"),
        SongRecord::new("ECHO", "Second", "party"),
        SongRecord::new("Other", "Third", "love heart"),
    ]);
    assert_eq!(rec.catalog().find_by_name("echo").unwrap().artist, "First");
    assert_eq!(rec.recommend_by_song("Echo").unwrap()[0], "Other");
}

#[test]
fn concurrent_readers_share_catalog() {
    let rec = build(lyrics_catalog());
    let expected = rec.recommend_by_song("Track 1").unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            let rec = rec.clone();
            let expected = &expected;
            s.spawn(move || {
                assert_eq!(&rec.recommend_by_song("Track 1").unwrap(), expected);
            });
        }
    });
}
