use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nu_plugin_songrec::algo::mood::MoodClassifier;
use nu_plugin_songrec::algo::{similarity, tfidf, tokenizer};

/// Generate synthetic lyrics for benchmarking
fn generate_lyrics(n: usize) -> Vec<String> {
    let verses = [
        "tears fall down my face tonight the pain will never fade",
        "pump it up we run the power hour lift it higher",
        "my darling hold my heart forever kiss me in the rain",
        "remember childhood summers the old days on the porch",
        "jump to the beat the party is lit the crowd goes crazy",
        "a whisper in the shadow mystery walks the empty street",
        "highway rolling under starlight engines humming low",
        "coffee morning sunlight paper headlines slowly turning",
    ];
    (0..n)
        .map(|i| {
            let base = verses[i % verses.len()];
            format!("{base} verse{i} chorus{}", i % 50)
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "Don't stop believin', hold on to that feelin' streetlight people";
    c.bench_function("tokenize/single", |b| {
        b.iter(|| tokenizer::tokenize(black_box(text)))
    });
}

fn bench_model_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf_build");
    for size in [100, 1000, 5000] {
        let lyrics = generate_lyrics(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &lyrics, |b, docs| {
            b.iter(|| black_box(tfidf::TfidfModel::build(docs)))
        });
    }
    group.finish();
}

fn bench_rank_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_similar");
    for size in [1000, 5000] {
        let model = tfidf::TfidfModel::build(&generate_lyrics(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, m| {
            b.iter(|| black_box(similarity::rank_similar(m, black_box(7), 100)))
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = MoodClassifier::default();
    let lyrics = generate_lyrics(1000);
    c.bench_function("classify/1000_songs", |b| {
        b.iter(|| {
            for text in &lyrics {
                black_box(classifier.classify(text));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_model_build,
    bench_rank_similar,
    bench_classify
);
criterion_main!(benches);
