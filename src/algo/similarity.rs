use rayon::prelude::*;

use super::tfidf::{SparseVector, TfidfModel};

/// Cosine similarity of two sparse vectors. Zero when either vector has
/// zero magnitude.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (na, nb) = (a.norm(), b.norm());
    if na > 0.0 && nb > 0.0 {
        a.dot(b) / (na * nb)
    } else {
        0.0
    }
}

/// Cosine similarity of document `source` against every document in the
/// model, itself included. Empty if `source` is out of range.
pub fn similarities(model: &TfidfModel, source: usize) -> Vec<f64> {
    match model.vector(source) {
        Some(query) => model
            .vectors()
            .par_iter()
            .map(|v| cosine(query, v))
            .collect(),
        None => Vec::new(),
    }
}

/// The `limit` documents most similar to `source`, excluding `source`
/// itself. Sorted by score descending; equal scores keep ascending id
/// order.
pub fn rank_similar(model: &TfidfModel, source: usize, limit: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = similarities(model, source)
        .into_iter()
        .enumerate()
        .filter(|&(id, _)| id != source)
        .collect();
    // Stable sort keeps insertion order among ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}
