use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

use super::tokenizer;

/// A sparse weight vector: `(column, weight)` pairs sorted by column.
/// Columns absent from `entries` have zero weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted pairs. Zero weights are dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|&(_, w)| w != 0.0);
        pairs.sort_by_key(|&(col, _)| col);
        Self { entries: pairs }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// TF-IDF vector space over a corpus of documents.
///
/// Weights are raw term count × smoothed IDF `ln((1 + n) / (1 + df)) + 1`,
/// and every document vector is L2-normalized. Vocabulary columns follow
/// sorted term order, so building twice from the same corpus yields the
/// same model.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfModel {
    /// term -> column index
    vocabulary: HashMap<String, usize>,
    /// column -> IDF weight
    idf: Vec<f64>,
    /// document id -> weight vector
    vectors: Vec<SparseVector>,
}

impl TfidfModel {
    /// Build the model from raw document texts. Row `i` of the model
    /// corresponds to `corpus[i]`.
    pub fn build<S: AsRef<str> + Sync>(corpus: &[S]) -> Self {
        let token_lists: Vec<Vec<String>> = corpus
            .par_iter()
            .map(|text| tokenizer::tokenize(text.as_ref()))
            .collect();

        let term_counts: Vec<HashMap<&str, u32>> = token_lists
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<&str, u32> = HashMap::new();
                for token in tokens {
                    *counts.entry(token.as_str()).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let terms: BTreeSet<&str> = term_counts
            .iter()
            .flat_map(|counts| counts.keys().copied())
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), col))
            .collect();

        let mut doc_freq = vec![0u32; vocabulary.len()];
        for counts in &term_counts {
            for term in counts.keys() {
                doc_freq[vocabulary[*term]] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors: Vec<SparseVector> = term_counts
            .iter()
            .map(|counts| {
                let pairs = counts
                    .iter()
                    .map(|(term, &count)| {
                        let col = vocabulary[*term];
                        (col, count as f64 * idf[col])
                    })
                    .collect();
                let mut vector = SparseVector::from_pairs(pairs);
                vector.l2_normalize();
                vector
            })
            .collect();

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Vocabulary size; the dimensionality of every vector.
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    pub fn num_docs(&self) -> usize {
        self.vectors.len()
    }

    pub fn vector(&self, doc_id: usize) -> Option<&SparseVector> {
        self.vectors.get(doc_id)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}
