//! TF-IDF lexical index.
//!
//! The index is derived state: a pure function of the chunk sequence it was
//! built from. It is never patched; every ingestion builds a new one.
//!
//! # Weighting
//!
//! 1. Tokenize every chunk (see [`tokenize`](crate::tokenize::tokenize)).
//! 2. Rank all terms by total corpus frequency (desc, then term asc) and
//!    keep the top `max_features`. Term ids follow lexicographic order.
//! 3. `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
//! 4. Row weight is `count × idf`, L2-normalised per row.
//!
//! Queries are projected with the same vocabulary and idf. Out-of-vocabulary
//! query terms contribute nothing.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Chunk;
use crate::tokenize::tokenize;

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Tuning knobs for [`LexicalIndex::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexParams {
    /// Maximum vocabulary size.
    pub max_features: usize,
    /// Drop English stop-words from chunks and queries.
    pub stop_words: bool,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            stop_words: true,
        }
    }
}

/// Sparse, L2-normalised term vector. Entries are sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, u32>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, f64::from(count) * idf[term]))
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product of two sparse vectors; cosine similarity when both are
    /// normalised.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// A fitted TF-IDF model plus one weighted row per chunk.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    params: IndexParams,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Fit the model over `chunks` and compute their rows, in order.
    ///
    /// Never fails. A corpus with no usable terms yields an empty
    /// vocabulary and all-zero rows.
    pub fn fit(chunks: &[Chunk], params: &IndexParams) -> Self {
        let docs: Vec<Vec<String>> = chunks
            .iter()
            .map(|c| tokenize(c.content(), params.stop_words))
            .collect();

        let mut term_freq: HashMap<&str, u64> = HashMap::new();
        let mut doc_freq: HashMap<&str, u64> = HashMap::new();
        for doc in &docs {
            let mut seen: Vec<&str> = Vec::with_capacity(doc.len());
            for term in doc {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
                seen.push(term.as_str());
            }
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(params.max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();

        let n = docs.len() as f64;
        let idf: Vec<f64> = kept
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary: HashMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(id, t)| (t.to_string(), id))
            .collect();

        let rows = docs
            .iter()
            .map(|doc| project(doc, &vocabulary, &idf))
            .collect();

        Self {
            params: params.clone(),
            vocabulary,
            idf,
            rows,
        }
    }

    /// Project arbitrary text into this index's vector space.
    pub fn transform(&self, text: &str) -> SparseVector {
        let terms = tokenize(text, self.params.stop_words);
        project(&terms, &self.vocabulary, &self.idf)
    }

    /// Cosine similarity of `text` against every row, in row order.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let query = self.transform(text);
        if query.is_empty() {
            return vec![0.0; self.rows.len()];
        }
        self.rows.iter().map(|row| row.dot(&query)).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.rows.get(position)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}

fn project(terms: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> SparseVector {
    let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
    for term in terms {
        if let Some(&id) = vocabulary.get(term) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    SparseVector::from_counts(counts, idf)
}

/// Index lifecycle: nothing to search until the first non-empty rebuild.
#[derive(Debug, Clone, Default)]
pub enum IndexState {
    #[default]
    NotBuilt,
    Built(LexicalIndex),
}

impl IndexState {
    /// Rebuild from scratch over `chunks`. An empty slice yields
    /// [`IndexState::NotBuilt`].
    pub fn rebuild(chunks: &[Chunk], params: &IndexParams) -> Self {
        if chunks.is_empty() {
            return IndexState::NotBuilt;
        }
        let index = LexicalIndex::fit(chunks, params);
        info!(
            chunks = chunks.len(),
            vocabulary = index.vocabulary_size(),
            "lexical index rebuilt"
        );
        IndexState::Built(index)
    }

    pub fn as_built(&self) -> Option<&LexicalIndex> {
        match self {
            IndexState::Built(index) => Some(index),
            IndexState::NotBuilt => None,
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, IndexState::Built(_))
    }
}
