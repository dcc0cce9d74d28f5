//! Query ranking over a built [`LexicalIndex`].
//!
//! Ranking is by cosine similarity, descending. Equal scores keep
//! ascending store position, so results are deterministic regardless of
//! the sort implementation.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::CoreError;
use crate::index::{IndexState, LexicalIndex};
use crate::models::{Chunk, ScoredChunk};

/// Rank every row of `index` against `query` and return the best `top_k`
/// as `(position, score)` pairs.
///
/// When `top_k` exceeds the row count, every row is returned, ranked.
pub fn rank(index: &LexicalIndex, query: &str, top_k: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = index.similarities(query).into_iter().enumerate().collect();
    scored.sort_by(compare_hits);
    scored.truncate(top_k);
    scored
}

fn compare_hits(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Query `chunks` through `state`, which must have been built from exactly
/// these chunks.
///
/// Returns an empty result when the index has not been built yet.
///
/// # Errors
///
/// [`CoreError::InvalidTopK`] when `top_k` is zero.
pub fn query(
    chunks: &[Chunk],
    state: &IndexState,
    text: &str,
    top_k: usize,
) -> Result<Vec<ScoredChunk>, CoreError> {
    if top_k == 0 {
        return Err(CoreError::InvalidTopK);
    }
    let index = match state.as_built() {
        Some(index) => index,
        None => return Ok(Vec::new()),
    };
    debug_assert_eq!(index.row_count(), chunks.len());

    let hits = rank(index, text, top_k);
    debug!(top_k, returned = hits.len(), "ranked chunks");

    Ok(hits
        .into_iter()
        .filter_map(|(position, score)| {
            chunks.get(position).map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                score,
                position,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexParams;
    use crate::models::test_paper;

    fn corpus(texts: &[&str]) -> (Vec<Chunk>, IndexState) {
        let paper = test_paper("p1", "");
        let chunks: Vec<Chunk> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(&paper, i, t).unwrap())
            .collect();
        let state = IndexState::rebuild(&chunks, &IndexParams::default());
        (chunks, state)
    }

    #[test]
    fn test_not_built_returns_empty() {
        let results = query(&[], &IndexState::NotBuilt, "anything", 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let (chunks, state) = corpus(&["alpha"]);
        assert_eq!(
            query(&chunks, &state, "alpha", 0).unwrap_err(),
            CoreError::InvalidTopK
        );
    }

    #[test]
    fn test_best_match_first() {
        let (chunks, state) = corpus(&[
            "galaxy formation simulations",
            "transformer language models",
            "language acquisition in children",
        ]);
        let results = query(&chunks, &state, "transformer language", 3).unwrap();
        assert_eq!(results[0].position, 1);
        assert!(results[0].score > results[1].score);
        assert_eq!(results[1].position, 2);
        assert_eq!(results[2].score, 0.0);
    }

    #[test]
    fn test_ties_keep_store_order() {
        let (chunks, state) = corpus(&["unrelated words", "same text", "other", "same text"]);
        let results = query(&chunks, &state, "same text", 4).unwrap();
        assert_eq!(results[0].position, 1);
        assert_eq!(results[1].position, 3);
        assert_eq!(results[0].score, results[1].score);
        // Remaining zero-score rows also keep store order.
        assert_eq!(results[2].position, 0);
        assert_eq!(results[3].position, 2);
    }

    #[test]
    fn test_top_k_larger_than_corpus() {
        let (chunks, state) = corpus(&["alpha", "beta"]);
        let results = query(&chunks, &state, "alpha", 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_compare_hits_orders_by_score_then_position() {
        let mut hits = vec![(2, 0.5), (0, 0.5), (1, 0.9)];
        hits.sort_by(compare_hits);
        assert_eq!(hits, vec![(1, 0.9), (0, 0.5), (2, 0.5)]);
    }
}
