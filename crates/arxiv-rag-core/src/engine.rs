//! The retrieval engine: chunk store and lexical index, kept aligned.
//!
//! The store and its index live together in an immutable [`Snapshot`].
//! Ingestion builds the next snapshot off to the side (existing chunks plus
//! the new batch, index rebuilt from scratch) and swaps it in under a short
//! write lock. Queries clone the current `Arc<Snapshot>` and score against
//! it without holding any lock, so a reader sees either the old pair or the
//! new pair, never a mix.
//!
//! Ingestions are serialized by a separate writer mutex so two concurrent
//! batches cannot both start from the same base snapshot and lose chunks.
//!
//! Each ingestion costs O(total chunks): the index is a pure function of
//! the store and is never updated incrementally.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use tracing::info;

use crate::chunk::chunk_paper;
use crate::error::CoreError;
use crate::index::{IndexParams, IndexState};
use crate::models::{Chunk, Paper, ScoredChunk};
use crate::retrieve;

/// A store/index pair. The index rows are aligned 1:1 with `chunks`.
#[derive(Debug, Default)]
pub struct Snapshot {
    version: u64,
    chunks: Vec<Chunk>,
    index: IndexState,
}

impl Snapshot {
    /// Monotonic counter, bumped on every ingestion.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn index(&self) -> &IndexState {
        &self.index
    }

    /// Rank this snapshot's chunks against `text`.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredChunk>, CoreError> {
        retrieve::query(&self.chunks, &self.index, text, top_k)
    }
}

/// Outcome of one [`RetrievalEngine::ingest`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub papers: usize,
    pub chunks_added: usize,
    pub total_chunks: usize,
    pub version: u64,
}

/// Summary of the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub chunks: usize,
    /// Distinct paper ids in the store.
    pub papers: usize,
    pub vocabulary: usize,
    pub version: u64,
}

/// Owned retrieval engine. Construct one per application (or per test)
/// and share it through an `Arc`.
#[derive(Debug)]
pub struct RetrievalEngine {
    chunk_size: usize,
    params: IndexParams,
    current: RwLock<Arc<Snapshot>>,
    writer: Mutex<()>,
}

impl RetrievalEngine {
    /// # Errors
    ///
    /// [`CoreError::InvalidChunkSize`] when `chunk_size` is zero.
    pub fn new(chunk_size: usize, params: IndexParams) -> Result<Self, CoreError> {
        if chunk_size == 0 {
            return Err(CoreError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunk_size,
            params,
            current: RwLock::new(Arc::new(Snapshot::default())),
            writer: Mutex::new(()),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn params(&self) -> &IndexParams {
        &self.params
    }

    /// The current snapshot. Holding it does not block ingestion.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Chunk `papers`, append them to the store in paper order then chunk
    /// order, and rebuild the index over the whole store.
    ///
    /// All papers are chunked before anything is published: if any paper
    /// fails, the store is left exactly as it was. Papers are not
    /// deduplicated; re-ingesting a paper appends its chunks again.
    pub fn ingest(&self, papers: &[Paper]) -> Result<IngestReport, CoreError> {
        let mut batch = Vec::new();
        for paper in papers {
            batch.extend(chunk_paper(paper, self.chunk_size)?);
        }
        let chunks_added = batch.len();

        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let base = self.snapshot();

        let mut chunks = Vec::with_capacity(base.chunks.len() + chunks_added);
        chunks.extend_from_slice(&base.chunks);
        chunks.extend(batch);

        let index = IndexState::rebuild(&chunks, &self.params);
        let next = Arc::new(Snapshot {
            version: base.version + 1,
            chunks,
            index,
        });
        let report = IngestReport {
            papers: papers.len(),
            chunks_added,
            total_chunks: next.chunks.len(),
            version: next.version,
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(
            papers = report.papers,
            added = report.chunks_added,
            total = report.total_chunks,
            version = report.version,
            "ingested papers"
        );
        Ok(report)
    }

    /// Rank the current corpus against `text`, best `top_k` first.
    ///
    /// Returns an empty result before the first non-empty ingestion.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredChunk>, CoreError> {
        self.snapshot().query(text, top_k)
    }

    pub fn stats(&self) -> EngineStats {
        let snapshot = self.snapshot();
        let papers: HashSet<&str> = snapshot.chunks.iter().map(|c| c.paper_id()).collect();
        EngineStats {
            chunks: snapshot.chunks.len(),
            papers: papers.len(),
            vocabulary: snapshot
                .index
                .as_built()
                .map(|i| i.vocabulary_size())
                .unwrap_or(0),
            version: snapshot.version,
        }
    }
}
