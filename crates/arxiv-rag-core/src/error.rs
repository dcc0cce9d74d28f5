//! Error types for the retrieval core and the RAG service.
//!
//! An empty corpus and an unbuilt index are not errors: queries against
//! them return an empty result set.

use thiserror::Error;

/// Precondition and validation failures raised by the retrieval core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The chunker was asked for chunks of size zero.
    #[error("chunk size must be > 0, got {0}")]
    InvalidChunkSize(usize),

    /// A query asked for zero results.
    #[error("top_k must be > 0")]
    InvalidTopK,

    /// A chunk record failed validation at construction.
    #[error("invalid chunk: {0}")]
    InvalidChunk(String),
}

/// Failures surfaced by [`RagService`](crate::service::RagService).
///
/// Boundary failures are flattened into a message; the core never retries
/// them and never produces a partial answer.
#[derive(Debug, Error)]
pub enum RagError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The paper source failed (network, parse, I/O).
    #[error("paper search failed: {0}")]
    SearchFailed(String),

    /// The generator failed or timed out.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Retrieval returned nothing to answer from.
    #[error("no relevant paper content found")]
    NoRelevantContent,
}
