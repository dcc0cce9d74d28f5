//! # arxiv-rag core
//!
//! I/O-free retrieval logic for arxiv-rag: paper and chunk models,
//! positional chunking, a TF-IDF lexical index, the snapshot-swapping
//! [`RetrievalEngine`](engine::RetrievalEngine), citation and prompt
//! formatting, and the [`RagService`](service::RagService) that wires the
//! engine to a paper source and a text generator.
//!
//! This crate performs no network or filesystem access. Paper sources and
//! generators are supplied by the caller through the
//! [`PaperSource`](source::PaperSource) and
//! [`Generator`](generate::Generator) traits.
//!
//! ```rust
//! use arxiv_rag_core::engine::RetrievalEngine;
//! use arxiv_rag_core::index::IndexParams;
//!
//! let engine = RetrievalEngine::new(500, IndexParams::default()).unwrap();
//! assert!(engine.query("anything", 5).unwrap().is_empty());
//! ```

pub mod chunk;
pub mod citation;
pub mod engine;
pub mod error;
pub mod generate;
pub mod index;
pub mod models;
pub mod prompt;
pub mod retrieve;
pub mod service;
pub mod source;
pub mod tokenize;
