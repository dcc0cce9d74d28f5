//! # arxiv-rag
//!
//! Lexical retrieval-augmented question answering over arXiv paper
//! abstracts.
//!
//! Papers come from a local library of JSON files, are cut into fixed-size
//! chunks, and indexed with TF-IDF by the [`arxiv_rag_core`] engine.
//! Questions are answered from the best-ranked chunks; the `rag` binary
//! prints the assembled generation request and citations for an external
//! generator to consume.
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Library  │──▶│ Chunker │──▶│ TF-IDF index │──▶│ prompt +     │
//! │ (JSON)   │   │         │   │ (snapshot)   │   │ citations    │
//! └──────────┘   └─────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`library`] | Local JSON paper library (`PaperSource`) |
//! | [`service`] | Engine and service construction |
//! | [`search`] | `rag search` |
//! | [`query`] | `rag query` |
//! | [`context`] | `rag context` |
//! | [`sources`] | `rag sources` |
//! | [`logging`] | tracing subscriber setup |

pub mod config;
pub mod context;
pub mod library;
pub mod logging;
pub mod query;
pub mod search;
pub mod service;
pub mod sources;
