//! Wiring from configuration to a ready [`RagService`].

use anyhow::Result;
use std::sync::Arc;

use arxiv_rag_core::engine::RetrievalEngine;
use arxiv_rag_core::service::{NoGenerator, RagService};
use arxiv_rag_core::source::{SearchQuery, SortBy};

use crate::config::Config;
use crate::library::LibrarySource;

/// Service over the configured paper library. The binary assembles
/// generation context but does not call a generator itself.
pub type LibraryService = RagService<LibrarySource, NoGenerator>;

pub fn build_service(config: &Config) -> Result<LibraryService> {
    let engine = RetrievalEngine::new(config.chunking.chunk_size, config.index.params())?;
    Ok(RagService::new(
        Arc::new(engine),
        LibrarySource::new(config.library.clone()),
        NoGenerator,
    )
    .with_preview_chars(config.citation.preview_chars))
}

/// Populate the engine: every library paper, or only those matching `from`.
pub async fn load_corpus(
    service: &LibraryService,
    config: &Config,
    from: Option<&str>,
) -> Result<()> {
    match from {
        Some(query) => {
            service
                .search(&SearchQuery {
                    query: query.to_string(),
                    max_results: config.retrieval.max_results,
                    sort_by: SortBy::Relevance,
                })
                .await?;
        }
        None => {
            let papers = service.source().load_all()?;
            service.engine().ingest(&papers)?;
        }
    }
    Ok(())
}
