//! Retrieval-augmented question answering over papers.
//!
//! [`RagService`] connects a [`RetrievalEngine`] to the two boundaries:
//! a [`PaperSource`] feeding ingestion and a [`Generator`] producing the
//! answer.
//!
//! | Method | Flow |
//! |--------|------|
//! | [`search`](RagService::search) | source → ingest → papers |
//! | [`context`](RagService::context) | retrieve → prompt + citations |
//! | [`ask`](RagService::ask) | retrieve → prompt → generate → answer + citations |

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::citation::{Citation, DEFAULT_PREVIEW_CHARS};
use crate::engine::{IngestReport, RetrievalEngine};
use crate::error::RagError;
use crate::generate::{GenerationRequest, Generator};
use crate::models::Paper;
use crate::prompt::build_request;
use crate::source::{PaperSource, SearchQuery};

/// Papers returned by a search, plus what ingesting them did.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub papers: Vec<Paper>,
    pub ingest: IngestReport,
}

/// Everything a generator needs for one question, plus the citations
/// that will accompany its answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerContext {
    pub request: GenerationRequest,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
    pub citations: Vec<Citation>,
}

pub struct RagService<S, G> {
    engine: Arc<RetrievalEngine>,
    source: S,
    generator: G,
    preview_chars: usize,
}

impl<S: PaperSource, G: Generator> RagService<S, G> {
    pub fn new(engine: Arc<RetrievalEngine>, source: S, generator: G) -> Self {
        Self {
            engine,
            source,
            generator,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Override the citation preview length.
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn engine(&self) -> &Arc<RetrievalEngine> {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Fetch papers for `query` and ingest all of them.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, RagError> {
        let papers = self.source.search(query).await.map_err(|e| {
            error!(source = self.source.name(), "paper search failed: {:#}", e);
            RagError::SearchFailed(format!("{:#}", e))
        })?;
        info!(
            source = self.source.name(),
            query = %query.query,
            sort_by = %query.sort_by,
            found = papers.len(),
            "paper search complete"
        );
        let ingest = self.engine.ingest(&papers)?;
        Ok(SearchOutcome { papers, ingest })
    }

    /// Retrieve the best `top_k` chunks for `question` from the current
    /// corpus and assemble the generation request and citations.
    pub fn context(&self, question: &str, top_k: usize) -> Result<AnswerContext, RagError> {
        let hits = self.engine.query(question, top_k)?;
        if hits.is_empty() {
            return Err(RagError::NoRelevantContent);
        }
        let citations = hits
            .iter()
            .map(|h| Citation::from_chunk(&h.chunk, self.preview_chars))
            .collect();
        Ok(AnswerContext {
            request: build_request(question, &hits),
            citations,
        })
    }

    /// Answer `question` from the current corpus.
    pub async fn ask(&self, question: &str, top_k: usize) -> Result<Answer, RagError> {
        let AnswerContext { request, citations } = self.context(question, top_k)?;
        let answer = self.generator.generate(&request).await.map_err(|e| {
            error!("generation failed: {:#}", e);
            RagError::GenerationFailed(format!("{:#}", e))
        })?;
        Ok(Answer { answer, citations })
    }
}

/// Generator for callers that only assemble context and never generate.
///
/// Every call fails with a generation error.
pub struct NoGenerator;

#[async_trait::async_trait]
impl Generator for NoGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
        anyhow::bail!("no generator configured")
    }
}
