//! Core data models: papers as supplied by a paper source, and the chunks
//! derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Paper metadata as supplied by a [`PaperSource`](crate::source::PaperSource).
///
/// Never updated after creation. `summary` is the text that gets chunked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: NaiveDate,
    pub updated: NaiveDate,
    pub arxiv_url: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// A contiguous slice of a paper's summary plus provenance copied from the
/// paper at ingestion time.
///
/// Fields are private so that every `Chunk` in the system has passed
/// [`Chunk::new`] validation: non-empty content and a non-empty paper id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    content: String,
    chunk_index: usize,
    paper_id: String,
    title: String,
    authors: Vec<String>,
    arxiv_url: String,
    pdf_url: Option<String>,
}

impl Chunk {
    /// Build a chunk of `paper` holding `content` at position `chunk_index`.
    pub fn new(paper: &Paper, chunk_index: usize, content: &str) -> Result<Self, CoreError> {
        if content.is_empty() {
            return Err(CoreError::InvalidChunk(format!(
                "empty content for chunk {} of paper '{}'",
                chunk_index, paper.paper_id
            )));
        }
        if paper.paper_id.trim().is_empty() {
            return Err(CoreError::InvalidChunk(
                "paper_id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            content: content.to_string(),
            chunk_index,
            paper_id: paper.paper_id.clone(),
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            arxiv_url: paper.arxiv_url.clone(),
            pdf_url: paper.pdf_url.clone(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Position of this chunk within its paper's chunk sequence.
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    pub fn paper_id(&self) -> &str {
        &self.paper_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn arxiv_url(&self) -> &str {
        &self.arxiv_url
    }

    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }
}

/// A chunk returned from retrieval with its cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Cosine similarity in `[0.0, 1.0]`.
    pub score: f64,
    /// Row of the chunk in the store at query time.
    pub position: usize,
}

#[cfg(test)]
pub(crate) fn test_paper(id: &str, summary: &str) -> Paper {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    Paper {
        paper_id: id.to_string(),
        title: format!("Paper {}", id),
        authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
        summary: summary.to_string(),
        published: date,
        updated: date,
        arxiv_url: format!("http://arxiv.org/abs/{}", id),
        pdf_url: Some(format!("http://arxiv.org/pdf/{}", id)),
    }
}
