//! Citation records for retrieved chunks.

use serde::{Deserialize, Serialize};

use crate::models::Chunk;

/// Default number of content characters kept in a citation.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Marker appended to every citation preview.
pub const ELLIPSIS: &str = "...";

/// A source reference for one retrieved chunk.
///
/// `content` is a preview: the first `preview_chars` characters of the
/// chunk followed by [`ELLIPSIS`]. Scoring and prompting always use the
/// full chunk content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub paper_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub arxiv_url: String,
    pub pdf_url: Option<String>,
    pub chunk_index: usize,
    pub content: String,
}

impl Citation {
    pub fn from_chunk(chunk: &Chunk, preview_chars: usize) -> Self {
        Self {
            paper_id: chunk.paper_id().to_string(),
            title: chunk.title().to_string(),
            authors: chunk.authors().to_vec(),
            arxiv_url: chunk.arxiv_url().to_string(),
            pdf_url: chunk.pdf_url().map(str::to_string),
            chunk_index: chunk.chunk_index(),
            content: preview(chunk.content(), preview_chars),
        }
    }
}

/// First `max_chars` characters of `text` plus [`ELLIPSIS`].
///
/// The marker is appended even when nothing was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}
