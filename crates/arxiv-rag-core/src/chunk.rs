//! Positional text chunker.
//!
//! Splits a paper's summary into consecutive, non-overlapping slices of
//! `chunk_size` characters. The last slice is shorter when the length does
//! not divide evenly. No normalization or trimming happens here: chunk
//! content keeps the exact original characters so citations can quote it.
//!
//! Sizes are counted in Unicode scalar values, so a slice never ends in
//! the middle of a UTF-8 sequence.
//!
//! # Example
//!
//! ```rust
//! use arxiv_rag_core::chunk::split_text;
//!
//! let pieces = split_text("abcdefg", 3).unwrap();
//! assert_eq!(pieces, vec!["abc", "def", "g"]);
//! ```

use crate::error::CoreError;
use crate::models::{Chunk, Paper};

/// Default slice length, in characters, used for paper summaries.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Split `text` into consecutive slices of `chunk_size` characters.
///
/// # Guarantees
///
/// - Empty input yields no slices.
/// - Concatenating the slices reproduces `text` exactly.
/// - Every slice but the last has exactly `chunk_size` characters.
///
/// # Errors
///
/// [`CoreError::InvalidChunkSize`] when `chunk_size` is zero.
pub fn split_text(text: &str, chunk_size: usize) -> Result<Vec<&str>, CoreError> {
    if chunk_size == 0 {
        return Err(CoreError::InvalidChunkSize(chunk_size));
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == chunk_size {
            pieces.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    Ok(pieces)
}

/// Chunk a paper's summary into [`Chunk`]s tagged `0..n` with the paper's
/// metadata.
pub fn chunk_paper(paper: &Paper, chunk_size: usize) -> Result<Vec<Chunk>, CoreError> {
    split_text(&paper.summary, chunk_size)?
        .into_iter()
        .enumerate()
        .map(|(index, piece)| Chunk::new(paper, index, piece))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_paper;

    #[test]
    fn test_exact_multiple() {
        let pieces = split_text("abcdef", 3).unwrap();
        assert_eq!(pieces, vec!["abc", "def"]);
    }

    #[test]
    fn test_short_tail() {
        let text = "A".repeat(1200);
        let pieces = split_text(&text, 500).unwrap();
        let lens: Vec<usize> = pieces.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![500, 500, 200]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_text("", 500).unwrap().is_empty());
    }

    #[test]
    fn test_zero_chunk_size() {
        assert_eq!(
            split_text("abc", 0).unwrap_err(),
            CoreError::InvalidChunkSize(0)
        );
    }

    #[test]
    fn test_text_shorter_than_chunk() {
        assert_eq!(split_text("hi", 500).unwrap(), vec!["hi"]);
    }

    #[test]
    fn test_multibyte_utf8_chars() {
        let text = "┌──┐é日本語";
        let pieces = split_text(text, 3).unwrap();
        assert_eq!(pieces, vec!["┌──", "┐é日", "本語"]);
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn test_whitespace_preserved() {
        let text = "  a\n\nb  ";
        let pieces = split_text(text, 4).unwrap();
        assert_eq!(pieces.concat(), text);
        assert_eq!(pieces[0], "  a\n");
    }

    #[test]
    fn test_chunk_paper_indices_contiguous() {
        let summary = (0..40)
            .map(|i| format!("Sentence number {}. ", i))
            .collect::<String>();
        let paper = test_paper("p1", &summary);
        let chunks = chunk_paper(&paper, 37).unwrap();
        assert_eq!(chunks.len(), summary.chars().count().div_ceil(37));
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index(), i, "Index mismatch at position {}", i);
            assert_eq!(c.paper_id(), "p1");
        }
        let rebuilt: String = chunks.iter().map(|c| c.content()).collect();
        assert_eq!(rebuilt, summary);
    }

    #[test]
    fn test_chunk_paper_empty_summary() {
        let paper = test_paper("p1", "");
        assert!(chunk_paper(&paper, 500).unwrap().is_empty());
    }
}
