use anyhow::Result;

use arxiv_rag_core::citation::preview;

use crate::config::Config;
use crate::service::{build_service, load_corpus};

/// Load the corpus and print the ranked chunks for `text`.
pub async fn run_query(
    config: &Config,
    text: &str,
    from: Option<&str>,
    top_k: Option<usize>,
) -> Result<()> {
    let service = build_service(config)?;
    load_corpus(&service, config, from).await?;

    let hits = service
        .engine()
        .query(text, top_k.unwrap_or(config.retrieval.top_k))?;
    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (rank, hit) in hits.iter().enumerate() {
        let chunk = &hit.chunk;
        println!(
            "{}. {:.4}  {}#{}  {}",
            rank + 1,
            hit.score,
            chunk.paper_id(),
            chunk.chunk_index(),
            chunk.title()
        );
        println!(
            "    {}",
            preview(chunk.content(), config.citation.preview_chars).replace('\n', " ")
        );
    }
    Ok(())
}
