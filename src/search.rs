use anyhow::Result;

use arxiv_rag_core::source::{SearchQuery, SortBy};

use crate::config::Config;
use crate::service::build_service;

/// Search the library, ingest the matches, and print them.
pub async fn run_search(
    config: &Config,
    query: &str,
    max_results: Option<usize>,
    sort_by: SortBy,
) -> Result<()> {
    let service = build_service(config)?;
    let outcome = service
        .search(&SearchQuery {
            query: query.to_string(),
            max_results: max_results.unwrap_or(config.retrieval.max_results),
            sort_by,
        })
        .await?;

    if outcome.papers.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, paper) in outcome.papers.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, paper.paper_id, paper.title);
        println!("    authors: {}", paper.authors.join(", "));
        println!("    published: {}  updated: {}", paper.published, paper.updated);
        println!("    url: {}", paper.arxiv_url);
    }

    let stats = service.engine().stats();
    println!();
    println!(
        "papers: {}  chunks: {}  vocabulary: {}",
        outcome.papers.len(),
        stats.chunks,
        stats.vocabulary
    );
    Ok(())
}
