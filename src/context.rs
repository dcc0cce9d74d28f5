use anyhow::Result;

use crate::config::Config;
use crate::service::{build_service, load_corpus};

/// Load the corpus and print the generation request and citations for
/// `question` as JSON.
pub async fn run_context(
    config: &Config,
    question: &str,
    from: Option<&str>,
    top_k: Option<usize>,
) -> Result<()> {
    let service = build_service(config)?;
    load_corpus(&service, config, from).await?;

    let context = service.context(question, top_k.unwrap_or(config.retrieval.top_k))?;
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}
