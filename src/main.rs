//! # arxiv-rag CLI (`rag`)
//!
//! Retrieval over a local library of arXiv paper records.
//!
//! ## Usage
//!
//! ```bash
//! rag --config ./config/rag.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rag sources` | Show the paper library status |
//! | `rag search "<query>"` | Search the library, index the matches, list them |
//! | `rag query "<text>"` | Rank indexed chunks against free text |
//! | `rag context "<question>"` | Print the generation request and citations as JSON |
//!
//! Every invocation builds a fresh in-memory index; nothing is persisted.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use arxiv_rag::{config, context, logging, query, search, sources};
use arxiv_rag_core::source::SortBy;

const DEFAULT_CONFIG_PATH: &str = "./config/rag.toml";

/// arxiv-rag — lexical retrieval-augmented question answering over
/// arXiv paper abstracts.
#[derive(Parser)]
#[command(name = "rag", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/rag.toml` when present, otherwise built-in
    /// defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter (overridden by `RUST_LOG`).
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the paper library and how many files it holds.
    Sources,

    /// Search the paper library and index the matching papers.
    Search {
        /// Free-text query.
        query: String,

        /// Maximum number of papers to return.
        #[arg(long)]
        max_results: Option<usize>,

        /// `relevance`, `date`, or `title` (title behaves like relevance).
        #[arg(long, default_value = "relevance")]
        sort_by: SortBy,
    },

    /// Rank indexed chunks against free text.
    Query {
        /// Text to rank chunks against.
        text: String,

        /// Only index papers matching this library query.
        #[arg(long)]
        from: Option<String>,

        /// Number of chunks to return.
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Assemble the generation request and citations for a question.
    Context {
        /// The question to answer.
        question: String,

        /// Only index papers matching this library query.
        #[arg(long)]
        from: Option<String>,

        /// Number of chunks to retrieve.
        #[arg(long)]
        top_k: Option<usize>,
    },
}

fn resolve_config(path: Option<&PathBuf>) -> Result<config::Config> {
    match path {
        Some(path) => config::load_config(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                config::load_config(&default)
            } else {
                Ok(config::Config::minimal())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let cfg = resolve_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Search {
            query,
            max_results,
            sort_by,
        } => {
            search::run_search(&cfg, &query, max_results, sort_by).await?;
        }
        Commands::Query { text, from, top_k } => {
            query::run_query(&cfg, &text, from.as_deref(), top_k).await?;
        }
        Commands::Context {
            question,
            from,
            top_k,
        } => {
            context::run_context(&cfg, &question, from.as_deref(), top_k).await?;
        }
    }

    Ok(())
}
