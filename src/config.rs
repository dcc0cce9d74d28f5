//! TOML configuration.
//!
//! Every section is optional; missing keys fall back to the defaults below.
//! [`load_config`] parses and validates a file, [`Config::minimal`] gives the
//! defaults for commands that can run without one.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use arxiv_rag_core::chunk::DEFAULT_CHUNK_SIZE;
use arxiv_rag_core::citation::DEFAULT_PREVIEW_CHARS;
use arxiv_rag_core::index::{IndexParams, DEFAULT_MAX_FEATURES};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub citation: CitationConfig,
}

/// Local paper library: a directory tree of JSON paper files.
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    #[serde(default = "default_library_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_library_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_library_root() -> PathBuf {
    PathBuf::from("./papers")
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Characters per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// `"english"` or `"none"`.
    #[serde(default = "default_stop_words")]
    pub stop_words: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            stop_words: default_stop_words(),
        }
    }
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}
fn default_stop_words() -> String {
    "english".to_string()
}

impl IndexConfig {
    pub fn params(&self) -> IndexParams {
        IndexParams {
            max_features: self.max_features,
            stop_words: self.stop_words == "english",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_results: default_max_results(),
        }
    }
}

fn default_top_k() -> usize {
    5
}
fn default_max_results() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct CitationConfig {
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Config {
    /// Defaults for every section.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            bail!("chunking.chunk_size must be > 0");
        }
        if self.index.max_features == 0 {
            bail!("index.max_features must be > 0");
        }
        match self.index.stop_words.as_str() {
            "english" | "none" => {}
            other => bail!(
                "Unknown index.stop_words: '{}'. Must be english or none.",
                other
            ),
        }
        if self.retrieval.top_k < 1 {
            bail!("retrieval.top_k must be >= 1");
        }
        if self.retrieval.max_results < 1 {
            bail!("retrieval.max_results must be >= 1");
        }
        if self.citation.preview_chars == 0 {
            bail!("citation.preview_chars must be > 0");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}
