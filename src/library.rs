//! Local paper library.
//!
//! [`LibrarySource`] serves [`PaperSource`] searches from a directory of
//! JSON files. Each file holds one paper object or an array of them, in
//! the same shape the core [`Paper`] type serializes to. Files are
//! discovered with `walkdir`, filtered by include/exclude globs, and read
//! in sorted path order so results are deterministic.
//!
//! # Matching
//!
//! Query terms are split on whitespace and lowercased. A paper matches when
//! at least one term occurs in its title or summary. Relevance is the
//! number of distinct matching terms; ties keep library order. An empty
//! query matches every paper.
//!
//! `date` ordering sorts by `published`, newest first. `title` ordering is
//! accepted and behaves like `relevance`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use arxiv_rag_core::models::Paper;
use arxiv_rag_core::source::{PaperSource, SearchQuery, SortBy};

use crate::config::LibraryConfig;

#[derive(Deserialize)]
#[serde(untagged)]
enum PaperFile {
    Many(Vec<Paper>),
    One(Box<Paper>),
}

/// A [`PaperSource`] over a directory of JSON paper files.
pub struct LibrarySource {
    config: LibraryConfig,
}

impl LibrarySource {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// All JSON files the library would read, in sorted order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.root;
        if !root.exists() {
            bail!("Paper library root does not exist: {}", root.display());
        }

        let include_set = build_globset(&self.config.include_globs)?;
        let mut default_excludes = vec!["**/.git/**".to_string()];
        default_excludes.extend(self.config.exclude_globs.clone());
        let exclude_set = build_globset(&default_excludes)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            let rel_str = relative.to_string_lossy().to_string();

            if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Every paper in the library, in file order then in-file order.
    ///
    /// The first file that cannot be read or parsed fails the whole load.
    pub fn load_all(&self) -> Result<Vec<Paper>> {
        let mut papers = Vec::new();
        for path in self.files()? {
            let mut batch = read_paper_file(&path)?;
            debug!(file = %path.display(), papers = batch.len(), "loaded paper file");
            papers.append(&mut batch);
        }
        Ok(papers)
    }
}

#[async_trait]
impl PaperSource for LibrarySource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>> {
        let papers = self.load_all()?;
        Ok(select(papers, query))
    }

    fn name(&self) -> &str {
        "library"
    }
}

fn read_paper_file(path: &Path) -> Result<Vec<Paper>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: PaperFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(match parsed {
        PaperFile::Many(papers) => papers,
        PaperFile::One(paper) => vec![*paper],
    })
}

/// Filter, order and truncate `papers` for `query`.
fn select(papers: Vec<Paper>, query: &SearchQuery) -> Vec<Paper> {
    let mut terms: Vec<String> = query
        .query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    terms.sort();
    terms.dedup();

    let mut matched: Vec<(usize, Paper)> = papers
        .into_iter()
        .filter_map(|paper| {
            if terms.is_empty() {
                return Some((0, paper));
            }
            let haystack = format!("{}\n{}", paper.title, paper.summary).to_lowercase();
            let hits = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
            (hits > 0).then_some((hits, paper))
        })
        .collect();

    match query.sort_by.effective() {
        SortBy::Date => matched.sort_by(|a, b| b.1.published.cmp(&a.1.published)),
        _ => matched.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    matched
        .into_iter()
        .take(query.max_results)
        .map(|(_, paper)| paper)
        .collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
