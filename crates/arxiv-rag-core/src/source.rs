//! Inbound paper search boundary.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Paper;

/// Requested result order.
///
/// `Title` is accepted for compatibility but the upstream index cannot
/// sort by title, so it behaves exactly like `Relevance`. See
/// [`SortBy::effective`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Date,
    Title,
}

impl SortBy {
    /// The ordering a source actually applies: `Title` maps to `Relevance`.
    pub fn effective(self) -> SortBy {
        match self {
            SortBy::Title => SortBy::Relevance,
            other => other,
        }
    }
}

impl FromStr for SortBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "relevance" => Ok(SortBy::Relevance),
            "date" => Ok(SortBy::Date),
            "title" => Ok(SortBy::Title),
            other => anyhow::bail!(
                "Unknown sort mode: '{}'. Use relevance, date, or title.",
                other
            ),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortBy::Relevance => "relevance",
            SortBy::Date => "date",
            SortBy::Title => "title",
        };
        f.write_str(s)
    }
}

/// A free-text paper search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub max_results: usize,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Supplies papers for a free-text query.
///
/// Implementations own their transport, pagination and rate limiting. The
/// core does not retry failures.
#[async_trait]
pub trait PaperSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>>;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str;
}
