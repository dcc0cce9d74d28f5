//! Outbound generation boundary.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A system instruction plus a user prompt built from retrieved chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
}

/// A text generator (typically a language-model endpoint).
///
/// Timeouts and transport concerns belong to the implementation. Any error
/// is reported to the caller as a generation failure and is not retried.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
