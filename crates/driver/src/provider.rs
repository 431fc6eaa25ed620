use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

/// One generation request, already rendered to plain strings
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
}

/// One unit of model output.
///
/// Blocking calls produce exactly one chunk with `done = true`; streaming
/// calls produce a sequence ending in a `done = true` chunk.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StreamChunk {
    pub response: String,
    pub done: bool,
}

impl StreamChunk {
    pub fn partial(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            done: false,
        }
    }

    pub fn finished(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            done: true,
        }
    }
}

/// Seam between the driver and a concrete LLM backend
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Send one request and wait for the full completion
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;

    /// Send one request and receive the completion incrementally
    async fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<mpsc::Receiver<Result<StreamChunk>>>;
}
