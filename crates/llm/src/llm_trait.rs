use crate::types::GenerateRequest;
use async_trait::async_trait;
use autoroute_common::Result;

/// Common trait for LLM clients
///
/// The vector store only relies on `embed`; the chat route relies on `generate`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, request: GenerateRequest) -> Result<String>;

    /// Generate embedding for text
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>>;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;
}
