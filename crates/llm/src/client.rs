use async_trait::async_trait;
use autoroute_common::{AutoRouteError, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::LlmClient;
use crate::types::{EmbedRequest, EmbedResponse, GenerateRequest, GenerateResponse};

const MAX_RETRIES: u32 = 3;

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // 5 minutes for LLM calls
            .build()
            .map_err(|e| AutoRouteError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `attempt` up to `MAX_RETRIES` times with exponential backoff (1s, 2s, ...)
    async fn with_retry<T, F, Fut>(&self, what: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for n in 1..=MAX_RETRIES {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if n < MAX_RETRIES {
                        let delay = Duration::from_secs(2u64.pow(n - 1));
                        warn!(
                            "{} request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            what, n, MAX_RETRIES, e, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AutoRouteError::llm(format!("{}: all retries failed", what))))
    }

    /// Single attempt to generate text
    async fn try_generate(&self, url: &str, request: &GenerateRequest) -> Result<String> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| AutoRouteError::network(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| AutoRouteError::llm(format!("Ollama API error: {}", e)))?;

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AutoRouteError::llm(format!("Failed to parse response: {}", e)))?;

        if result.response.is_empty() {
            return Err(AutoRouteError::llm("Empty response from Ollama"));
        }

        debug!(
            "Received response from {} - Length: {}, Done: {}",
            result.model,
            result.response.len(),
            result.done
        );
        Ok(result.response)
    }

    /// Single attempt to generate embedding
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AutoRouteError::network(format!("Failed to send embedding request: {}", e))
            })?
            .error_for_status()
            .map_err(|e| AutoRouteError::llm(format!("Ollama embedding API error: {}", e)))?;

        let result: EmbedResponse = response.json().await.map_err(|e| {
            AutoRouteError::llm(format!("Failed to parse embedding response: {}", e))
        })?;

        if result.embedding.is_empty() {
            return Err(AutoRouteError::llm("Empty embedding from Ollama"));
        }

        Ok(result.embedding)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        self.with_retry("Generate", || self.try_generate(&url, &request))
            .await
    }

    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbedRequest {
            model: model.to_string(),
            prompt: text.to_string(),
        };

        debug!("Generating embedding - Model: {}, Text length: {}", model, text.len());

        let embedding = self
            .with_retry("Embedding", || self.try_embed(&url, &request))
            .await?;
        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }

    async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AutoRouteError::network(format!("Failed to connect to Ollama: {}", e))
        })?;
        Ok(response.status().is_success())
    }
}
