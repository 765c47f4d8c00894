use autoroute_common::{AppConfig, Result};
use autoroute_llm::{LlmClient, OllamaClient};
use autoroute_router::Router;
use autoroute_vector::VectorSearchEngine;
use std::sync::Arc;
use tracing::{info, warn};

use crate::metrics::HttpMetrics;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Query router
    pub router: Router,

    /// FAQ vector index
    pub vector_search: Arc<VectorSearchEngine>,

    /// Chat model and embedding producer
    pub llm: Arc<dyn LlmClient>,

    /// Prometheus request metrics
    pub metrics: HttpMetrics,
}

impl AppState {
    /// Create new application state backed by Ollama
    pub async fn new(config: AppConfig) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(&config.ollama_base_url)?);

        match llm.test_connection().await {
            Ok(true) => info!("Ollama reachable at {}", config.ollama_base_url),
            Ok(false) | Err(_) => warn!(
                "Ollama not reachable at {}; chat and embedding requests will fail until it is",
                config.ollama_base_url
            ),
        }

        let vector_search = Arc::new(VectorSearchEngine::new(&config, llm.clone()).await?);
        Self::from_parts(config, llm, vector_search)
    }

    /// Assemble state from already constructed parts
    pub fn from_parts(
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        vector_search: Arc<VectorSearchEngine>,
    ) -> Result<Self> {
        let router = Router::with_faq_keywords(&config.faq_keywords);
        Ok(Self {
            config,
            router,
            vector_search,
            llm,
            metrics: HttpMetrics::new()?,
        })
    }
}
