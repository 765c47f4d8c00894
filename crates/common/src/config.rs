use crate::error::AutoRouteError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// AutoRoute application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Chat model name used for the `llm_chat` route
    pub llm_model: String,

    /// Embedding dimension every stored vector must have
    pub embedding_dim: usize,

    /// Number of neighbours returned when a request does not ask for a count
    pub default_top_k: usize,

    /// Vector index snapshot path
    pub vector_index_path: PathBuf,

    /// Save the index snapshot after every mutation
    pub persist_index: bool,

    /// Extra keywords that route a query to vector search
    pub faq_keywords: Vec<String>,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            llm_model: "llama3.2:latest".to_string(),
            embedding_dim: 768,
            default_top_k: 3,
            vector_index_path: PathBuf::from("./data/faq_index.bin"),
            persist_index: true,
            faq_keywords: Vec::new(),
            log_dir: PathBuf::from("./data/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, AutoRouteError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT")?.unwrap_or(defaults.server_port),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            embedding_dim: Self::get_env_parsed("EMBEDDING_DIM")?
                .unwrap_or(defaults.embedding_dim),
            default_top_k: Self::get_env_parsed("DEFAULT_TOP_K")?
                .unwrap_or(defaults.default_top_k),
            vector_index_path: Self::get_env_path("VECTOR_INDEX_PATH")
                .unwrap_or(defaults.vector_index_path),
            persist_index: Self::get_env_parsed("PERSIST_INDEX")?
                .unwrap_or(defaults.persist_index),
            faq_keywords: std::env::var("ROUTER_FAQ_KEYWORDS")
                .map(|raw| parse_keywords(&raw))
                .unwrap_or_default(),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse an environment variable, failing loudly on malformed values
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, AutoRouteError> {
        match std::env::var(key) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
                AutoRouteError::config(format!("{} has an invalid value: {:?}", key, raw))
            }),
            Err(_) => Ok(None),
        }
    }

    /// Ensure the directories the index and logs are written to exist
    pub fn ensure_directories(&self) -> Result<(), AutoRouteError> {
        let mut dirs = vec![self.log_dir.clone()];
        if let Some(parent) = self.vector_index_path.parent() {
            if !parent.as_os_str().is_empty() {
                dirs.push(parent.to_path_buf());
            }
        }

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(&dir).map_err(|e| {
                    AutoRouteError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AutoRouteError> {
        if self.embedding_model.is_empty() {
            return Err(AutoRouteError::config("Embedding model name cannot be empty"));
        }

        if self.llm_model.is_empty() {
            return Err(AutoRouteError::config("LLM model name cannot be empty"));
        }

        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(AutoRouteError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(AutoRouteError::config("Server port cannot be 0"));
        }

        if self.embedding_dim == 0 {
            return Err(AutoRouteError::config("Embedding dimension must be positive"));
        }

        if self.default_top_k == 0 {
            return Err(AutoRouteError::config("Default top_k must be positive"));
        }

        Ok(())
    }
}

/// Split a comma separated keyword list, dropping blanks
fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.embedding_dim, 768);
        assert_eq!(config.default_top_k, 3);
        assert!(config.faq_keywords.is_empty());
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.embedding_model = String::new();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.embedding_dim = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.ollama_base_url = "localhost:11434".to_string();
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_keywords("help, support ,,docs"), vec!["help", "support", "docs"]);
        assert!(parse_keywords("  ").is_empty());
    }
}
