/// AutoRoute error types
#[derive(Debug, thiserror::Error)]
pub enum AutoRouteError {
    /// Vector store related error
    #[error("Vector search error: {0}")]
    VectorSearch(String),

    /// LLM / embedding model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error talking to an upstream model server
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AutoRouteError {
    /// Create vector search error
    pub fn vector_search<S: Into<String>>(msg: S) -> Self {
        Self::VectorSearch(msg.into())
    }

    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than a fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// HTTP status code the service boundary should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::Json(_) => 400,
            Self::Llm(_) | Self::Network(_) => 503,
            Self::VectorSearch(_)
            | Self::Config(_)
            | Self::Internal(_)
            | Self::Io(_)
            | Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AutoRouteError::invalid_input("bad").status_code(), 400);
        assert_eq!(AutoRouteError::network("refused").status_code(), 503);
        assert_eq!(AutoRouteError::llm("down").status_code(), 503);
        assert_eq!(AutoRouteError::vector_search("corrupt").status_code(), 500);
    }

    #[test]
    fn test_client_error() {
        assert!(AutoRouteError::invalid_input("bad").is_client_error());
        assert!(!AutoRouteError::internal("boom").is_client_error());
    }

    #[test]
    fn test_display() {
        let err = AutoRouteError::invalid_input("dimension mismatch");
        assert_eq!(err.to_string(), "Invalid input: dimension mismatch");
    }
}
