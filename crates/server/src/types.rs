use autoroute_router::Route;
use autoroute_vector::SearchResult;
use serde::{Deserialize, Serialize};

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User text
    pub text: String,
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Answer shown to the user
    pub response: String,

    /// Component that produced the answer
    pub route: Route,

    /// Matched documents, only on the vector search route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchResult>>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    pub q: String,

    /// Top K results, server default when absent
    pub top_k: Option<usize>,
}

/// Search by raw embedding
#[derive(Debug, Deserialize)]
pub struct VectorSearchRequest {
    pub vector: Vec<f32>,

    pub top_k: Option<usize>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub count: usize,
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn new(query: Option<String>, results: Vec<SearchResult>) -> Self {
        Self {
            query,
            count: results.len(),
            results,
        }
    }
}

/// Add documents to be embedded by the server
#[derive(Debug, Deserialize)]
pub struct AddDocumentsRequest {
    pub documents: Vec<String>,
}

/// Add documents with precomputed embeddings
#[derive(Debug, Deserialize)]
pub struct AddEmbeddingsRequest {
    pub embeddings: Vec<Vec<f32>>,
    pub documents: Vec<String>,
}

/// Result of an insertion
#[derive(Debug, Serialize)]
pub struct AddDocumentsResponse {
    /// Documents appended by this request
    pub added: usize,

    /// Store size afterwards
    pub total: usize,
}

/// Result of clearing the index
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
