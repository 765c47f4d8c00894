use chrono::{DateTime, Utc};
use serde::Serialize;

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Insertion index of the document in the store
    pub position: usize,

    /// Stored document text
    pub document: String,

    /// Squared Euclidean distance to the query (0.0 is an exact match)
    pub distance: f32,
}

impl SearchResult {
    pub fn new(position: usize, document: impl Into<String>, distance: f32) -> Self {
        Self {
            position,
            document: document.into(),
            distance,
        }
    }
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Number of stored documents
    pub documents: usize,

    /// Embedding dimension
    pub dimension: usize,

    /// Embedding model used
    pub embedding_model: String,

    /// Time of the last mutation or load
    pub updated_at: Option<DateTime<Utc>>,
}
