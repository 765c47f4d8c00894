//! AutoRoute Vector Search Engine
//!
//! Exact nearest-neighbour store over fixed-dimension embeddings, its binary
//! snapshot format, and the shared async engine used by the server.

mod engine;
mod error;
mod search;
pub mod snapshot;
mod store;
mod types;

pub use engine::VectorSearchEngine;
pub use error::StoreError;
pub use search::{squared_euclidean, top_k};
pub use store::EmbeddingStore;
pub use types::{SearchResult, StoreStats};
