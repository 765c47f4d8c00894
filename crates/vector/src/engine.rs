use autoroute_common::{normalize_text, AppConfig, AutoRouteError, Result};
use autoroute_llm::LlmClient;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::snapshot;
use crate::store::EmbeddingStore;
use crate::types::{SearchResult, StoreStats};

struct IndexState {
    store: EmbeddingStore,
    updated_at: Option<DateTime<Utc>>,
}

/// Vector search engine
///
/// Wraps an [`EmbeddingStore`] behind a read/write lock. Searches share the
/// read lock. Mutations are serialized by `writer`; with persistence on they
/// build the next store from a copy, write its snapshot, and only then swap
/// it in, so the write lock is held for the swap alone and a failed save
/// changes nothing.
pub struct VectorSearchEngine {
    state: RwLock<IndexState>,
    writer: Mutex<()>,
    index_path: Option<PathBuf>,
    llm_client: Arc<dyn LlmClient>,
    embedding_model: String,
}

impl VectorSearchEngine {
    /// Create new vector search engine, loading the snapshot if one exists
    pub async fn new(config: &AppConfig, llm_client: Arc<dyn LlmClient>) -> Result<Self> {
        let index_path = config
            .persist_index
            .then(|| config.vector_index_path.clone());

        let (store, updated_at) = match &index_path {
            Some(path) if path.exists() => {
                let store = load_snapshot(path).await?;
                if store.dim() != config.embedding_dim {
                    return Err(AutoRouteError::config(format!(
                        "Index {} has dimension {}, but EMBEDDING_DIM is {}",
                        path.display(),
                        store.dim(),
                        config.embedding_dim
                    )));
                }
                (store, Some(Utc::now()))
            }
            _ => (EmbeddingStore::new(config.embedding_dim)?, None),
        };

        info!(
            "Vector search engine initialized - {} entries, dimension {}",
            store.len(),
            store.dim()
        );

        Ok(Self {
            state: RwLock::new(IndexState { store, updated_at }),
            writer: Mutex::new(()),
            index_path,
            llm_client,
            embedding_model: config.embedding_model.clone(),
        })
    }

    /// Engine over an existing store, without snapshot persistence
    pub fn with_store(
        store: EmbeddingStore,
        llm_client: Arc<dyn LlmClient>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            state: RwLock::new(IndexState {
                store,
                updated_at: None,
            }),
            writer: Mutex::new(()),
            index_path: None,
            llm_client,
            embedding_model: embedding_model.into(),
        }
    }

    /// Embed normalized text with the configured model
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.llm_client
            .embed(&self.embedding_model, &normalize_text(text))
            .await
    }

    /// Embed and append documents; returns the new store size
    ///
    /// All embeddings are produced before the write lock is taken, so a model
    /// failure part-way through leaves the index untouched.
    pub async fn add_documents(&self, documents: Vec<String>) -> Result<usize> {
        let mut vectors = Vec::with_capacity(documents.len());
        for doc in &documents {
            vectors.push(self.embed(doc).await?);
        }

        self.add_embeddings(vectors, documents).await
    }

    /// Append precomputed embeddings; returns the new store size
    pub async fn add_embeddings(
        &self,
        vectors: Vec<Vec<f32>>,
        documents: Vec<String>,
    ) -> Result<usize> {
        let added = documents.len();
        let total = self
            .mutate(|store| {
                store.add_documents(vectors, documents)?;
                Ok(store.len())
            })
            .await?;

        info!("Added {} documents to vector index ({} total)", added, total);
        Ok(total)
    }

    /// Search for documents similar to `query` text
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        debug!("Searching for: {} (top_k={})", query, top_k);

        let query_embedding = self.embed(query).await?;
        self.search_vector(&query_embedding, top_k).await
    }

    /// Search with a precomputed query embedding
    pub async fn search_vector(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let state = self.state.read().await;
        let results = state.store.search(query, top_k)?;

        info!(
            "Search completed - {} results (from {} candidates)",
            results.len(),
            state.store.len()
        );
        Ok(results)
    }

    /// Remove every document; returns how many were dropped
    pub async fn clear(&self) -> Result<usize> {
        let removed = self
            .mutate(|store| {
                let removed = store.len();
                store.clear();
                Ok(removed)
            })
            .await?;

        info!("Vector index cleared - {} documents removed", removed);
        Ok(removed)
    }

    /// Write the snapshot now, regardless of the persistence setting
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let _writer = self.writer.lock().await;
        let bytes = snapshot::encode(&self.state.read().await.store)?;
        write_snapshot(path, &bytes).await
    }

    /// Apply `apply` to the store, persisting the result first when enabled
    async fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut EmbeddingStore) -> std::result::Result<T, StoreError>,
    {
        let _writer = self.writer.lock().await;

        let Some(path) = &self.index_path else {
            let mut state = self.state.write().await;
            let out = apply(&mut state.store)?;
            state.updated_at = Some(Utc::now());
            return Ok(out);
        };

        let mut next = self.state.read().await.store.clone();
        let out = apply(&mut next)?;
        write_snapshot(path, &snapshot::encode(&next)?).await?;

        let mut state = self.state.write().await;
        state.store = next;
        state.updated_at = Some(Utc::now());
        Ok(out)
    }

    /// Get index statistics
    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            documents: state.store.len(),
            dimension: state.store.dim(),
            embedding_model: self.embedding_model.clone(),
            updated_at: state.updated_at,
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.store.is_empty()
    }
}

async fn load_snapshot(path: &Path) -> Result<EmbeddingStore> {
    let bytes = tokio::fs::read(path).await?;
    let store = snapshot::decode(&bytes).map_err(|e| {
        AutoRouteError::vector_search(format!("Failed to load {}: {}", path.display(), e))
    })?;
    info!("Loaded index snapshot {} ({} documents)", path.display(), store.len());
    Ok(store)
}

/// Write to `<path>.tmp` then rename over the target
async fn write_snapshot(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, bytes).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(
        "Index snapshot saved: {} ({} bytes, sha256 {})",
        path.display(),
        bytes.len(),
        snapshot::checksum_hex(bytes).unwrap_or_default()
    );
    Ok(())
}
