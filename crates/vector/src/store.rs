use crate::error::StoreError;
use crate::search::{squared_euclidean, top_k};
use crate::types::SearchResult;

/// In-memory exact nearest-neighbour store
///
/// Vectors live in one row-major buffer of `len() * dim()` floats; row `i`
/// belongs to `documents[i]`. Both collections only ever grow together, so
/// they stay index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingStore {
    dim: usize,
    vectors: Vec<f32>,
    documents: Vec<String>,
}

impl EmbeddingStore {
    /// Create an empty store for vectors of length `dim`
    pub fn new(dim: usize) -> Result<Self, StoreError> {
        if dim == 0 {
            return Err(StoreError::InvalidDimension);
        }

        Ok(Self {
            dim,
            vectors: Vec::new(),
            documents: Vec::new(),
        })
    }

    /// Rebuild a store from already validated parts
    pub(crate) fn from_parts(
        dim: usize,
        vectors: Vec<f32>,
        documents: Vec<String>,
    ) -> Result<Self, StoreError> {
        if dim == 0 {
            return Err(StoreError::InvalidDimension);
        }
        if vectors.len() != documents.len() * dim {
            return Err(StoreError::LengthMismatch {
                vectors: vectors.len() / dim,
                documents: documents.len(),
            });
        }

        Ok(Self {
            dim,
            vectors,
            documents,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document stored at insertion index `position`
    pub fn document(&self, position: usize) -> Option<&str> {
        self.documents.get(position).map(String::as_str)
    }

    /// Vector stored at insertion index `position`
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dim)?;
        let end = start.checked_add(self.dim)?;
        self.vectors.get(start..end)
    }

    /// `(vector, document)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &str)> + '_ {
        self.vectors
            .chunks_exact(self.dim)
            .zip(self.documents.iter().map(String::as_str))
    }

    pub(crate) fn raw_vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// Append documents with their embeddings
    ///
    /// Every input is validated before anything is appended, so a failed call
    /// leaves the store untouched.
    pub fn add_documents(
        &mut self,
        vectors: Vec<Vec<f32>>,
        documents: Vec<String>,
    ) -> Result<(), StoreError> {
        if vectors.len() != documents.len() {
            return Err(StoreError::LengthMismatch {
                vectors: vectors.len(),
                documents: documents.len(),
            });
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dim) {
            return Err(StoreError::DimensionMismatch {
                expected: self.dim,
                actual: bad.len(),
            });
        }

        self.vectors.reserve(vectors.len() * self.dim);
        for vector in &vectors {
            self.vectors.extend_from_slice(vector);
        }
        self.documents.extend(documents);

        Ok(())
    }

    /// The `k` stored documents closest to `query`, nearest first
    ///
    /// `k` larger than the store is clamped; an empty store or `k == 0` gives
    /// an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, StoreError> {
        if query.len() != self.dim {
            return Err(StoreError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }

        let distances = self
            .vectors
            .chunks_exact(self.dim)
            .map(|v| squared_euclidean(query, v))
            .enumerate();

        Ok(top_k(distances, k)
            .into_iter()
            .map(|(position, distance)| {
                SearchResult::new(position, self.documents[position].as_str(), distance)
            })
            .collect())
    }

    /// Drop every stored pair, keeping the dimension
    pub fn clear(&mut self) {
        self.vectors.clear();
        self.documents.clear();
    }
}
