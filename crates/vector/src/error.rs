use autoroute_common::AutoRouteError;

/// Errors raised by the embedding store and its snapshot codec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store constructed with a zero dimension
    #[error("embedding dimension must be positive")]
    InvalidDimension,

    /// Vector length differs from the store dimension
    #[error("expected vector of dimension {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vectors and documents supplied in different counts
    #[error("got {vectors} vectors but {documents} documents")]
    LengthMismatch { vectors: usize, documents: usize },

    /// Snapshot bytes could not be decoded
    #[error("corrupt index snapshot: {0}")]
    Corrupt(String),

    /// Snapshot checksum does not match its contents
    #[error("index snapshot checksum mismatch")]
    ChecksumMismatch,

    /// Store exceeds a size the snapshot format can represent
    #[error("index too large for snapshot: {0}")]
    TooLarge(&'static str),
}

impl StoreError {
    pub(crate) fn corrupt<S: Into<String>>(msg: S) -> Self {
        Self::Corrupt(msg.into())
    }
}

impl From<StoreError> for AutoRouteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidDimension
            | StoreError::DimensionMismatch { .. }
            | StoreError::LengthMismatch { .. } => AutoRouteError::invalid_input(err.to_string()),
            StoreError::Corrupt(_) | StoreError::ChecksumMismatch | StoreError::TooLarge(_) => {
                AutoRouteError::vector_search(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_map_to_invalid_input() {
        let err: AutoRouteError = StoreError::DimensionMismatch {
            expected: 3,
            actual: 2,
        }
        .into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Invalid input: expected vector of dimension 3, got 2"
        );
    }

    #[test]
    fn test_snapshot_errors_map_to_server_error() {
        let err: AutoRouteError = StoreError::ChecksumMismatch.into();
        assert_eq!(err.status_code(), 500);

        let err: AutoRouteError = StoreError::TooLarge("dimension does not fit in u32").into();
        assert_eq!(err.status_code(), 500);
    }
}
