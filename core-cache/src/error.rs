//! # Cache Error Types
//!
//! Error types for offline cache operations.
//!
//! Nothing here crosses the public service contract: [`AssetCacheService`]
//! absorbs every failure and surfaces it to callers as a benign return value
//! (`None`, `false`, an empty sequence, `0`).
//!
//! [`AssetCacheService`]: crate::service::AssetCacheService

use thiserror::Error;

/// Errors that can occur inside the cache core.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Persisted collection could not be read.
    #[error("Storage read failed: {0}")]
    StorageRead(String),

    /// Persisted collection could not be written.
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// Transfer failed or was refused by the remote.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Blob or directory operation failed.
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Persisted bytes did not decode.
    #[error("Malformed persisted collection: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Returns `true` when the failure degrades to an empty collection
    /// instead of blocking the operation.
    pub fn is_fail_open(&self) -> bool {
        matches!(
            self,
            CacheError::StorageRead(_) | CacheError::Serialization(_)
        )
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_open_classification() {
        assert!(CacheError::StorageRead("gone".to_string()).is_fail_open());

        let corrupt = serde_json::from_slice::<Vec<u8>>(b"not json").unwrap_err();
        assert!(CacheError::Serialization(corrupt).is_fail_open());

        assert!(!CacheError::StorageWrite("disk full".to_string()).is_fail_open());
        assert!(!CacheError::Transport("offline".to_string()).is_fail_open());
        assert!(!CacheError::Filesystem("denied".to_string()).is_fail_open());
    }
}
