//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// A remote store rejected or failed the put
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Writing to the local assets directory failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// A backend places finished bytes under a key and knows the externally reachable
/// URL for that key. Keys are produced by [`crate::AssetKey`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Copy the file at `source` to `storage_key` and return its public URL.
    ///
    /// Remote backends issue exactly one put; nothing is retried.
    async fn put_file(
        &self,
        storage_key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Public URL for `storage_key` (pure, no I/O)
    fn public_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
