//! Tubely Storage Library
//!
//! This crate provides the storage abstraction used to publish finished uploads, with
//! implementations for S3 (via `object_store`) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `[<orientation>/]<random>.<ext>` where `<random>` is 32 CSPRNG bytes in
//! URL-safe base64. Thumbnails carry no orientation prefix. Key generation lives in the
//! `keys` module so every backend sees the same layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{extension_for_content_type, AssetKey};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
