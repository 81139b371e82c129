//! Blob store trait for pluggable avatar image backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A blob read back from a store, with its content type when known.
#[derive(Debug, Clone)]
pub struct BlobObject {
    /// Raw bytes.
    pub data: Bytes,
    /// MIME type recorded at upload time (or guessed from the key).
    pub content_type: Option<String>,
}

/// Trait for binary object stores holding avatar images.
///
/// Implementations exist for process memory, the local filesystem and
/// Firebase Storage. Keys are `/`-separated relative paths such as
/// `avatars/abc-photo.png`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g. "local", "firebase").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Upload bytes under `key`, replacing any existing object.
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Resolve a download URL for an existing object.
    async fn download_url(&self, key: &str) -> AppResult<String>;

    /// Read an object back. Only locally served backends need this.
    async fn read(&self, key: &str) -> AppResult<BlobObject>;
}
