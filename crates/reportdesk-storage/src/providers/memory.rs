//! In-process blob store.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::{BlobObject, BlobStore};

use crate::keys::validate_key;

use super::public_url;

/// Blob store that keeps objects in memory.
///
/// Download URLs point at `public_base_url`, so the server's media route can
/// serve them back.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<String, BlobObject>>,
    public_base_url: String,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            public_base_url: public_base_url.to_string(),
        }
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        validate_key(key)?;
        debug!(key, bytes = data.len(), "Stored blob in memory");
        self.objects.insert(
            key.to_string(),
            BlobObject {
                data,
                content_type: Some(content_type.to_string()),
            },
        );
        Ok(())
    }

    async fn download_url(&self, key: &str) -> AppResult<String> {
        validate_key(key)?;
        if !self.objects.contains_key(key) {
            return Err(AppError::not_found(format!("Blob not found: {key}")));
        }
        Ok(public_url(&self.public_base_url, key))
    }

    async fn read(&self, key: &str) -> AppResult<BlobObject> {
        validate_key(key)?;
        self.objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }
}
