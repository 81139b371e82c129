//! # reportdesk-storage
//!
//! Blob store providers for avatar images: process memory, the local
//! filesystem, and Firebase Storage over its REST API.

pub mod keys;
pub mod providers;

use std::sync::Arc;

use tracing::info;

use reportdesk_core::config::{BlobBackend, BlobStoreConfig};
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::BlobStore;

pub use providers::{FirebaseBlobStore, LocalBlobStore, MemoryBlobStore};

/// Construct the configured blob store backend.
pub async fn build_blob_store(config: &BlobStoreConfig) -> AppResult<Arc<dyn BlobStore>> {
    info!(backend = config.backend.as_str(), "Initializing blob store");

    let store: Arc<dyn BlobStore> = match config.backend {
        BlobBackend::Memory => Arc::new(MemoryBlobStore::new(&config.local.public_base_url)),
        BlobBackend::Local => Arc::new(LocalBlobStore::new(&config.local).await?),
        BlobBackend::Firebase => Arc::new(FirebaseBlobStore::new(&config.firebase)?),
    };

    Ok(store)
}
