//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use reportdesk_core::config::LocalBlobConfig;
use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::{BlobObject, BlobStore};

use crate::keys::validate_key;

use super::{mime_from_key, public_url};

/// Blob store writing objects below a root directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
    /// URL prefix under which the server exposes the root.
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a store rooted at `config.root_path`, creating it if needed.
    pub async fn new(config: &LocalBlobConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// Resolve a validated key to a path inside the root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write blob: {key}"), e)
        })?;

        debug!(key, content_type, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn download_url(&self, key: &str) -> AppResult<String> {
        let full_path = self.resolve(key)?;
        if !full_path.is_file() {
            return Err(AppError::not_found(format!("Blob not found: {key}")));
        }
        Ok(public_url(&self.public_base_url, key))
    }

    async fn read(&self, key: &str) -> AppResult<BlobObject> {
        let full_path = self.resolve(key)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read blob: {key}"), e)
            }
        })?;

        Ok(BlobObject {
            data: Bytes::from(data),
            content_type: mime_from_key(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(dir: &tempfile::TempDir) -> LocalBlobStore {
        LocalBlobStore::new(&LocalBlobConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
            public_base_url: "http://localhost:8080/media".into(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_read_and_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store
            .upload("avatars/a.png", Bytes::from("img"), "image/png")
            .await
            .unwrap();

        assert!(dir.path().join("avatars/a.png").is_file());
        let object = store.read("avatars/a.png").await.unwrap();
        assert_eq!(object.data, Bytes::from("img"));
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert_eq!(
            store.download_url("avatars/a.png").await.unwrap(),
            "http://localhost:8080/media/avatars/a.png"
        );
    }

    #[tokio::test]
    async fn test_upload_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        store.upload("avatars/a.png", Bytes::from("one"), "image/png").await.unwrap();
        store.upload("avatars/a.png", Bytes::from("two"), "image/png").await.unwrap();

        assert_eq!(store.read("avatars/a.png").await.unwrap().data, Bytes::from("two"));
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let err = store
            .upload("../escape.png", Bytes::from("x"), "image/png")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        assert_eq!(
            store.read("avatars/none.png").await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            store.download_url("avatars/none.png").await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
