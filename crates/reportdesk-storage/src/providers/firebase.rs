//! Firebase Storage blob store over the REST API.
//!
//! Objects are addressed by their full key as a single, percent-encoded path
//! segment (`o/avatars%2Fphoto.png`). Download URLs carry the object's
//! download token so they can be fetched without credentials.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use reportdesk_core::config::FirebaseStorageConfig;
use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::{BlobObject, BlobStore};

use crate::keys::validate_key;

/// Subset of the object metadata resource the store relies on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    #[serde(default)]
    download_tokens: Option<String>,
}

/// Blob store backed by a Firebase Storage bucket.
#[derive(Debug, Clone)]
pub struct FirebaseBlobStore {
    http: Client,
    base_url: Url,
    bucket: String,
    api_key: String,
}

impl FirebaseBlobStore {
    /// Create a store for the configured bucket.
    pub fn new(config: &FirebaseStorageConfig) -> AppResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(AppError::configuration(
                "blobs.firebase.bucket must be set for the firebase backend",
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid Firebase Storage base URL '{}'", config.base_url),
                e,
            )
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url,
            bucket: config.bucket.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/b/{bucket}/o[/{key}]` with the given query pairs.
    fn object_url(&self, key: Option<&str>, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["b", self.bucket.as_str(), "o"]);
            if let Some(key) = key {
                segments.push(key);
            }
        }

        let has_key = !self.api_key.is_empty();
        if has_key || !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
            if has_key {
                pairs.append_pair("key", &self.api_key);
            }
        }
        url
    }

    async fn send(&self, request: RequestBuilder, op: &str, key: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                ErrorKind::ServiceUnavailable
            } else {
                ErrorKind::ExternalService
            };
            AppError::with_source(kind, format!("Firebase Storage {op} failed for {key}"), e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(op, key, status = status.as_u16(), "Firebase Storage request rejected");
        Err(AppError::from_http_status(
            status.as_u16(),
            format!("Firebase Storage {op} returned {status}: {}", body.trim()),
        ))
    }
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
    fn provider_type(&self) -> &str {
        "firebase"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let url = self.object_url(None, &[("maxResults", "1")]);
        self.send(self.http.get(url), "list", "").await?;
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        validate_key(key)?;
        let size = data.len();
        let url = self.object_url(None, &[("uploadType", "media"), ("name", key)]);
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(data);
        self.send(request, "upload", key).await?;
        debug!(key, bytes = size, "Uploaded blob to Firebase Storage");
        Ok(())
    }

    async fn download_url(&self, key: &str) -> AppResult<String> {
        validate_key(key)?;
        let response = self
            .send(self.http.get(self.object_url(Some(key), &[])), "metadata", key)
            .await?;
        let metadata: ObjectMetadata = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Malformed Firebase Storage metadata for {key}"),
                e,
            )
        })?;

        // Several comma-separated tokens may exist; any of them grants access.
        let token = metadata
            .download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()));

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["b", self.bucket.as_str(), "o"])
                .push(key);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("alt", "media");
            if let Some(token) = token {
                pairs.append_pair("token", token);
            }
        }
        Ok(url.to_string())
    }

    async fn read(&self, key: &str) -> AppResult<BlobObject> {
        validate_key(key)?;
        let url = self.object_url(Some(key), &[("alt", "media")]);
        let response = self.send(self.http.get(url), "download", key).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read Firebase Storage object {key}"),
                e,
            )
        })?;
        Ok(BlobObject { data, content_type })
    }
}
