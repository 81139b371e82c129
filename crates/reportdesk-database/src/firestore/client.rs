//! Thin HTTP client for the Firestore REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use reportdesk_core::config::FirestoreConfig;
use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;

use super::codec::Document;

/// One page of a collection listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Documents on this page. Absent for an empty collection.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Token for the following page, absent on the last one.
    pub next_page_token: Option<String>,
}

/// Response of a `documents:commit` call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    /// Per-write results in request order.
    #[serde(default)]
    pub write_results: Vec<WriteResult>,
    /// Instant the commit was applied.
    pub commit_time: Option<String>,
}

/// Result of a single write within a commit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    /// Values produced by field transforms, in transform order.
    #[serde(default)]
    pub transform_results: Vec<Value>,
}

/// Low-level access to one Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: Client,
    base_url: Url,
    project_id: String,
    database_id: String,
    api_key: String,
}

impl FirestoreClient {
    /// Build a client from configuration.
    pub fn new(config: &FirestoreConfig) -> AppResult<Self> {
        if config.project_id.trim().is_empty() {
            return Err(AppError::configuration(
                "records.firestore.project_id must be set for the firestore backend",
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid Firestore base URL '{}'", config.base_url),
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
            project_id: config.project_id.clone(),
            database_id: config.database_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resource name of a document, as used inside write requests.
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}/{}",
            self.project_id, self.database_id, collection, id
        )
    }

    /// Apply a batch of writes atomically.
    pub async fn commit(&self, writes: Value) -> AppResult<CommitResponse> {
        let url = self.url(&["documents:commit"], &[]);
        let body = serde_json::json!({ "writes": writes });
        let response = self.send(self.http.post(url).json(&body), "commit").await?;
        decode_json(response, "commit").await
    }

    /// Fetch one page of a collection.
    pub async fn list_page(
        &self,
        collection: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> AppResult<ListPage> {
        let size = page_size.to_string();
        let mut query = vec![("pageSize", size.as_str())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        let url = self.url(&["documents", collection], &query);
        let response = self.send(self.http.get(url), "list").await?;
        decode_json(response, "list").await
    }

    /// Overwrite an existing document with `fields`. Fails with `NotFound`
    /// when the document does not exist.
    pub async fn patch_existing(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Map<String, Value>,
    ) -> AppResult<()> {
        let url = self.url(
            &["documents", collection, id],
            &[("currentDocument.exists", "true")],
        );
        let body = serde_json::json!({ "fields": fields });
        self.send(self.http.request(Method::PATCH, url).json(&body), "patch")
            .await?;
        Ok(())
    }

    /// Delete an existing document. Fails with `NotFound` when absent.
    pub async fn delete_existing(&self, collection: &str, id: &str) -> AppResult<()> {
        let url = self.url(
            &["documents", collection, id],
            &[("currentDocument.exists", "true")],
        );
        self.send(self.http.delete(url), "delete").await?;
        Ok(())
    }

    fn url(&self, tail: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["projects", self.project_id.as_str()])
                .extend(["databases", self.database_id.as_str()])
                .extend(tail);
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

    async fn send(&self, request: RequestBuilder, op: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                ErrorKind::ServiceUnavailable
            } else {
                ErrorKind::ExternalService
            };
            AppError::with_source(kind, format!("Firestore {op} request failed"), e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(op, status = status.as_u16(), "Firestore request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(op, status = status.as_u16(), "Firestore request rejected");
        Err(AppError::from_http_status(
            status.as_u16(),
            format!("Firestore {op} returned {status}: {}", body.trim()),
        ))
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response, op: &str) -> AppResult<T> {
    response.json::<T>().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Malformed Firestore {op} response"),
            e,
        )
    })
}
