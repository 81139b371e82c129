//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use reportdesk_api::{AppState, build_app};
use reportdesk_core::config::AppConfig;
use reportdesk_database::MemoryRecordStore;
use reportdesk_entity::record::Record;
use reportdesk_storage::MemoryBlobStore;

/// Smallest byte sequence recognised as a PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

const BOUNDARY: &str = "reportdesk-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Record store behind the router
    pub records: MemoryRecordStore,
    /// Blob store behind the router
    pub blobs: MemoryBlobStore,
}

impl TestApp {
    /// App over empty in-memory stores.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// App whose record store starts with `seed`.
    pub fn with_records(seed: Vec<Record>) -> Self {
        let config = AppConfig::default();
        let records = MemoryRecordStore::with_records(seed);
        let blobs = MemoryBlobStore::new(&config.blobs.local.public_base_url);
        let state = AppState::new(config, Arc::new(records.clone()), Arc::new(blobs.clone()));

        Self {
            router: build_app(state),
            records,
            blobs,
        }
    }

    /// Send a request without a body.
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a multipart form with text `fields` and an optional image part.
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields, image)))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a request and return status, headers and raw body.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes: bytes.to_vec(),
            body,
        }
    }
}

/// Form fields for a valid new record.
pub fn valid_fields<'a>(name: &'a str, amount: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("nameSurname", name),
        ("documentDate", "2024-03-01"),
        ("startDate", "2024-01-01"),
        ("endDate", "2024-01-31"),
        ("amount", amount),
        ("place", "Bangkok"),
        ("idCardNumber", "1100700000001"),
    ]
}

fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}
