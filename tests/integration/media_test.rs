//! Avatar serving and health reporting.

use axum::http::{StatusCode, header};

use crate::helpers::{PNG_BYTES, TestApp, valid_fields};

#[tokio::test]
async fn test_uploaded_avatar_is_served_under_media() {
    let app = TestApp::new();
    app.multipart(
        "POST",
        "/api/reports",
        &valid_fields("Anan Wong", "1500"),
        Some(("photo.png", PNG_BYTES)),
    )
    .await;

    let response = app.request("GET", "/media/avatars/photo.png").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.bytes, PNG_BYTES);
}

#[tokio::test]
async fn test_missing_media_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/media/avatars/none.png").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_both_stores() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["records"]["backend"], "memory");
    assert_eq!(response.body["data"]["blobs"]["backend"], "memory");
}
