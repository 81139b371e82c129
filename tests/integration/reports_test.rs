//! Report submission, listing, editing and deletion over HTTP.

use axum::http::{StatusCode, header};
use chrono::{TimeZone, Utc};

use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{Record, RecordFields, is_placeholder};

use crate::helpers::{PNG_BYTES, TestApp, valid_fields};

fn seeded(id: &str, name: &str, amount: f64, day: u32) -> Record {
    Record::from_parts(
        RecordId::new(id),
        RecordFields {
            name_surname: name.into(),
            document_date: format!("2024-03-{day:02}"),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            duration: "01/01/2024 to 31/01/2024".into(),
            amount,
            place: "Bangkok".into(),
            id_card_number: "1100700000001".into(),
        },
        "https://cdn.test/a.png".into(),
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, day, 0).unwrap()),
    )
}

fn ids(body: &serde_json::Value) -> Vec<String> {
    body["data"]["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn test_submit_without_image_uses_placeholder() {
    let app = TestApp::new();

    let response = app
        .multipart("POST", "/api/reports", &valid_fields("Anan Wong", "1500"), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers[header::LOCATION], "/reports");
    let data = &response.body["data"];
    assert_eq!(data["nameSurname"], "Anan Wong");
    assert_eq!(data["duration"], "01/01/2024 to 31/01/2024");
    assert_eq!(data["amount"], 1500.0);
    assert!(is_placeholder(data["avatarUrl"].as_str().expect("avatar")));
    assert!(data["timestamp"].is_string());
    assert_eq!(app.records.len(), 1);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_submit_with_image_stores_avatar() {
    let app = TestApp::new();

    let response = app
        .multipart(
            "POST",
            "/api/reports",
            &valid_fields("Anan Wong", "1500"),
            Some(("photo.png", PNG_BYTES)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["data"]["avatarUrl"],
        "http://localhost:8080/media/avatars/photo.png"
    );
    assert!(app.blobs.contains("avatars/photo.png"));
}

#[tokio::test]
async fn test_submit_missing_field_is_rejected_before_any_write() {
    let app = TestApp::new();
    let fields: Vec<_> = valid_fields("Anan Wong", "1500")
        .into_iter()
        .filter(|(name, _)| *name != "place")
        .collect();

    let response = app
        .multipart("POST", "/api/reports", &fields, Some(("photo.png", PNG_BYTES)))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.records.is_empty());
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_submit_rejects_non_image_upload() {
    let app = TestApp::new();

    let response = app
        .multipart(
            "POST",
            "/api/reports",
            &valid_fields("Anan Wong", "1500"),
            Some(("notes.txt", b"just some text")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.records.is_empty());
}

#[tokio::test]
async fn test_list_orders_by_requested_key() {
    let app = TestApp::with_records(vec![
        seeded("a", "charlie", 10.0, 3),
        seeded("b", "Alice", 300.0, 1),
        seeded("c", "bob", 20.0, 2),
    ]);

    let latest = app.request("GET", "/api/reports").await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(latest.body["data"]["sort"], "latest");
    assert_eq!(latest.body["data"]["count"], 3);
    assert_eq!(ids(&latest.body), ["a", "c", "b"]);

    let by_amount = app.request("GET", "/api/reports?sort=amount").await;
    assert_eq!(ids(&by_amount.body), ["b", "c", "a"]);

    let by_name = app.request("GET", "/api/reports?sort=name").await;
    assert_eq!(ids(&by_name.body), ["b", "c", "a"]);

    let by_date = app.request("GET", "/api/reports?sort=date").await;
    assert_eq!(ids(&by_date.body), ["a", "c", "b"]);
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_key() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/reports?sort=size").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_submission_appears_in_loaded_list() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);
    assert_eq!(app.request("GET", "/api/reports").await.body["data"]["count"], 1);

    app.multipart("POST", "/api/reports", &valid_fields("Dao", "5"), None)
        .await;

    let listed = app.request("GET", "/api/reports").await;
    assert_eq!(listed.body["data"]["count"], 2);
    assert_eq!(listed.body["data"]["records"][0]["nameSurname"], "Dao");
}

#[tokio::test]
async fn test_edit_overwrites_sent_fields_and_keeps_the_rest() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);

    let response = app
        .multipart(
            "PUT",
            "/api/reports/a",
            &[("place", "Chiang Mai"), ("amount", "42.5")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["place"], "Chiang Mai");
    assert_eq!(data["amount"], 42.5);
    assert_eq!(data["nameSurname"], "charlie");
    assert_eq!(data["duration"], "01/01/2024 to 31/01/2024");
    assert_eq!(data["avatarUrl"], "https://cdn.test/a.png");

    let stored = app.records.get(&RecordId::new("a")).expect("stored");
    assert_eq!(stored.place, "Chiang Mai");
    assert!(stored.timestamp > Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 3, 0).unwrap()));

    let state = app.request("GET", "/api/reports/state").await;
    assert_eq!(state.body["data"]["phase"], "ready");
    assert_eq!(state.body["data"]["notice"], "Record updated successfully");
    assert!(state.body["data"]["saving"].is_null());
    assert!(state.body["data"]["lastEditTime"].is_string());
}

#[tokio::test]
async fn test_edited_record_keeps_position_until_sorted_again() {
    let app = TestApp::with_records(vec![
        seeded("a", "charlie", 10.0, 3),
        seeded("b", "Alice", 300.0, 1),
        seeded("c", "bob", 20.0, 2),
    ]);
    let by_amount = app.request("GET", "/api/reports?sort=amount").await;
    assert_eq!(ids(&by_amount.body), ["b", "c", "a"]);

    app.multipart("PUT", "/api/reports/a", &[("amount", "500")], None)
        .await;

    let unsorted = app.request("GET", "/api/reports").await;
    assert_eq!(ids(&unsorted.body), ["b", "c", "a"]);
    let resorted = app.request("GET", "/api/reports?sort=amount").await;
    assert_eq!(ids(&resorted.body), ["a", "b", "c"]);
}

#[tokio::test]
async fn test_edit_stores_blank_duration_as_sent() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);

    let response = app
        .multipart(
            "PUT",
            "/api/reports/a",
            &[("startDate", "2025-06-01"), ("endDate", "2025-06-30"), ("duration", "")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["duration"], "");
    let stored = app.records.get(&RecordId::new("a")).expect("stored");
    assert_eq!(stored.duration, "");
    assert_eq!(stored.start_date, "2025-06-01");
}

#[tokio::test]
async fn test_edit_with_new_avatar_uploads_under_record_key() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);

    let response = app
        .multipart("PUT", "/api/reports/a", &[], Some(("me.png", PNG_BYTES)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["avatarUrl"],
        "http://localhost:8080/media/avatars/a-me.png"
    );
    assert!(app.blobs.contains("avatars/a-me.png"));
}

#[tokio::test]
async fn test_edit_unknown_record_is_not_found() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);
    let response = app
        .multipart("PUT", "/api/reports/zzz", &[("place", "Nan")], None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_with_invalid_amount_leaves_record_untouched() {
    let app = TestApp::with_records(vec![seeded("a", "charlie", 10.0, 3)]);

    let response = app
        .multipart("PUT", "/api/reports/a", &[("amount", "lots")], None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let stored = app.records.get(&RecordId::new("a")).expect("stored");
    assert_eq!(stored.amount, 10.0);
}

#[tokio::test]
async fn test_delete_removes_record_from_store_and_list() {
    let app = TestApp::with_records(vec![
        seeded("a", "charlie", 10.0, 3),
        seeded("b", "Alice", 300.0, 1),
    ]);

    let response = app.request("DELETE", "/api/reports/a").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.records.get(&RecordId::new("a")).is_none());

    let listed = app.request("GET", "/api/reports").await;
    assert_eq!(ids(&listed.body), ["b"]);

    let again = app.request("DELETE", "/api/reports/a").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
