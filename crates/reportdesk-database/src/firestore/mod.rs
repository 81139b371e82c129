//! Cloud Firestore record store over the REST API.
//!
//! Records live as documents in one collection. Creation assigns the
//! identifier client-side and asks the server to stamp the write time, so a
//! single commit both inserts and returns everything the caller needs.

pub mod client;
pub mod codec;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use reportdesk_core::config::FirestoreConfig;
use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;
use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{CreateRecord, Record, ReplaceRecord};

use crate::store::RecordStore;

pub use client::FirestoreClient;

const LIST_PAGE_SIZE: u32 = 300;

/// Record store persisting to a Firestore collection.
#[derive(Debug, Clone)]
pub struct FirestoreRecordStore {
    client: FirestoreClient,
    collection: String,
}

impl FirestoreRecordStore {
    /// Create a store for `collection` in the configured database.
    pub fn new(config: &FirestoreConfig, collection: &str) -> AppResult<Self> {
        let client = FirestoreClient::new(config)?;
        info!(
            project_id = %config.project_id,
            collection,
            "Firestore record store configured"
        );
        Ok(Self {
            client,
            collection: collection.to_string(),
        })
    }
}

#[async_trait]
impl RecordStore for FirestoreRecordStore {
    fn backend_type(&self) -> &str {
        "firestore"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client.list_page(&self.collection, 1, None).await?;
        Ok(true)
    }

    async fn create(&self, record: &CreateRecord) -> AppResult<Record> {
        let id = RecordId::generate();
        let write = json!([{
            "update": {
                "name": self.client.document_name(&self.collection, id.as_str()),
                "fields": codec::encode_fields(&record.fields, &record.avatar_url, None),
            },
            "currentDocument": { "exists": false },
            "updateTransforms": [{
                "fieldPath": codec::TIMESTAMP_FIELD,
                "setToServerValue": "REQUEST_TIME",
            }],
        }]);

        let response = self.client.commit(write).await?;
        let timestamp = response
            .write_results
            .first()
            .and_then(|w| w.transform_results.first())
            .and_then(|v| v.get("timestampValue"))
            .and_then(|v| v.as_str())
            .or(response.commit_time.as_deref())
            .and_then(codec::parse_timestamp);

        debug!(record_id = %id, "Record created in Firestore");
        Ok(Record::from_parts(
            id,
            record.fields.clone(),
            record.avatar_url.clone(),
            timestamp,
        ))
    }

    async fn list_all(&self) -> AppResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_page(&self.collection, LIST_PAGE_SIZE, token.as_deref())
                .await?;
            records.extend(page.documents.iter().map(codec::decode_document));
            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }
        debug!(count = records.len(), "Listed Firestore records");
        Ok(records)
    }

    async fn replace(&self, id: &RecordId, record: &ReplaceRecord) -> AppResult<()> {
        let fields =
            codec::encode_fields(&record.fields, &record.avatar_url, Some(record.timestamp));
        self.client
            .patch_existing(&self.collection, id.as_str(), fields)
            .await
            .map_err(|e| not_found_for(e, id))
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.client
            .delete_existing(&self.collection, id.as_str())
            .await
            .map_err(|e| not_found_for(e, id))
    }
}

fn not_found_for(err: AppError, id: &RecordId) -> AppError {
    match err.kind {
        ErrorKind::NotFound => AppError::not_found(format!("Record '{id}' not found")),
        _ => err,
    }
}
