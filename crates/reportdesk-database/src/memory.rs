//! In-process record store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;
use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{CreateRecord, Record, ReplaceRecord};

use crate::store::RecordStore;

/// Record store that lives only as long as the process.
///
/// Used for local runs and tests. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<DashMap<RecordId, Record>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, keyed by their ids.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        for record in records {
            store.records.insert(record.id.clone(), record);
        }
        store
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create(&self, record: &CreateRecord) -> AppResult<Record> {
        let id = RecordId::generate();
        let created = Record::from_parts(
            id.clone(),
            record.fields.clone(),
            record.avatar_url.clone(),
            Some(Utc::now()),
        );
        self.records.insert(id.clone(), created.clone());
        debug!(record_id = %id, "Record created in memory");
        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn replace(&self, id: &RecordId, record: &ReplaceRecord) -> AppResult<()> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Record '{id}' not found")))?;
        let updated = entry.value().replaced_with(record);
        *entry.value_mut() = updated;
        debug!(record_id = %id, "Record replaced in memory");
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Record '{id}' not found")))
    }
}
