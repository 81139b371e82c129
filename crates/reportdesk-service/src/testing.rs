//! Store doubles shared by the controller tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};

use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::{BlobObject, BlobStore};
use reportdesk_core::types::RecordId;
use reportdesk_database::{MemoryRecordStore, RecordStore};
use reportdesk_entity::record::{CreateRecord, Record, RecordFields, ReplaceRecord};
use reportdesk_storage::MemoryBlobStore;

/// Record store that counts calls and can be told to fail.
#[derive(Debug, Default)]
pub struct CountingRecords {
    pub inner: MemoryRecordStore,
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl CountingRecords {
    pub fn seeded(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryRecordStore::with_records(records),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn enter(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("record store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for CountingRecords {
    fn backend_type(&self) -> &str {
        "counting"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.fail.load(Ordering::SeqCst))
    }

    async fn create(&self, record: &CreateRecord) -> AppResult<Record> {
        self.enter()?;
        self.inner.create(record).await
    }

    async fn list_all(&self) -> AppResult<Vec<Record>> {
        self.enter()?;
        self.inner.list_all().await
    }

    async fn replace(&self, id: &RecordId, record: &ReplaceRecord) -> AppResult<()> {
        self.enter()?;
        self.inner.replace(id, record).await
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.enter()?;
        self.inner.delete(id).await
    }
}

/// Blob store that counts uploads and can be told to fail.
#[derive(Debug)]
pub struct CountingBlobs {
    pub inner: MemoryBlobStore,
    pub uploads: AtomicUsize,
    pub fail: AtomicBool,
}

impl CountingBlobs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryBlobStore::new("http://blobs.test"),
            uploads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for CountingBlobs {
    fn provider_type(&self) -> &str {
        "counting"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorKind::Storage, "blob store unavailable"));
        }
        self.inner.upload(key, data, content_type).await
    }

    async fn download_url(&self, key: &str) -> AppResult<String> {
        self.inner.download_url(key).await
    }

    async fn read(&self, key: &str) -> AppResult<BlobObject> {
        self.inner.read(key).await
    }
}

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// A stored record with distinct values per `seq`.
pub fn record(id: &str, name: &str, amount: f64, seq: u32) -> Record {
    Record::from_parts(
        RecordId::new(id),
        RecordFields {
            name_surname: name.into(),
            document_date: format!("2024-03-{:02}", seq.clamp(1, 28)),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            duration: "01/01/2024 to 31/01/2024".into(),
            amount,
            place: "Bangkok".into(),
            id_card_number: format!("110070000000{seq}"),
        },
        format!("http://blobs.test/avatars/{id}.png"),
        Utc.with_ymd_and_hms(2024, 5, 1, 8, seq, 0).single(),
    )
}
