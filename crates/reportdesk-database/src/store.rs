//! Record store trait.

use async_trait::async_trait;

use reportdesk_core::result::AppResult;
use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{CreateRecord, Record, ReplaceRecord};

/// A document database holding records.
///
/// The store owns identifiers and creation timestamps. Every operation is a
/// single remote call with no retry; failures surface as `AppError`s with a
/// remote [`ErrorKind`](reportdesk_core::error::ErrorKind), or `NotFound`
/// when the identifier does not exist.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g. "memory", "firestore").
    fn backend_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a new record. The returned record carries the assigned
    /// identifier and server timestamp.
    async fn create(&self, record: &CreateRecord) -> AppResult<Record>;

    /// Fetch every record, in no particular order.
    async fn list_all(&self) -> AppResult<Vec<Record>>;

    /// Overwrite the whole stored document for `id`.
    async fn replace(&self, id: &RecordId, record: &ReplaceRecord) -> AppResult<()>;

    /// Remove the record with `id`.
    async fn delete(&self, id: &RecordId) -> AppResult<()>;
}
