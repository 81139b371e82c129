//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reportdesk_core::types::{RecordId, SortKey};
use reportdesk_entity::record::Record;
use reportdesk_service::{EditNotice, ListPhase, ReportListState};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health of one backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Backend type name.
    pub backend: String,
    /// Whether the backend answered.
    pub healthy: bool,
    /// Failure detail when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Record store health.
    pub records: ComponentHealth,
    /// Blob store health.
    pub blobs: ComponentHealth,
}

/// A record as listed, with its display timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    /// The stored record.
    #[serde(flatten)]
    pub record: Record,
    /// `dd/mm/yyyy HH:MM:SS`, or "No date available".
    pub submitted_at: String,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        Self {
            submitted_at: record.submitted_at_display(),
            record: record.clone(),
        }
    }
}

/// `GET /api/reports` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListResponse {
    /// Key the records are ordered by.
    pub sort: SortKey,
    /// Number of records.
    pub count: usize,
    /// Records in display order.
    pub records: Vec<RecordView>,
}

impl From<&ReportListState> for ReportListResponse {
    fn from(state: &ReportListState) -> Self {
        Self {
            sort: state.sort(),
            count: state.records().len(),
            records: state.records().iter().map(RecordView::from).collect(),
        }
    }
}

/// `GET /api/reports/state` payload: everything but the records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStateResponse {
    /// Load phase, with the failure message when failed.
    #[serde(flatten)]
    pub phase: ListPhase,
    /// Current sort key.
    pub sort: SortKey,
    /// Number of loaded records.
    pub count: usize,
    /// Record whose edit is being written.
    pub saving: Option<RecordId>,
    /// Success notice from the last edit.
    pub notice: Option<String>,
    /// When the last edit completed.
    pub last_edit_time: Option<DateTime<Utc>>,
}

impl From<&ReportListState> for ReportStateResponse {
    fn from(state: &ReportListState) -> Self {
        let notice: Option<&EditNotice> = state.notice();
        Self {
            phase: state.phase().clone(),
            sort: state.sort(),
            count: state.records().len(),
            saving: state.saving().cloned(),
            notice: notice.map(|n| n.message.clone()),
            last_edit_time: notice.map(|n| n.edited_at),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}
