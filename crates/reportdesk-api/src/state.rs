//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use reportdesk_core::config::AppConfig;
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::BlobStore;
use reportdesk_database::{RecordStore, build_record_store};
use reportdesk_service::{FormController, ReportListController, ReportSession};
use reportdesk_storage::build_blob_store;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Record store backend
    pub records: Arc<dyn RecordStore>,
    /// Blob store backend
    pub blobs: Arc<dyn BlobStore>,
    /// Record form submission
    pub form: Arc<FormController>,
    /// Shared report list
    pub reports: Arc<ReportSession>,
}

impl AppState {
    /// Wire controllers over existing stores.
    pub fn new(
        config: AppConfig,
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let max_upload = config.blobs.max_upload_size_bytes;
        let form = FormController::new(Arc::clone(&records), Arc::clone(&blobs), max_upload);
        let list = ReportListController::new(Arc::clone(&records), Arc::clone(&blobs), max_upload);

        Self {
            config: Arc::new(config),
            records,
            blobs,
            form: Arc::new(form),
            reports: Arc::new(ReportSession::new(list)),
        }
    }

    /// Build the configured stores and wire everything together.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let records = build_record_store(&config.records).await?;
        let blobs = build_blob_store(&config.blobs).await?;
        Ok(Self::new(config, records, blobs))
    }
}
