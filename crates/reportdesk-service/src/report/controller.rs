//! Report list operations against the stores.
//!
//! Each operation that writes is two-phase: the remote call runs first, and
//! only on success does the caller apply the matching local transition to
//! the list state. A failed remote call leaves the state as it was.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;
use reportdesk_core::traits::BlobStore;
use reportdesk_core::types::{RecordId, SortKey};
use reportdesk_database::RecordStore;
use reportdesk_entity::record::{Record, RecordFields, ReplaceRecord};
use reportdesk_storage::keys::edit_avatar_key;

use crate::form::ImageUpload;

use super::state::ReportListState;

/// Loads, edits and deletes records for the list view.
#[derive(Clone)]
pub struct ReportListController {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for ReportListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportListController")
            .field("records", &self.records.backend_type())
            .field("blobs", &self.blobs.provider_type())
            .finish()
    }
}

impl ReportListController {
    /// Create a controller over the given stores.
    pub fn new(
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            records,
            blobs,
            max_upload_size_bytes,
        }
    }

    /// Fetch every record. A store failure becomes the `failed` phase
    /// rather than an error, so the list always settles.
    pub async fn load(&self, state: &ReportListState) -> ReportListState {
        match self.records.list_all().await {
            Ok(records) => {
                info!(count = records.len(), "Report list loaded");
                state.loaded(records)
            }
            Err(e) => {
                error!(error = %e, "Failed to load report list");
                state.failed(e.message)
            }
        }
    }

    /// Reorder the loaded records. Makes no store calls.
    pub fn resort(&self, state: &ReportListState, key: SortKey) -> ReportListState {
        state.sorted_by(key)
    }

    /// Write an edit of record `id`.
    ///
    /// `fields` is the complete edited field set. With an image, it is
    /// uploaded under `avatars/<id>-<file name>` and its URL replaces the
    /// avatar; without one the current avatar is kept. The stored document
    /// is overwritten with a fresh timestamp. Returns the record as it now
    /// stands; apply it with [`ReportListState::with_edit`].
    pub async fn save_edit(
        &self,
        state: &ReportListState,
        id: &RecordId,
        fields: RecordFields,
        image: Option<&ImageUpload>,
    ) -> AppResult<Record> {
        let current = state
            .find(id)
            .ok_or_else(|| AppError::not_found(format!("Record '{id}' is not in the list")))?;
        let content_type = image
            .map(|img| img.inspect(self.max_upload_size_bytes))
            .transpose()?;

        let avatar_url = match (image, content_type) {
            (Some(img), Some(content_type)) => {
                let key = edit_avatar_key(id.as_str(), &img.file_name);
                self.blobs
                    .upload(&key, img.data.clone(), content_type)
                    .await
                    .inspect_err(|e| error!(record_id = %id, error = %e, "Avatar upload failed"))?;
                self.blobs.download_url(&key).await.inspect_err(
                    |e| error!(record_id = %id, error = %e, "Avatar URL lookup failed"),
                )?
            }
            _ => current.avatar_url.clone(),
        };

        let replacement = ReplaceRecord {
            fields,
            avatar_url,
            timestamp: Utc::now(),
        };
        self.records
            .replace(id, &replacement)
            .await
            .inspect_err(|e| error!(record_id = %id, error = %e, "Failed to update record"))?;

        info!(record_id = %id, "Record updated");
        Ok(current.replaced_with(&replacement))
    }

    /// Delete record `id` from the store. Its avatar blob is left in place.
    /// Apply the result with [`ReportListState::without`].
    pub async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.records
            .delete(id)
            .await
            .inspect_err(|e| warn!(record_id = %id, error = %e, "Failed to delete record"))?;
        info!(record_id = %id, "Record deleted");
        Ok(())
    }
}
