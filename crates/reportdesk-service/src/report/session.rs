//! Shared report list snapshot.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;
use reportdesk_core::types::{RecordId, SortKey};
use reportdesk_entity::record::{Record, RecordFields};

use crate::form::ImageUpload;

use super::controller::ReportListController;
use super::state::{ListPhase, ReportListState};

/// Holds the current [`ReportListState`] for every caller of one process.
///
/// The lock is held only while swapping in a new state, never across a
/// store call. Concurrent edits are not serialized: the store keeps the last
/// write and the saving marker names whichever edit started last.
#[derive(Debug)]
pub struct ReportSession {
    controller: ReportListController,
    state: RwLock<Arc<ReportListState>>,
}

impl ReportSession {
    /// Create a session with nothing loaded.
    pub fn new(controller: ReportListController) -> Self {
        Self {
            controller,
            state: RwLock::new(Arc::new(ReportListState::default())),
        }
    }

    /// The controller this session drives.
    pub fn controller(&self) -> &ReportListController {
        &self.controller
    }

    /// Current state.
    pub async fn snapshot(&self) -> Arc<ReportListState> {
        self.state.read().await.clone()
    }

    /// Apply a local transition to the current state.
    async fn transition<F>(&self, f: F) -> Arc<ReportListState>
    where
        F: FnOnce(&ReportListState) -> ReportListState,
    {
        let mut guard = self.state.write().await;
        let next = Arc::new(f(&guard));
        *guard = next.clone();
        next
    }

    /// Fetch all records from the store, replacing the loaded list.
    pub async fn load(&self) -> Arc<ReportListState> {
        let loading = self.transition(ReportListState::loading).await;
        let loaded = self.controller.load(&loading).await;
        self.transition(|_| loaded).await
    }

    /// Current list, loading it first if needed or if `refresh` is set.
    ///
    /// When `sort` is given the list is reordered by it, even if it is the
    /// current key, so records moved by an edit fall back into place.
    pub async fn list(
        &self,
        sort: Option<SortKey>,
        refresh: bool,
    ) -> AppResult<Arc<ReportListState>> {
        let mut state = self.snapshot().await;
        if refresh || !state.is_ready() {
            state = self.load().await;
        }
        fail_on_failed_load(&state)?;

        if let Some(key) = sort {
            debug!(sort = %key, "Reordering report list");
            state = self.transition(|s| self.controller.resort(s, key)).await;
        }
        Ok(state)
    }

    /// Write an edit and apply it to the list on success.
    pub async fn edit(
        &self,
        id: &RecordId,
        fields: RecordFields,
        image: Option<&ImageUpload>,
    ) -> AppResult<Record> {
        self.ensure_ready().await?;
        let marked = self.transition(|s| s.saving_record(id)).await;

        match self.controller.save_edit(&marked, id, fields, image).await {
            Ok(updated) => {
                let edited_at = updated.timestamp.unwrap_or_else(Utc::now);
                let applied = updated.clone();
                self.transition(|s| s.with_edit(applied, edited_at)).await;
                Ok(updated)
            }
            Err(e) => {
                self.transition(ReportListState::save_abandoned).await;
                Err(e)
            }
        }
    }

    /// Delete a record and drop it from the list on success.
    pub async fn delete(&self, id: &RecordId) -> AppResult<()> {
        self.ensure_ready().await?;
        self.controller.delete(id).await?;
        self.transition(|s| s.without(id)).await;
        Ok(())
    }

    /// Mark the list stale so the next read reloads it.
    pub async fn invalidate(&self) {
        self.transition(ReportListState::stale).await;
    }

    async fn ensure_ready(&self) -> AppResult<()> {
        let state = self.snapshot().await;
        if state.is_ready() {
            return Ok(());
        }
        let state = self.load().await;
        fail_on_failed_load(&state)
    }
}

fn fail_on_failed_load(state: &ReportListState) -> AppResult<()> {
    match state.phase() {
        ListPhase::Failed { message } => Err(AppError::external_service(format!(
            "Failed to load records: {message}"
        ))),
        _ => Ok(()),
    }
}
