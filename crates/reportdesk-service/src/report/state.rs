//! The report list state value.
//!
//! A [`ReportListState`] is never mutated in place. Each transition returns
//! a new value, and the session swaps the shared snapshot for it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reportdesk_core::types::{RecordId, SortKey};
use reportdesk_entity::record::Record;

use super::sort::sort_records;

/// Message shown after a successful edit.
pub const EDIT_SUCCESS_MESSAGE: &str = "Record updated successfully";

/// Where the list is in its load cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum ListPhase {
    /// Nothing loaded yet, or a reload was requested.
    Idle,
    /// A load is in flight.
    Loading,
    /// Records are loaded.
    Ready,
    /// The last load failed.
    Failed {
        /// What went wrong.
        message: String,
    },
}

/// Notice recorded after a successful edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditNotice {
    /// Success text.
    pub message: String,
    /// Record that was edited.
    pub record_id: RecordId,
    /// When the edit completed.
    pub edited_at: DateTime<Utc>,
}

/// Snapshot of the report list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListState {
    records: Vec<Record>,
    sort: SortKey,
    #[serde(flatten)]
    phase: ListPhase,
    saving: Option<RecordId>,
    notice: Option<EditNotice>,
}

impl Default for ReportListState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            sort: SortKey::Latest,
            phase: ListPhase::Idle,
            saving: None,
            notice: None,
        }
    }
}

impl ReportListState {
    /// Records in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Current sort key.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current load phase.
    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    /// Record whose edit is being written, if any.
    pub fn saving(&self) -> Option<&RecordId> {
        self.saving.as_ref()
    }

    /// Notice from the last successful edit.
    pub fn notice(&self) -> Option<&EditNotice> {
        self.notice.as_ref()
    }

    /// Whether records have been loaded.
    pub fn is_ready(&self) -> bool {
        self.phase == ListPhase::Ready
    }

    /// Look up a loaded record.
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// A load has started. Loaded records stay visible until it ends.
    pub fn loading(&self) -> Self {
        Self {
            phase: ListPhase::Loading,
            ..self.clone()
        }
    }

    /// A load finished. Records are shown newest first.
    pub fn loaded(&self, mut records: Vec<Record>) -> Self {
        sort_records(&mut records, SortKey::Latest);
        Self {
            records,
            sort: SortKey::Latest,
            phase: ListPhase::Ready,
            saving: None,
            notice: self.notice.clone(),
        }
    }

    /// A load failed.
    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            phase: ListPhase::Failed {
                message: message.into(),
            },
            ..self.clone()
        }
    }

    /// Records must be fetched again before the next read.
    pub fn stale(&self) -> Self {
        Self {
            phase: ListPhase::Idle,
            ..self.clone()
        }
    }

    /// Same records, reordered by `key`.
    pub fn sorted_by(&self, key: SortKey) -> Self {
        let mut records = self.records.clone();
        sort_records(&mut records, key);
        Self {
            records,
            sort: key,
            ..self.clone()
        }
    }

    /// An edit of `id` is being written.
    pub fn saving_record(&self, id: &RecordId) -> Self {
        Self {
            saving: Some(id.clone()),
            ..self.clone()
        }
    }

    /// The in-flight edit ended without changing anything.
    pub fn save_abandoned(&self) -> Self {
        Self {
            saving: None,
            ..self.clone()
        }
    }

    /// An edit was stored. The record is replaced at its current position
    /// and a success notice recorded.
    pub fn with_edit(&self, updated: Record, edited_at: DateTime<Utc>) -> Self {
        let notice = EditNotice {
            message: EDIT_SUCCESS_MESSAGE.to_string(),
            record_id: updated.id.clone(),
            edited_at,
        };
        let records = self
            .records
            .iter()
            .map(|r| if r.id == updated.id { updated.clone() } else { r.clone() })
            .collect();
        Self {
            records,
            saving: None,
            notice: Some(notice),
            ..self.clone()
        }
    }

    /// A record was deleted.
    pub fn without(&self, id: &RecordId) -> Self {
        Self {
            records: self.records.iter().filter(|r| &r.id != id).cloned().collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    fn loaded() -> ReportListState {
        ReportListState::default().loaded(vec![
            record("a", "Somchai", 10.0, 1),
            record("b", "Anan", 30.0, 3),
            record("c", "Malee", 20.0, 2),
        ])
    }

    fn ids(state: &ReportListState) -> Vec<&str> {
        state.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_loaded_orders_by_latest() {
        let state = loaded();
        assert!(state.is_ready());
        assert_eq!(state.sort(), SortKey::Latest);
        assert_eq!(ids(&state), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sorted_by_leaves_original_untouched() {
        let state = loaded();
        let by_name = state.sorted_by(SortKey::Name);
        assert_eq!(ids(&by_name), vec!["b", "c", "a"]);
        assert_eq!(by_name.sort(), SortKey::Name);
        assert_eq!(state.sort(), SortKey::Latest);
    }

    #[test]
    fn test_with_edit_replaces_in_place() {
        let state = loaded().sorted_by(SortKey::Amount);
        let mut updated = state.find(&RecordId::new("c")).unwrap().clone();
        updated.place = "Chiang Mai".into();
        let now = Utc::now();

        let next = state.saving_record(&updated.id).with_edit(updated, now);

        assert_eq!(ids(&next), ids(&state));
        assert_eq!(next.find(&RecordId::new("c")).unwrap().place, "Chiang Mai");
        assert_eq!(next.saving(), None);
        let notice = next.notice().unwrap();
        assert_eq!(notice.message, EDIT_SUCCESS_MESSAGE);
        assert_eq!(notice.edited_at, now);
    }

    #[test]
    fn test_without_removes_exactly_one() {
        let state = loaded();
        let next = state.without(&RecordId::new("c"));
        assert_eq!(ids(&next), vec!["b", "a"]);
        assert_eq!(next.without(&RecordId::new("zzz")), next);
    }

    #[test]
    fn test_failed_state_serializes_phase_and_message() {
        let state = ReportListState::default().failed("store unreachable");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["message"], "store unreachable");
        assert!(json["saving"].is_null());
    }
}
