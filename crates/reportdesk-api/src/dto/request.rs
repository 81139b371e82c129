//! Request DTOs.

use serde::Deserialize;

use reportdesk_core::result::AppResult;
use reportdesk_core::types::SortKey;

/// Query string of `GET /api/reports`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReportsQuery {
    /// `latest`, `date`, `name` or `amount`.
    pub sort: Option<String>,
    /// Fetch from the store even when a list is already loaded.
    #[serde(default)]
    pub refresh: bool,
}

impl ListReportsQuery {
    /// Parsed sort key, if one was given.
    pub fn sort_key(&self) -> AppResult<Option<SortKey>> {
        self.sort
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<SortKey>)
            .transpose()
    }
}
