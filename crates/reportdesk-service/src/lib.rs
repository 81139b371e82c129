//! # reportdesk-service
//!
//! Controllers behind every user-facing surface. The form controller turns a
//! validated draft into a stored record; the report list controller loads,
//! orders, edits and deletes records while [`ReportSession`] holds the
//! shared list snapshot between requests.
//!
//! Controllers take their stores as `Arc<dyn ...>` at construction time.

pub mod form;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use form::{FormController, ImageUpload, RecordForm, Submission};
pub use report::{
    EditNotice, ListPhase, ReportListController, ReportListState, ReportSession, sort_records,
};
