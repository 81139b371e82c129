//! Core type definitions used across the ReportDesk workspace.

pub mod id;
pub mod sorting;

pub use id::RecordId;
pub use sorting::SortKey;
