//! Custom Axum extractors.

pub mod record_upload;

pub use record_upload::RecordUpload;
