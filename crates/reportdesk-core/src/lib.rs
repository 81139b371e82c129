//! # reportdesk-core
//!
//! Core crate for ReportDesk. Contains the record/blob store traits,
//! configuration schemas, typed identifiers, sort keys, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other ReportDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
