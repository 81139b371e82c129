//! # reportdesk-api
//!
//! HTTP API layer for ReportDesk built on Axum.
//!
//! Provides the report endpoints, avatar serving for locally stored blobs,
//! a health check, middleware (CORS, logging, compression), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
