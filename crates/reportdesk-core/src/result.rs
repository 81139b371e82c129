//! Convenience result type alias for ReportDesk.

use crate::error::AppError;

/// A specialized `Result` type for ReportDesk operations.
pub type AppResult<T> = Result<T, AppError>;
