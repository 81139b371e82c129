//! Request handlers.

pub mod health;
pub mod media;
pub mod reports;
