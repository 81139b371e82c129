//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty configuration
//! yields a runnable in-memory setup.

pub mod app;
pub mod blobs;
pub mod logging;
pub mod records;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::blobs::{BlobBackend, BlobStoreConfig, FirebaseStorageConfig, LocalBlobConfig};
pub use self::logging::LoggingConfig;
pub use self::records::{FirestoreConfig, PostgresConfig, RecordBackend, RecordStoreConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides (`REPORTDESK__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "REPORTDESK";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store (document database) settings.
    #[serde(default)]
    pub records: RecordStoreConfig,
    /// Blob store (avatar images) settings.
    #[serde(default)]
    pub blobs: BlobStoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the base file at `path` (extension optional), an
    /// environment-specific overlay `config/{env}` and environment variables
    /// prefixed with `REPORTDESK__`. Missing files are skipped.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let base = path.trim_end_matches(".toml");
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
