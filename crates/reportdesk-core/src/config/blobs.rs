//! Blob store configuration.

use serde::{Deserialize, Serialize};

/// Which blob store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    /// Process-local store, lost on restart.
    #[default]
    Memory,
    /// Local filesystem directory served under `/media`.
    Local,
    /// Firebase Storage over its REST API.
    Firebase,
}

impl BlobBackend {
    /// Backend name as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Local => "local",
            Self::Firebase => "firebase",
        }
    }
}

/// Top-level blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: BlobBackend,
    /// Maximum accepted image size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem settings.
    #[serde(default)]
    pub local: LocalBlobConfig,
    /// Firebase Storage settings.
    #[serde(default)]
    pub firebase: FirebaseStorageConfig,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            backend: BlobBackend::default(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalBlobConfig::default(),
            firebase: FirebaseStorageConfig::default(),
        }
    }
}

/// Local filesystem blob configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalBlobConfig {
    /// Root directory blobs are written under.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Public URL prefix download URLs are built from.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalBlobConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Firebase Storage REST configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseStorageConfig {
    /// Storage bucket name (e.g. `my-project.appspot.com`).
    #[serde(default)]
    pub bucket: String,
    /// Web API key appended as `key=` to every request.
    #[serde(default)]
    pub api_key: String,
    /// REST endpoint root (overridable for the emulator or tests).
    #[serde(default = "default_firebase_base_url")]
    pub base_url: String,
    /// HTTP client timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FirebaseStorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            api_key: String::new(),
            base_url: default_firebase_base_url(),
            timeout_seconds: default_http_timeout(),
        }
    }
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MB
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_firebase_base_url() -> String {
    "https://firebasestorage.googleapis.com/v0".to_string()
}

fn default_http_timeout() -> u64 {
    30
}
