//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use reportdesk_core::config::{AppConfig, BlobBackend, RecordBackend};
use reportdesk_core::error::AppError;
use reportdesk_database::connection::redact_url;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration as JSON
    Show,
    /// Check that the configuration loads and names usable backends
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, config_path: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(config_path)?;
            config.records.postgres.url = redact_url(&config.records.postgres.url);
            output::print_json(&config);
        }
        ConfigCommand::Validate => {
            let config = match super::load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {e}"));
                    return Err(e);
                }
            };
            output::print_success(&format!("Configuration '{config_path}' loaded"));
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Record store", config.records.backend.as_str());
            output::print_kv("Blob store", config.blobs.backend.as_str());
            if config.records.backend == RecordBackend::Postgres {
                output::print_kv("Database", &redact_url(&config.records.postgres.url));
            }
            for warning in backend_warnings(&config) {
                output::print_warning(&warning);
            }
        }
    }

    Ok(())
}

/// Settings a selected backend needs but that are left empty.
fn backend_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.records.backend == RecordBackend::Firestore
        && config.records.firestore.project_id.trim().is_empty()
    {
        warnings.push("records.firestore.project_id is empty".to_string());
    }
    if config.blobs.backend == BlobBackend::Firebase
        && config.blobs.firebase.bucket.trim().is_empty()
    {
        warnings.push("blobs.firebase.bucket is empty".to_string());
    }
    if config.records.backend == RecordBackend::Memory {
        warnings.push("records are kept in memory and lost on exit".to_string());
    }
    warnings
}
