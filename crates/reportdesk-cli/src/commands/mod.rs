//! CLI command definitions and dispatch.

pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod serve;
pub mod submit;

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use reportdesk_api::AppState;
use reportdesk_core::config::AppConfig;
use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_entity::record::{Record, is_placeholder};
use reportdesk_service::ImageUpload;

use crate::output::OutputFormat;

/// Environment variable naming the configuration overlay (`config/{env}.toml`).
const ENV_VAR: &str = "REPORTDESK_ENV";

/// ReportDesk: document record submission and review
#[derive(Debug, Parser)]
#[command(name = "reportdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Submit a new record
    Submit(submit::SubmitArgs),
    /// List stored records
    List(list::ListArgs),
    /// Overwrite an existing record
    Edit(edit::EditArgs),
    /// Delete a record
    Delete(delete::DeleteArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Submit(args) => submit::execute(args, &self.config, self.format).await,
            Commands::List(args) => list::execute(args, &self.config, self.format).await,
            Commands::Edit(args) => edit::execute(args, &self.config, self.format).await,
            Commands::Delete(args) => delete::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config).await,
        }
    }
}

/// Load configuration from file, the environment overlay and env vars.
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Connect to the configured stores.
pub async fn open_state(config_path: &str) -> Result<AppState, AppError> {
    let config = load_config(config_path)?;
    tracing::debug!(
        records = config.records.backend.as_str(),
        blobs = config.blobs.backend.as_str(),
        "Opening stores"
    );
    AppState::from_config(config).await
}

/// Read an image file from disk for upload.
pub async fn read_image(path: &Path) -> Result<ImageUpload, AppError> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Cannot read image '{}'", path.display()),
            e,
        )
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::new(file_name, data))
}

/// One record as shown by `list`, `submit` and `edit`.
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name_surname: String,
    #[tabled(rename = "Document date")]
    pub document_date: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Place")]
    pub place: String,
    #[tabled(rename = "ID card")]
    pub id_card_number: String,
    #[tabled(rename = "Avatar")]
    pub avatar: String,
    #[tabled(rename = "Submitted")]
    pub submitted_at: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let avatar = if is_placeholder(&record.avatar_url) {
            "(placeholder)".to_string()
        } else {
            record.avatar_url.clone()
        };
        Self {
            id: record.id.to_string(),
            name_surname: record.name_surname.clone(),
            document_date: record.document_date.clone(),
            duration: record.duration.clone(),
            amount: format!("{:.2}", record.amount),
            place: record.place.clone(),
            id_card_number: record.id_card_number.clone(),
            avatar,
            submitted_at: record.submitted_at_display(),
        }
    }
}
