//! ReportDesk server entry point.
//!
//! Loads configuration, installs the tracing subscriber and runs the HTTP
//! server until Ctrl+C.

use tracing_subscriber::{EnvFilter, fmt};

use reportdesk_core::config::AppConfig;
use reportdesk_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = reportdesk_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load the base file, the `config/{env}.toml` overlay and `REPORTDESK__*` env vars.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("REPORTDESK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("REPORTDESK_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
