//! Start the ReportDesk server.

use clap::Args;

use reportdesk_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting ReportDesk server...");
    println!("  Address: {}", config.server.bind_address());
    println!("  Records: {}", config.records.backend.as_str());
    println!("  Blobs:   {}", config.blobs.backend.as_str());

    reportdesk_api::run_server(config).await
}
