//! List stored records.

use clap::Args;

use reportdesk_core::error::AppError;
use reportdesk_core::types::SortKey;

use super::RecordRow;
use crate::output::{self, OutputFormat};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Ordering: latest, date, name or amount
    #[arg(short, long, default_value = "latest")]
    pub sort: SortKey,
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::open_state(config_path).await?;
    let snapshot = state.reports.list(Some(args.sort), true).await?;

    let rows: Vec<RecordRow> = snapshot.records().iter().map(RecordRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
