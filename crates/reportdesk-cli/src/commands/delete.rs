//! Delete a record.

use clap::Args;

use reportdesk_core::error::AppError;
use reportdesk_core::types::RecordId;

use crate::output;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Record ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the delete command
pub async fn execute(args: &DeleteArgs, config_path: &str) -> Result<(), AppError> {
    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Delete record '{}'? This cannot be undone.", args.id))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let state = super::open_state(config_path).await?;
    let id = RecordId::new(args.id.clone());
    state.reports.delete(&id).await?;

    output::print_success(&format!("Record '{id}' deleted"));
    Ok(())
}
