//! Submit a new record.

use std::path::PathBuf;

use clap::Args;

use reportdesk_core::error::AppError;
use reportdesk_service::RecordForm;

use super::RecordRow;
use crate::output::{self, OutputFormat};

/// Arguments for the submit command
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Name and surname
    #[arg(long)]
    pub name: String,
    /// Document date (YYYY-MM-DD)
    #[arg(long)]
    pub document_date: String,
    /// Period start (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,
    /// Period end (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,
    /// Amount
    #[arg(long)]
    pub amount: String,
    /// Place
    #[arg(long)]
    pub place: String,
    /// ID card number
    #[arg(long)]
    pub id_card: String,
    /// Avatar image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl SubmitArgs {
    fn to_form(&self) -> RecordForm {
        RecordForm {
            name_surname: self.name.clone(),
            document_date: self.document_date.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            duration: None,
            amount: self.amount.clone(),
            place: self.place.clone(),
            id_card_number: self.id_card.clone(),
        }
    }
}

/// Execute the submit command
pub async fn execute(
    args: &SubmitArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let image = match &args.image {
        Some(path) => Some(super::read_image(path).await?),
        None => None,
    };

    let state = super::open_state(config_path).await?;
    let submission = state.form.submit(&args.to_form(), image.as_ref()).await?;

    output::print_item(&RecordRow::from(&submission.record), format);
    if format == OutputFormat::Table {
        output::print_success(&format!("Record '{}' submitted", submission.record.id));
    }
    Ok(())
}
