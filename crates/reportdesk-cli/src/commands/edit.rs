//! Overwrite an existing record.
//!
//! Options that are not given keep the record's current value. The whole
//! document is written back with a fresh timestamp.

use std::path::PathBuf;

use clap::Args;

use reportdesk_core::error::AppError;
use reportdesk_core::types::RecordId;
use reportdesk_service::RecordForm;

use super::RecordRow;
use crate::output::{self, OutputFormat};

/// Arguments for the edit command
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Record ID
    pub id: String,
    /// Name and surname
    #[arg(long)]
    pub name: Option<String>,
    /// Document date (YYYY-MM-DD)
    #[arg(long)]
    pub document_date: Option<String>,
    /// Period start (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,
    /// Period end (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
    /// Duration text, stored as given
    #[arg(long)]
    pub duration: Option<String>,
    /// Amount
    #[arg(long)]
    pub amount: Option<String>,
    /// Place
    #[arg(long)]
    pub place: Option<String>,
    /// ID card number
    #[arg(long)]
    pub id_card: Option<String>,
    /// Replacement avatar image
    #[arg(long)]
    pub avatar: Option<PathBuf>,
}

impl EditArgs {
    fn apply_to(&self, form: &mut RecordForm) {
        let targets = [
            (&self.name, &mut form.name_surname),
            (&self.document_date, &mut form.document_date),
            (&self.start_date, &mut form.start_date),
            (&self.end_date, &mut form.end_date),
            (&self.amount, &mut form.amount),
            (&self.place, &mut form.place),
            (&self.id_card, &mut form.id_card_number),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
        if let Some(duration) = &self.duration {
            form.duration = Some(duration.clone());
        }
    }
}

/// Execute the edit command
pub async fn execute(
    args: &EditArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let image = match &args.avatar {
        Some(path) => Some(super::read_image(path).await?),
        None => None,
    };

    let state = super::open_state(config_path).await?;
    let id = RecordId::new(args.id.clone());
    let snapshot = state.reports.list(None, false).await?;
    let current = snapshot
        .find(&id)
        .ok_or_else(|| AppError::not_found(format!("Record '{id}' not found")))?;

    let mut form = RecordForm::from_fields(&current.fields());
    args.apply_to(&mut form);
    let fields = form.to_edit_fields(&current.fields())?;

    let updated = state.reports.edit(&id, fields, image.as_ref()).await?;

    output::print_item(&RecordRow::from(&updated), format);
    if format == OutputFormat::Table {
        if let Some(notice) = state.reports.snapshot().await.notice() {
            output::print_success(&notice.message);
        }
    }
    Ok(())
}
