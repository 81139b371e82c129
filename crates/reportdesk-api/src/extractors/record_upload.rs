//! Multipart record form extractor.
//!
//! Text parts carry field values under their wire names (`nameSurname`,
//! `documentDate`, ...). A file part named `image` or `avatar` carries the
//! optional avatar. Unknown parts are ignored.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};

use reportdesk_core::error::AppError;
use reportdesk_service::{ImageUpload, RecordForm};

use crate::error::ApiError;

const IMAGE_FIELDS: [&str; 2] = ["image", "avatar"];

/// Parsed multipart body of a submit or edit request.
#[derive(Debug, Default)]
pub struct RecordUpload {
    values: HashMap<String, String>,
    /// Uploaded avatar, if a non-empty file part was sent.
    pub image: Option<ImageUpload>,
}

impl RecordUpload {
    /// A new-record draft from the sent values. Missing fields are blank
    /// and fail validation.
    pub fn to_new_form(&self) -> RecordForm {
        let mut form = RecordForm::default();
        self.apply_to(&mut form);
        form
    }

    /// Overwrite the fields of `form` that were sent.
    pub fn apply_to(&self, form: &mut RecordForm) {
        for (key, value) in &self.values {
            match key.as_str() {
                "nameSurname" => form.name_surname = value.clone(),
                "documentDate" => form.document_date = value.clone(),
                "startDate" => form.start_date = value.clone(),
                "endDate" => form.end_date = value.clone(),
                "duration" => form.duration = Some(value.clone()),
                "amount" => form.amount = value.clone(),
                "place" => form.place = value.clone(),
                "idCardNumber" => form.id_card_number = value.clone(),
                _ => {}
            }
        }
    }
}

impl<S> FromRequest<S> for RecordUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Expected a multipart form: {e}")))?;

        let mut upload = RecordUpload::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if IMAGE_FIELDS.contains(&name.as_str()) {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                // browsers send an empty part when no file was picked
                if !data.is_empty() {
                    upload.image = Some(ImageUpload::new(file_name, data));
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                upload.values.insert(name, text);
            }
        }

        Ok(upload)
    }
}
