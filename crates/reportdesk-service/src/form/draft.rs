//! The record form draft.
//!
//! Every surface collects field values as text and hands them over as a
//! [`RecordForm`]. Nothing reaches a store until the draft validates.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;
use reportdesk_entity::record::{RecordFields, format_duration, parse_calendar_date};

/// Text values of a record form, as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordForm {
    /// Name and surname.
    #[validate(custom(function = "required"))]
    pub name_surname: String,
    /// Document date, `YYYY-MM-DD`.
    #[validate(custom(function = "calendar_date"))]
    pub document_date: String,
    /// Period start, `YYYY-MM-DD`.
    #[validate(custom(function = "calendar_date"))]
    pub start_date: String,
    /// Period end, `YYYY-MM-DD`.
    #[validate(custom(function = "calendar_date"))]
    pub end_date: String,
    /// Duration text. Ignored on creation, where it is derived from the
    /// period; kept as entered on edit.
    pub duration: Option<String>,
    /// Amount as typed.
    #[validate(custom(function = "finite_number"))]
    pub amount: String,
    /// Place.
    #[validate(custom(function = "required"))]
    pub place: String,
    /// ID card number.
    #[validate(custom(function = "required"))]
    pub id_card_number: String,
}

impl RecordForm {
    /// Start an edit draft from the current values of a record.
    pub fn from_fields(fields: &RecordFields) -> Self {
        Self {
            name_surname: fields.name_surname.clone(),
            document_date: fields.document_date.clone(),
            start_date: fields.start_date.clone(),
            end_date: fields.end_date.clone(),
            duration: Some(fields.duration.clone()),
            amount: fields.amount.to_string(),
            place: fields.place.clone(),
            id_card_number: fields.id_card_number.clone(),
        }
    }

    /// Validate and convert for a new record. Duration is derived from the
    /// period and frozen from here on.
    pub fn to_create_fields(&self) -> AppResult<RecordFields> {
        let mut fields = self.checked_fields(None)?;
        fields.duration = format_duration(&self.start_date, &self.end_date).ok_or_else(|| {
            AppError::validation("start_date and end_date must be calendar dates")
        })?;
        Ok(fields)
    }

    /// Validate and convert an edit of `current`.
    ///
    /// Only fields whose text differs from `current` are validated, so a
    /// record with legacy gaps can still be edited elsewhere. Duration text
    /// is stored as entered, blank included; it is never recomputed.
    pub fn to_edit_fields(&self, current: &RecordFields) -> AppResult<RecordFields> {
        let mut fields = self.checked_fields(Some(current))?;
        fields.duration = match self.duration.as_deref() {
            Some(text) => text.trim().to_string(),
            None => current.duration.clone(),
        };
        Ok(fields)
    }

    fn checked_fields(&self, current: Option<&RecordFields>) -> AppResult<RecordFields> {
        let baseline = current.map(Self::from_fields);
        let unchanged = |field: &str| {
            baseline
                .as_ref()
                .is_some_and(|b| b.text(field).map(str::trim) == self.text(field).map(str::trim))
        };

        if let Err(errors) = self.validate() {
            if let Some(err) = validation_error(&errors, |field| !unchanged(field)) {
                return Err(err);
            }
        }

        let amount = match current {
            Some(current) if unchanged("amount") => current.amount,
            _ => parse_amount(&self.amount)
                .ok_or_else(|| AppError::validation("amount must be a number"))?,
        };

        Ok(RecordFields {
            name_surname: self.name_surname.trim().to_string(),
            document_date: self.document_date.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            duration: String::new(),
            amount,
            place: self.place.trim().to_string(),
            id_card_number: self.id_card_number.trim().to_string(),
        })
    }

    /// Text of a field by its validation name.
    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "name_surname" | "nameSurname" => Some(&self.name_surname),
            "document_date" | "documentDate" => Some(&self.document_date),
            "start_date" | "startDate" => Some(&self.start_date),
            "end_date" | "endDate" => Some(&self.end_date),
            "duration" => self.duration.as_deref(),
            "amount" => Some(&self.amount),
            "place" => Some(&self.place),
            "id_card_number" | "idCardNumber" => Some(&self.id_card_number),
            _ => None,
        }
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

fn calendar_date(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if parse_calendar_date(value).is_none() {
        return Err(ValidationError::new("calendar_date")
            .with_message(Cow::Borrowed("must be a date (YYYY-MM-DD)")));
    }
    Ok(())
}

fn finite_number(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if parse_amount(value).is_none() {
        return Err(ValidationError::new("number").with_message(Cow::Borrowed("must be a number")));
    }
    Ok(())
}

/// Flatten the errors of the fields `include` accepts into one message,
/// ordered by field name. `None` when none remain.
fn validation_error(
    errors: &ValidationErrors,
    include: impl Fn(&str) -> bool,
) -> Option<AppError> {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .filter(|(field, _)| include(field))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field} {message}")
            })
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    parts.sort();
    Some(AppError::validation(parts.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportdesk_core::error::ErrorKind;

    fn valid_form() -> RecordForm {
        RecordForm {
            name_surname: "  Anan Wong ".into(),
            document_date: "2024-03-01".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            duration: None,
            amount: "1500.50".into(),
            place: "Bangkok".into(),
            id_card_number: "1100700000001".into(),
        }
    }

    #[test]
    fn test_create_fields_derive_duration_and_trim() {
        let fields = valid_form().to_create_fields().unwrap();
        assert_eq!(fields.name_surname, "Anan Wong");
        assert_eq!(fields.duration, "01/01/2024 to 31/01/2024");
        assert_eq!(fields.amount, 1500.5);
    }

    #[test]
    fn test_create_ignores_entered_duration() {
        let mut form = valid_form();
        form.duration = Some("whatever".into());
        assert_eq!(
            form.to_create_fields().unwrap().duration,
            "01/01/2024 to 31/01/2024"
        );
    }

    fn stored() -> RecordFields {
        valid_form().to_create_fields().unwrap()
    }

    #[test]
    fn test_edit_keeps_entered_duration() {
        let mut form = RecordForm::from_fields(&stored());
        form.duration = Some("January 2024".into());
        assert_eq!(form.to_edit_fields(&stored()).unwrap().duration, "January 2024");
    }

    #[test]
    fn test_edit_never_recomputes_duration() {
        let mut form = RecordForm::from_fields(&stored());
        form.start_date = "2025-06-01".into();
        form.end_date = "2025-06-30".into();
        form.duration = Some(String::new());

        let fields = form.to_edit_fields(&stored()).unwrap();
        assert_eq!(fields.duration, "");
        assert_eq!(fields.start_date, "2025-06-01");
    }

    #[test]
    fn test_edit_of_record_without_period_validates_only_changed_fields() {
        let mut legacy = stored();
        legacy.start_date = String::new();
        legacy.end_date = String::new();
        legacy.duration = String::new();

        let mut form = RecordForm::from_fields(&legacy);
        form.place = "Chiang Mai".into();
        let fields = form.to_edit_fields(&legacy).unwrap();
        assert_eq!(fields.place, "Chiang Mai");
        assert_eq!(fields.start_date, "");
        assert_eq!(fields.amount, legacy.amount);
    }

    #[test]
    fn test_edit_still_rejects_changed_invalid_fields() {
        let mut form = RecordForm::from_fields(&stored());
        form.end_date = "31/01/2024".into();
        form.amount = "lots".into();
        let err = form.to_edit_fields(&stored()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("end_date"), "{}", err.message);
        assert!(err.message.contains("amount"), "{}", err.message);
    }

    #[test]
    fn test_blank_place_is_rejected() {
        let mut form = valid_form();
        form.place = "   ".into();
        let err = form.to_create_fields().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("place"), "{}", err.message);
    }

    #[test]
    fn test_bad_date_and_amount_are_reported_together() {
        let mut form = valid_form();
        form.document_date = "01/03/2024".into();
        form.amount = "NaN".into();
        let err = form.to_create_fields().unwrap_err();
        assert!(err.message.contains("document_date"), "{}", err.message);
        assert!(err.message.contains("amount"), "{}", err.message);
    }

    #[test]
    fn test_from_fields_round_trips_for_edit() {
        let fields = stored();
        let again = RecordForm::from_fields(&fields).to_edit_fields(&fields).unwrap();
        assert_eq!(again, fields);
    }
}
