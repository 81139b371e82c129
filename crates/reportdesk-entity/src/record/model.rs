//! Record entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use reportdesk_core::types::RecordId;

use super::dates::parse_calendar_date;

/// Text shown in place of a missing submission timestamp.
pub const NO_DATE_AVAILABLE: &str = "No date available";

/// A document-tracking record as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned identifier.
    #[sqlx(try_from = "String")]
    pub id: RecordId,
    /// Name and surname of the person the document concerns.
    pub name_surname: String,
    /// Document date (ISO calendar date).
    pub document_date: String,
    /// Start of the covered period (ISO calendar date).
    pub start_date: String,
    /// End of the covered period (ISO calendar date).
    pub end_date: String,
    /// Display string computed once at creation, never recomputed.
    pub duration: String,
    /// Monetary amount.
    pub amount: f64,
    /// Place the document refers to.
    pub place: String,
    /// National ID card number.
    pub id_card_number: String,
    /// Blob store download URL or inline placeholder image.
    pub avatar_url: String,
    /// Last write instant. Legacy documents may lack it.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Record {
    /// Assemble a record from its parts.
    pub fn from_parts(
        id: RecordId,
        fields: RecordFields,
        avatar_url: String,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name_surname: fields.name_surname,
            document_date: fields.document_date,
            start_date: fields.start_date,
            end_date: fields.end_date,
            duration: fields.duration,
            amount: fields.amount,
            place: fields.place,
            id_card_number: fields.id_card_number,
            avatar_url,
            timestamp,
        }
    }

    /// Copy out the user-editable fields.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name_surname: self.name_surname.clone(),
            document_date: self.document_date.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            duration: self.duration.clone(),
            amount: self.amount,
            place: self.place.clone(),
            id_card_number: self.id_card_number.clone(),
        }
    }

    /// The local equivalent of a successful store overwrite: every stored
    /// field takes the replacement's value, the identifier stays.
    pub fn replaced_with(&self, replacement: &ReplaceRecord) -> Self {
        Self::from_parts(
            self.id.clone(),
            replacement.fields.clone(),
            replacement.avatar_url.clone(),
            Some(replacement.timestamp),
        )
    }

    /// Parsed document date, `None` when missing or malformed.
    pub fn document_day(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.document_date)
    }

    /// Human-readable submission time.
    pub fn submitted_at_display(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => NO_DATE_AVAILABLE.to_string(),
        }
    }
}

/// The fields a user may edit on an existing record.
///
/// An edit always carries the full set; the store overwrites the whole
/// document with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    /// Name and surname.
    pub name_surname: String,
    /// Document date (ISO calendar date).
    pub document_date: String,
    /// Period start (ISO calendar date).
    pub start_date: String,
    /// Period end (ISO calendar date).
    pub end_date: String,
    /// Duration display string.
    pub duration: String,
    /// Amount.
    pub amount: f64,
    /// Place.
    pub place: String,
    /// ID card number.
    pub id_card_number: String,
}

/// Payload for creating a record. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecord {
    /// Field values.
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Avatar URL (uploaded image or placeholder).
    pub avatar_url: String,
}

/// Payload for overwriting an existing record's document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRecord {
    /// Field values.
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Avatar URL, carried over or freshly uploaded.
    pub avatar_url: String,
    /// Write instant generated for this edit.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields() -> RecordFields {
        RecordFields {
            name_surname: "Anan Wong".into(),
            document_date: "2024-03-01".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            duration: "01/01/2024 to 31/01/2024".into(),
            amount: 1500.0,
            place: "Bangkok".into(),
            id_card_number: "1100700000001".into(),
        }
    }

    #[test]
    fn test_replaced_with_keeps_id_and_takes_everything_else() {
        let original = Record::from_parts(
            RecordId::new("r1"),
            fields(),
            "https://cdn/a.png".into(),
            None,
        );
        let mut edited = fields();
        edited.place = "Chiang Mai".into();
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let replacement = ReplaceRecord {
            fields: edited,
            avatar_url: "https://cdn/b.png".into(),
            timestamp: ts,
        };

        let updated = original.replaced_with(&replacement);
        assert_eq!(updated.id, RecordId::new("r1"));
        assert_eq!(updated.place, "Chiang Mai");
        assert_eq!(updated.avatar_url, "https://cdn/b.png");
        assert_eq!(updated.timestamp, Some(ts));
        assert_eq!(updated.duration, original.duration);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let record = Record::from_parts(RecordId::new("r1"), fields(), "x".into(), None);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["nameSurname"], "Anan Wong");
        assert_eq!(json["idCardNumber"], "1100700000001");
        assert_eq!(json["avatarUrl"], "x");
        assert!(json["timestamp"].is_null());
    }

    #[test]
    fn test_submitted_at_display_without_timestamp() {
        let record = Record::from_parts(RecordId::new("r1"), fields(), "x".into(), None);
        assert_eq!(record.submitted_at_display(), NO_DATE_AVAILABLE);
    }
}
