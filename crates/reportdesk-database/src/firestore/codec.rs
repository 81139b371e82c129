//! Conversion between records and Firestore typed document fields.
//!
//! Firestore wraps every value in a single-key object naming its type
//! (`{"stringValue": "..."}`, `{"doubleValue": 1.5}`). Documents written by
//! older clients may hold the amount as a string or an integer, or lack a
//! timestamp entirely, so decoding falls back to defaults rather than failing.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{Record, RecordFields};

/// Document field holding the write timestamp.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A document as returned by the Firestore REST API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, ending in the document id.
    pub name: String,
    /// Typed field map.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Encode the stored fields of a record.
///
/// `timestamp` is omitted when `None`; creation sets it through a server
/// transform instead.
pub fn encode_fields(
    fields: &RecordFields,
    avatar_url: &str,
    timestamp: Option<DateTime<Utc>>,
) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("nameSurname".into(), string_value(&fields.name_surname));
    map.insert("documentDate".into(), string_value(&fields.document_date));
    map.insert("startDate".into(), string_value(&fields.start_date));
    map.insert("endDate".into(), string_value(&fields.end_date));
    map.insert("duration".into(), string_value(&fields.duration));
    map.insert("amount".into(), json!({ "doubleValue": fields.amount }));
    map.insert("place".into(), string_value(&fields.place));
    map.insert("idCardNumber".into(), string_value(&fields.id_card_number));
    map.insert("avatarUrl".into(), string_value(avatar_url));
    if let Some(ts) = timestamp {
        map.insert(
            TIMESTAMP_FIELD.into(),
            json!({ "timestampValue": ts.to_rfc3339() }),
        );
    }
    map
}

/// Decode a document into a record.
pub fn decode_document(doc: &Document) -> Record {
    let text = |key: &str| read_string(doc.fields.get(key));
    let fields = RecordFields {
        name_surname: text("nameSurname"),
        document_date: text("documentDate"),
        start_date: text("startDate"),
        end_date: text("endDate"),
        duration: text("duration"),
        amount: read_amount(doc.fields.get("amount")),
        place: text("place"),
        id_card_number: text("idCardNumber"),
    };

    Record::from_parts(
        document_id(&doc.name),
        fields,
        text("avatarUrl"),
        doc.fields.get(TIMESTAMP_FIELD).and_then(read_timestamp),
    )
}

/// The last path segment of a document resource name.
pub fn document_id(name: &str) -> RecordId {
    RecordId::new(name.rsplit('/').next().unwrap_or(name))
}

/// Parse an RFC 3339 timestamp as Firestore emits it.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn read_string(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return n.to_string();
    }
    String::new()
}

fn integer_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse::<i64>().ok().map(|i| i as f64),
        other => other.as_i64().map(|i| i as f64),
    }
}

fn read_amount(value: Option<&Value>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return n;
    }
    // integerValue is a decimal string in the REST encoding
    if let Some(n) = value.get("integerValue").and_then(integer_as_f64) {
        return n;
    }
    value
        .get("stringValue")
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn read_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .get("timestampValue")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}
