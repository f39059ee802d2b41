//! Firestore REST value encoding for [`DealRecord`].
//!
//! The REST API types every field: strings as `stringValue`, doubles as
//! `doubleValue`, integers as string-typed `integerValue`, and absent
//! optionals as explicit `nullValue` (the persisted document keeps every
//! column, null or not, so downstream readers see a stable shape).

use serde_json::{json, Map, Value};

use dealscout_core::DealRecord;

/// Encodes a record into the `fields` map of a Firestore document.
pub(crate) fn record_fields(record: &DealRecord) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("id".to_string(), string_value(&record.id));
    fields.insert("title".to_string(), string_value(&record.title));
    fields.insert(
        "current_price".to_string(),
        opt_double_value(record.current_price),
    );
    fields.insert(
        "original_price".to_string(),
        opt_double_value(record.original_price),
    );
    fields.insert(
        "discount_percent".to_string(),
        integer_value(i64::from(record.discount_percent)),
    );
    fields.insert(
        "affiliate_url".to_string(),
        opt_string_value(record.affiliate_url.as_deref()),
    );
    fields.insert(
        "image_url".to_string(),
        opt_string_value(record.image_url.as_deref()),
    );
    fields.insert("source".to_string(), string_value(&record.source));
    fields.insert("timestamp".to_string(), string_value(&record.timestamp));
    fields
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

fn opt_string_value(s: Option<&str>) -> Value {
    s.map_or_else(null_value, string_value)
}

fn opt_double_value(v: Option<f64>) -> Value {
    v.map_or_else(null_value, |v| json!({ "doubleValue": v }))
}

/// Firestore's REST API serializes 64-bit integers as strings.
fn integer_value(v: i64) -> Value {
    json!({ "integerValue": v.to_string() })
}

fn null_value() -> Value {
    json!({ "nullValue": null })
}
