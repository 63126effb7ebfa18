//! Scalar extraction from custom-field items.
//!
//! Structured payloads are resolved with the precedence
//! `text` > `number` > `date` > `checked` > first other non-null sub-field.
//! The last step walks the payload in document order (`serde_json` is built
//! with `preserve_order`).

use cardsync_model::{ExtractedFields, FieldItem, FieldPayload};
use serde_json::{Map, Value};
use tracing::trace;

/// Label for a checked checkbox.
pub const CHECKED_YES: &str = "Yes";

/// Label for an unchecked checkbox.
pub const CHECKED_NO: &str = "No";

/// Extract the scalar value of a field item, or `None` when it has no payload.
pub fn extract_value(item: &FieldItem) -> Option<String> {
    match item.payload.as_ref()? {
        FieldPayload::Structured(map) => extract_structured(map),
        FieldPayload::Scalar(value) => stringify(value),
    }
}

/// Extract the scalar value of a raw field item.
///
/// Returns `None` for anything that is not a well-formed item.
pub fn extract_json(raw: &Value) -> Option<String> {
    FieldItem::from_json(raw).and_then(|item| extract_value(&item))
}

/// Build the per-card field map from the raw items returned by the board API.
///
/// Malformed items and items without a value are skipped.
pub fn extract_fields(items: &[Value]) -> ExtractedFields {
    let mut fields = ExtractedFields::new();
    for raw in items {
        let Some(item) = FieldItem::from_json(raw) else {
            trace!(item = %raw, "skipping malformed field item");
            continue;
        };
        if let Some(value) = extract_value(&item) {
            fields.insert(item.field_id, value);
        }
    }
    fields
}

fn extract_structured(map: &Map<String, Value>) -> Option<String> {
    if let Some(text) = map.get("text") {
        return stringify(text);
    }
    if let Some(number) = map.get("number") {
        return stringify(number);
    }
    if let Some(date) = map.get("date") {
        return stringify(date);
    }
    if let Some(checked) = map.get("checked") {
        return Some(checked_label(checked).to_string());
    }
    map.values().find(|value| !value.is_null()).and_then(stringify)
}

fn checked_label(flag: &Value) -> &'static str {
    match flag {
        Value::String(text) if text == "true" => CHECKED_YES,
        Value::Bool(true) => CHECKED_YES,
        _ => CHECKED_NO,
    }
}

/// Strings pass through unchanged; other JSON values use their text form.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
