// src/domain/record.rs
//
// A record is one row of a remote table. Its schema belongs to the backend,
// so it stays an untyped JSON object here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

pub type Record = serde_json::Map<String, Value>;

/// Identifier of a record, rendered as a string.
///
/// Tables keyed by UUID return strings; singleton settings rows use the
/// integer `1`. Both come back as the same textual form.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert any serializable value into a record.
pub fn to_record<T: Serialize>(value: &T) -> AppResult<Record> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Timestamp in the form the backend stores (`2024-05-01T10:00:00.000Z`).
pub fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_record_id_string_and_number() {
        let uuid_row = to_record(&json!({ "id": "abc-123" })).unwrap();
        assert_eq!(record_id(&uuid_row).as_deref(), Some("abc-123"));

        let singleton = to_record(&json!({ "id": 1 })).unwrap();
        assert_eq!(record_id(&singleton).as_deref(), Some("1"));

        let missing = to_record(&json!({ "title": "x" })).unwrap();
        assert!(record_id(&missing).is_none());
    }

    #[test]
    fn test_to_record_rejects_non_objects() {
        let err = to_record(&json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("array")));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(timestamp(at), json!("2024-05-01T10:00:00.000Z"));
    }
}
