//! Store timestamp decoding.
//!
//! Stored documents carry timestamps in several shapes depending on which
//! client wrote them:
//!
//! - RFC 3339 strings (`"2025-06-01T10:00:00Z"`),
//! - epoch milliseconds (`1748772000000`),
//! - server timestamp objects (`{"seconds": 1748772000, "nanoseconds": 0}`,
//!   also serialized with leading underscores).

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::types::Timestamp;

/// Decode a stored timestamp. Returns `None` for absent or unreadable values.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

/// Encode a timestamp the way this service writes it back to the store.
pub fn to_store_value(ts: Timestamp) -> Value {
    Value::String(ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expected() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_string() {
        assert_eq!(
            parse_timestamp(&json!("2025-06-01T10:00:00Z")),
            Some(expected())
        );
        assert_eq!(
            parse_timestamp(&json!("2025-06-01T17:00:00+07:00")),
            Some(expected())
        );
    }

    #[test]
    fn parses_epoch_millis() {
        let millis = expected().timestamp_millis();
        assert_eq!(parse_timestamp(&json!(millis)), Some(expected()));
    }

    #[test]
    fn parses_server_timestamp_objects() {
        let secs = expected().timestamp();
        assert_eq!(
            parse_timestamp(&json!({"seconds": secs, "nanoseconds": 0})),
            Some(expected())
        );
        assert_eq!(
            parse_timestamp(&json!({"_seconds": secs, "_nanoseconds": 0})),
            Some(expected())
        );
    }

    #[test]
    fn unreadable_values_are_absent() {
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&json!(null)), None);
        assert_eq!(parse_timestamp(&json!({"nanoseconds": 5})), None);
        assert_eq!(parse_timestamp(&json!(["2025"])), None);
    }

    #[test]
    fn store_value_parses_back() {
        let value = to_store_value(expected());
        assert_eq!(parse_timestamp(&value), Some(expected()));
    }
}
