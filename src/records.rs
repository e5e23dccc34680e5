use crate::models::StoredRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

pub const DEFAULT_DATE_FIELD: &str = "date";

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Calendar date of a record timestamp; the time of day is dropped.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
}

pub fn record_date(record: &StoredRecord, field: &str) -> Option<NaiveDate> {
    record.get(field)?.as_str().and_then(parse_record_date)
}

pub fn record_category(record: &StoredRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(value) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> StoredRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn parses_common_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5);
        for raw in [
            "2025-03-05",
            " 2025-03-05 ",
            "2025-03-05T00:00:00",
            "2025-03-05T23:59:59.999",
            "2025-03-05 13:45:10",
            "2025-03-05T08:30",
            "2025-03-05T23:30:00+08:00",
            "2025-03-05T01:00:00Z",
        ] {
            assert_eq!(parse_record_date(raw), expected, "{raw}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for raw in ["", "   ", "yesterday", "2025-02-30", "2025/03/05"] {
            assert_eq!(parse_record_date(raw), None, "{raw}");
        }
    }

    #[test]
    fn date_accessor_reads_named_field() {
        let entry = record(json!({ "requestDate": "2024-02-29", "date": 17 }));
        assert_eq!(
            record_date(&entry, "requestDate"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(record_date(&entry, "date"), None);
        assert_eq!(record_date(&entry, "missing"), None);
    }

    #[test]
    fn category_accessor_skips_blank_and_structured_values() {
        let entry = record(json!({
            "documentType": " Barangay Clearance ",
            "blank": "",
            "quantity": 3,
            "paid": true,
            "nested": { "a": 1 },
            "none": null
        }));
        assert_eq!(
            record_category(&entry, "documentType").as_deref(),
            Some("Barangay Clearance")
        );
        assert_eq!(record_category(&entry, "quantity").as_deref(), Some("3"));
        assert_eq!(record_category(&entry, "paid").as_deref(), Some("true"));
        assert_eq!(record_category(&entry, "blank"), None);
        assert_eq!(record_category(&entry, "nested"), None);
        assert_eq!(record_category(&entry, "none"), None);
    }
}
