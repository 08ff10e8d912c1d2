// Mapper from backend vitals rows to domain records
use crate::domain::vitals::VitalRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Row as returned by `/rest/v1/vitals`; numeric columns may arrive as
/// numbers, numeric strings or null.
#[derive(Debug, Deserialize)]
pub struct VitalsRow {
    #[serde(default)]
    pub vitals_id: Option<i64>,
    pub timelog: String,
    #[serde(default)]
    pub temperature: Value,
    #[serde(default)]
    pub heart_rate: Value,
    #[serde(default)]
    pub systolic: Value,
    #[serde(default)]
    pub diastolic: Value,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RowError {
    #[error("unrecognised timelog {0:?}")]
    InvalidTimelog(String),
}

impl TryFrom<VitalsRow> for VitalRecord {
    type Error = RowError;

    fn try_from(row: VitalsRow) -> Result<Self, Self::Error> {
        let mut record = VitalRecord::new(parse_timelog(&row.timelog)?);
        record.id = row.vitals_id;
        record.temperature = parse_number(&row.temperature);
        record.heart_rate = parse_number(&row.heart_rate);
        record.systolic = parse_number(&row.systolic);
        record.diastolic = parse_number(&row.diastolic);
        Ok(record)
    }
}

/// Convert rows, skipping any whose timelog cannot be read
pub fn rows_to_records(rows: Vec<VitalsRow>) -> Vec<VitalRecord> {
    rows.into_iter()
        .filter_map(|row| match VitalRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping vitals row: {}", e);
                None
            }
        })
        .collect()
}

/// Finite number from a JSON number or numeric string
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// RFC 3339, naive date-time (taken as UTC) or bare date (UTC midnight)
pub fn parse_timelog(raw: &str) -> Result<DateTime<Utc>, RowError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    // Postgres timestamptz text form, e.g. "2025-11-01 08:00:00+00"
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(RowError::InvalidTimelog(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&json!(36.8)), Some(36.8));
        assert_eq!(parse_number(&json!(120)), Some(120.0));
        assert_eq!(parse_number(&json!(" 98.5 ")), Some(98.5));
        assert_eq!(parse_number(&json!("abc")), None);
        assert_eq!(parse_number(&json!("NaN")), None);
        assert_eq!(parse_number(&Value::Null), None);
        assert_eq!(parse_number(&json!(true)), None);
    }

    #[test]
    fn test_parse_timelog_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap();
        assert_eq!(parse_timelog("2025-11-01T08:00:00+00:00").unwrap(), expected);
        assert_eq!(parse_timelog("2025-11-01T10:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timelog("2025-11-01T08:00:00.000").unwrap(), expected);
        assert_eq!(parse_timelog("2025-11-01 08:00:00").unwrap(), expected);
        assert_eq!(parse_timelog("2025-11-01 08:00:00+00").unwrap(), expected);
        assert_eq!(
            parse_timelog("2025-11-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timelog("yesterday"),
            Err(RowError::InvalidTimelog("yesterday".to_string()))
        );
    }

    #[test]
    fn test_row_conversion() {
        let row: VitalsRow = serde_json::from_value(json!({
            "vitals_id": 42,
            "consent_id": 7,
            "timelog": "2025-11-08T09:30:00Z",
            "temperature": "36.9",
            "heart_rate": 88,
            "systolic": 141,
            "diastolic": null
        }))
        .unwrap();

        let record = VitalRecord::try_from(row).unwrap();
        assert_eq!(record.id, Some(42));
        assert_eq!(record.temperature, Some(36.9));
        assert_eq!(record.heart_rate, Some(88.0));
        assert_eq!(record.systolic, Some(141.0));
        assert_eq!(record.diastolic, None);
    }

    #[test]
    fn test_rows_with_bad_timelog_are_skipped() {
        let rows: Vec<VitalsRow> = serde_json::from_value(json!([
            { "timelog": "2025-11-08T09:30:00Z", "systolic": 120 },
            { "timelog": "not a date", "systolic": 130 }
        ]))
        .unwrap();

        let records = rows_to_records(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].systolic, Some(120.0));
        assert_eq!(records[0].temperature, None);
    }
}
