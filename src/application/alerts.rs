// Abnormal-reading detection over raw records
use crate::domain::thresholds::{AbnormalFlags, VitalThresholds};
use crate::domain::vitals::VitalRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalAlert {
    pub record_id: Option<i64>,
    pub recorded_at: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<String>,
    pub flags: AbnormalFlags,
    pub abnormal_vitals: Vec<&'static str>,
}

impl VitalAlert {
    fn new(record: &VitalRecord, flags: AbnormalFlags) -> Self {
        Self {
            record_id: record.id,
            recorded_at: record.timestamp,
            temperature: record.temperature,
            heart_rate: record.heart_rate,
            blood_pressure: record.blood_pressure_label(),
            flags,
            abnormal_vitals: flags.describe(),
        }
    }
}

/// Abnormal records not yet dismissed, newest first.
///
/// Records without an id can never be dismissed and always surface.
pub fn detect_alerts(
    records: &[VitalRecord],
    thresholds: &VitalThresholds,
    dismissed: &HashSet<i64>,
) -> Vec<VitalAlert> {
    let mut alerts: Vec<VitalAlert> = records
        .iter()
        .filter(|r| r.id.is_none_or(|id| !dismissed.contains(&id)))
        .filter_map(|r| {
            let flags = thresholds.classify(r);
            flags.any().then(|| VitalAlert::new(r, flags))
        })
        .collect();

    alerts.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, day: u32, temp: f64, hr: f64) -> VitalRecord {
        VitalRecord {
            id: Some(id),
            temperature: Some(temp),
            heart_rate: Some(hr),
            systolic: Some(118.0),
            diastolic: Some(76.0),
            ..VitalRecord::new(Utc.with_ymd_and_hms(2025, 11, day, 9, 0, 0).unwrap())
        }
    }

    #[test]
    fn test_only_abnormal_records_newest_first() {
        let records = vec![
            record(1, 3, 38.2, 80.0),
            record(2, 4, 36.7, 75.0),
            record(3, 5, 36.9, 112.0),
        ];
        let alerts = detect_alerts(&records, &VitalThresholds::default(), &HashSet::new());

        let ids: Vec<Option<i64>> = alerts.iter().map(|a| a.record_id).collect();
        assert_eq!(ids, vec![Some(3), Some(1)]);
        assert_eq!(alerts[0].abnormal_vitals, vec!["Heart Rate"]);
        assert_eq!(alerts[1].abnormal_vitals, vec!["Temperature (fever)"]);
        assert_eq!(alerts[1].blood_pressure.as_deref(), Some("118/76"));
    }

    #[test]
    fn test_dismissed_records_are_filtered() {
        let records = vec![record(1, 3, 38.2, 80.0), record(3, 5, 36.9, 112.0)];
        let dismissed = HashSet::from([3]);
        let alerts = detect_alerts(&records, &VitalThresholds::default(), &dismissed);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].record_id, Some(1));
    }

    #[test]
    fn test_records_without_id_always_surface() {
        let mut anonymous = record(0, 6, 39.0, 80.0);
        anonymous.id = None;
        let alerts = detect_alerts(&[anonymous], &VitalThresholds::default(), &HashSet::from([0]));
        assert_eq!(alerts.len(), 1);
    }
}
