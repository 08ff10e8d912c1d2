// Scan service - Use case for the latest reading card and the scan log
use crate::application::vitals_repository::{load_latest_vital, load_student_vitals, VitalsRepository};
use crate::domain::thresholds::{AbnormalFlags, ScanStatus, VitalThresholds};
use crate::domain::vitals::VitalRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// One stored scan with its verdict against the threshold table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReading {
    pub record_id: Option<i64>,
    pub recorded_at: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<String>,
    pub status: ScanStatus,
    pub flags: AbnormalFlags,
}

impl ScanReading {
    pub fn classify(record: &VitalRecord, thresholds: &VitalThresholds) -> Self {
        let flags = thresholds.classify(record);
        Self {
            record_id: record.id,
            recorded_at: record.timestamp,
            temperature: record.temperature,
            heart_rate: record.heart_rate,
            blood_pressure: record.blood_pressure_label(),
            status: flags.status(),
            flags,
        }
    }
}

#[derive(Clone)]
pub struct ScanService {
    repository: Arc<dyn VitalsRepository>,
    thresholds: VitalThresholds,
    history_limit: usize,
}

impl ScanService {
    pub fn new(repository: Arc<dyn VitalsRepository>, thresholds: VitalThresholds, history_limit: usize) -> Self {
        Self {
            repository,
            thresholds,
            history_limit,
        }
    }

    /// Last stored scan, `None` when the student has none
    pub async fn latest(&self, student_id: &str) -> anyhow::Result<Option<ScanReading>> {
        let record = load_latest_vital(self.repository.as_ref(), student_id).await?;
        Ok(record.map(|r| ScanReading::classify(&r, &self.thresholds)))
    }

    /// Scan log, newest first
    pub async fn history(&self, student_id: &str) -> anyhow::Result<Vec<ScanReading>> {
        let records = load_student_vitals(self.repository.as_ref(), student_id, self.history_limit).await?;
        let scans: Vec<ScanReading> = records
            .iter()
            .map(|r| ScanReading::classify(r, &self.thresholds))
            .collect();
        tracing::debug!(
            "{} scans for student {}, {} abnormal",
            scans.len(),
            student_id,
            scans.iter().filter(|s| s.status == ScanStatus::Abnormal).count()
        );
        Ok(scans)
    }
}
