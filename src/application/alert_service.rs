// Alert service - Use case for listing abnormal readings
use crate::application::alerts::{detect_alerts, VitalAlert};
use crate::application::vitals_repository::{load_student_vitals, VitalsRepository};
use crate::domain::thresholds::VitalThresholds;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct AlertService {
    repository: Arc<dyn VitalsRepository>,
    thresholds: VitalThresholds,
    alerts_limit: usize,
}

impl AlertService {
    pub fn new(repository: Arc<dyn VitalsRepository>, thresholds: VitalThresholds, alerts_limit: usize) -> Self {
        Self {
            repository,
            thresholds,
            alerts_limit,
        }
    }

    /// Abnormal readings among the `alerts_limit` most recent rows
    pub async fn alerts(&self, student_id: &str, dismissed: &HashSet<i64>) -> anyhow::Result<Vec<VitalAlert>> {
        let records = load_student_vitals(self.repository.as_ref(), student_id, self.alerts_limit).await?;
        let alerts = detect_alerts(&records, &self.thresholds, dismissed);
        tracing::debug!(
            "{} abnormal readings for student {} ({} dismissed)",
            alerts.len(),
            student_id,
            dismissed.len()
        );
        Ok(alerts)
    }
}
