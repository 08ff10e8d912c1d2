// Repository trait for vitals data access
use crate::domain::vitals::VitalRecord;
use async_trait::async_trait;

#[async_trait]
pub trait VitalsRepository: Send + Sync {
    /// Consent ids linking a student to their vitals rows
    async fn list_consent_ids(&self, student_id: &str) -> anyhow::Result<Vec<i64>>;

    /// The `limit` most recent vitals rows for the given consents, newest first
    async fn fetch_recent_vitals(&self, consent_ids: &[i64], limit: usize) -> anyhow::Result<Vec<VitalRecord>>;

    /// Row with the highest vitals id, i.e. the last scan stored
    async fn fetch_latest_vital(&self, consent_ids: &[i64]) -> anyhow::Result<Option<VitalRecord>>;
}

/// Resolve a student's consents and load their most recent vitals, newest first
pub async fn load_student_vitals(
    repository: &dyn VitalsRepository,
    student_id: &str,
    limit: usize,
) -> anyhow::Result<Vec<VitalRecord>> {
    let consent_ids = repository.list_consent_ids(student_id).await?;
    if consent_ids.is_empty() {
        tracing::debug!("No consents found for student {}", student_id);
        return Ok(Vec::new());
    }

    let records = repository.fetch_recent_vitals(&consent_ids, limit).await?;
    tracing::debug!(
        "Loaded {} vitals records for student {} across {} consents",
        records.len(),
        student_id,
        consent_ids.len()
    );
    Ok(records)
}

/// Resolve a student's consents and load their last stored reading
pub async fn load_latest_vital(
    repository: &dyn VitalsRepository,
    student_id: &str,
) -> anyhow::Result<Option<VitalRecord>> {
    let consent_ids = repository.list_consent_ids(student_id).await?;
    if consent_ids.is_empty() {
        tracing::debug!("No consents found for student {}", student_id);
        return Ok(None);
    }
    repository.fetch_latest_vital(&consent_ids).await
}
