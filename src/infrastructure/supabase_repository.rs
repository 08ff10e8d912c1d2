// Supabase (PostgREST) repository implementation
use crate::application::vitals_repository::VitalsRepository;
use crate::domain::vitals::VitalRecord;
use crate::infrastructure::row_mapper::{rows_to_records, VitalsRow};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const VITALS_COLUMNS: &str = "vitals_id,consent_id,timelog,temperature,heart_rate,systolic,diastolic";

#[derive(Debug, Clone)]
pub struct SupabaseRepository {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ConsentRow {
    consent_id: i64,
}

impl SupabaseRepository {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client: reqwest::Client::new(),
        }
    }

    fn consent_url(&self, student_id: &str) -> String {
        format!(
            "{}/rest/v1/consent?select=consent_id&student_id=eq.{}",
            self.base_url,
            urlencoding::encode(student_id)
        )
    }

    fn vitals_url(&self, consent_ids: &[i64], order: &str, limit: usize) -> String {
        let ids = consent_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/rest/v1/vitals?select={}&consent_id=in.({})&order={}&limit={}",
            self.base_url, VITALS_COLUMNS, ids, order, limit
        )
    }

    async fn fetch_rows(&self, consent_ids: &[i64], order: &str, limit: usize) -> Result<Vec<VitalRecord>> {
        if consent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.vitals_url(consent_ids, order, limit);
        let rows: Vec<VitalsRow> = self.get_json(&url).await?;
        tracing::debug!("Supabase returned {} vitals rows", rows.len());

        Ok(rows_to_records(rows))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to Supabase")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Supabase request failed with status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse Supabase response")
    }
}

#[async_trait]
impl VitalsRepository for SupabaseRepository {
    async fn list_consent_ids(&self, student_id: &str) -> Result<Vec<i64>> {
        let url = self.consent_url(student_id);
        tracing::debug!("Fetching consents for student {}", student_id);

        let rows: Vec<ConsentRow> = self.get_json(&url).await?;
        Ok(rows.into_iter().map(|r| r.consent_id).collect())
    }

    async fn fetch_recent_vitals(&self, consent_ids: &[i64], limit: usize) -> Result<Vec<VitalRecord>> {
        self.fetch_rows(consent_ids, "timelog.desc", limit).await
    }

    async fn fetch_latest_vital(&self, consent_ids: &[i64]) -> Result<Option<VitalRecord>> {
        let rows = self.fetch_rows(consent_ids, "vitals_id.desc", 1).await?;
        Ok(rows.into_iter().next())
    }
}
