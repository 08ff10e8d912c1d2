use crate::domain::thresholds::VitalThresholds;
use crate::domain::trend::ChartCanvas;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub chart: ChartCanvas,
    #[serde(default)]
    pub thresholds: VitalThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    /// Rows read for trends and the scan log
    #[serde(default = "default_vitals_limit")]
    pub vitals_limit: usize,
    /// Rows scanned for abnormal readings
    #[serde(default = "default_alerts_limit")]
    pub alerts_limit: usize,
}

fn default_vitals_limit() -> usize {
    500
}

fn default_alerts_limit() -> usize {
    100
}

/// Load `config/vitals.*`, overridden by `VITALS__SECTION__KEY` variables
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/vitals").required(false))
        .add_source(
            config::Environment::with_prefix("VITALS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
