// Vital sign domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single kiosk scan as read from the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalRecord {
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

impl VitalRecord {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            timestamp,
            temperature: None,
            heart_rate: None,
            systolic: None,
            diastolic: None,
        }
    }

    /// Value used when trending `metric`, only if it is a finite number
    pub fn metric_value(&self, metric: MetricKind) -> Option<f64> {
        let value = match metric {
            MetricKind::Temperature => self.temperature,
            MetricKind::HeartRate => self.heart_rate,
            MetricKind::BloodPressure => self.systolic,
        };
        value.filter(|v| v.is_finite())
    }

    /// "120/80", or just "120" for a single-value reading
    pub fn blood_pressure_label(&self) -> Option<String> {
        let systolic = self.systolic.filter(|v| v.is_finite())?;
        Some(match self.diastolic.filter(|v| v.is_finite()) {
            Some(diastolic) => format!("{}/{}", systolic, diastolic),
            None => format!("{}", systolic),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Temperature,
    HeartRate,
    BloodPressure,
}

impl MetricKind {
    pub fn all() -> [MetricKind; 3] {
        [
            MetricKind::BloodPressure,
            MetricKind::Temperature,
            MetricKind::HeartRate,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::HeartRate => "heart_rate",
            MetricKind::BloodPressure => "blood_pressure",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::Temperature => "Temperature",
            MetricKind::HeartRate => "Heart Rate",
            MetricKind::BloodPressure => "Blood Pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKind::Temperature => "°C",
            MetricKind::HeartRate => "bpm",
            MetricKind::BloodPressure => "mmHg",
        }
    }
}

/// Entry in the "select a trend" list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub key: MetricKind,
    pub name: &'static str,
    pub unit: &'static str,
}

impl From<MetricKind> for MetricSummary {
    fn from(metric: MetricKind) -> Self {
        Self {
            key: metric,
            name: metric.display_name(),
            unit: metric.unit(),
        }
    }
}

/// Exact extrema over raw blood pressure readings.
///
/// Computed from the unbucketed records so clinical peaks and troughs are
/// not averaged away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressureStats {
    pub systolic_max: f64,
    pub systolic_min: f64,
    pub diastolic_max: Option<f64>,
    pub diastolic_min: Option<f64>,
}

impl BloodPressureStats {
    pub fn from_records(records: &[VitalRecord]) -> Option<Self> {
        let (systolic_min, systolic_max) = min_max(records.iter().filter_map(|r| r.systolic))?;
        let diastolic = min_max(records.iter().filter_map(|r| r.diastolic));

        Some(Self {
            systolic_max,
            systolic_min,
            diastolic_max: diastolic.map(|(_, max)| max),
            diastolic_min: diastolic.map(|(min, _)| min),
        })
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}
