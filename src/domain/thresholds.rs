// Abnormal reading thresholds
use super::vitals::VitalRecord;
use serde::{Deserialize, Serialize};

/// Single table of cutoffs used wherever a reading is judged abnormal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalThresholds {
    /// Fever when strictly above (°C)
    pub temperature_high: f64,
    /// Abnormal when strictly below (bpm)
    pub heart_rate_low: f64,
    /// Abnormal when strictly above (bpm)
    pub heart_rate_high: f64,
    /// High when at or above (mmHg)
    pub systolic_high: f64,
    /// High when at or above (mmHg)
    pub diastolic_high: f64,
}

impl Default for VitalThresholds {
    fn default() -> Self {
        Self {
            temperature_high: 37.5,
            heart_rate_low: 60.0,
            heart_rate_high: 100.0,
            systolic_high: 130.0,
            diastolic_high: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AbnormalFlags {
    pub high_temperature: bool,
    pub abnormal_heart_rate: bool,
    pub high_blood_pressure: bool,
}

/// Overall verdict shown next to a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    Normal,
    Abnormal,
}

impl AbnormalFlags {
    pub fn any(&self) -> bool {
        self.high_temperature || self.abnormal_heart_rate || self.high_blood_pressure
    }

    pub fn status(&self) -> ScanStatus {
        if self.any() {
            ScanStatus::Abnormal
        } else {
            ScanStatus::Normal
        }
    }

    /// Human readable names of the flagged vitals
    pub fn describe(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.high_temperature {
            names.push("Temperature (fever)");
        }
        if self.high_blood_pressure {
            names.push("Blood Pressure");
        }
        if self.abnormal_heart_rate {
            names.push("Heart Rate");
        }
        names
    }
}

impl VitalThresholds {
    pub fn classify(&self, record: &VitalRecord) -> AbnormalFlags {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());

        let high_temperature = finite(record.temperature).is_some_and(|t| t > self.temperature_high);
        let abnormal_heart_rate = finite(record.heart_rate)
            .is_some_and(|hr| hr < self.heart_rate_low || hr > self.heart_rate_high);
        // A missing diastolic does not mask a high systolic
        let high_blood_pressure = finite(record.systolic).is_some_and(|s| s >= self.systolic_high)
            || finite(record.diastolic).is_some_and(|d| d >= self.diastolic_high);

        AbnormalFlags {
            high_temperature,
            abnormal_heart_rate,
            high_blood_pressure,
        }
    }
}
