// Trend and chart domain models
use super::vitals::{BloodPressureStats, MetricKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Timeframe {
    /// Number of trailing buckets shown for this timeframe
    pub fn bucket_count(self) -> usize {
        match self {
            Timeframe::Daily => 14,
            Timeframe::Weekly => 12,
            Timeframe::Monthly => 6,
        }
    }

    pub fn label_format(self) -> &'static str {
        match self {
            Timeframe::Daily | Timeframe::Weekly => "%b %-d",
            Timeframe::Monthly => "%b",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeBucket {
    pub period_label: String,
    pub period_start: NaiveDate,
    pub sum: f64,
    pub count: usize,
}

impl TimeBucket {
    pub fn new(period_start: NaiveDate, timeframe: Timeframe) -> Self {
        Self {
            period_label: period_start.format(timeframe.label_format()).to_string(),
            period_start,
            sum: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn average(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }
}

/// Parallel label/value arrays, one entry per bucket
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregationResult {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl AggregationResult {
    pub fn has_real_data(&self) -> bool {
        self.values.iter().any(|v| *v > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// One cubic Bezier piece of the rendered curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicSegment {
    pub from: (f64, f64),
    pub ctrl1: (f64, f64),
    pub ctrl2: (f64, f64),
    pub to: (f64, f64),
}

impl CubicSegment {
    /// Evaluate the segment at `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        (
            b0 * self.from.0 + b1 * self.ctrl1.0 + b2 * self.ctrl2.0 + b3 * self.to.0,
            b0 * self.from.1 + b1 * self.ctrl1.1 + b2 * self.ctrl2.1 + b3 * self.to.1,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub y_max_label: f64,
    pub y_mid_label: f64,
    pub y_min_label: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Curve {
    pub points: Vec<ChartPoint>,
    pub segments: Vec<CubicSegment>,
    pub path_data: String,
    pub area_path: String,
    pub stats: Option<SeriesStats>,
}

impl Curve {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCanvas {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartCanvas {
    fn default() -> Self {
        Self {
            width: 340.0,
            height: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    /// The student has no records at all
    NoRecords,
    /// Records exist but none fall into the selected window
    NoDataForTimeframe,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendView {
    pub metric: MetricKind,
    pub unit: &'static str,
    pub timeframe: Timeframe,
    pub state: TrendState,
    pub has_real_data: bool,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub curve: Curve,
    pub bp_stats: Option<BloodPressureStats>,
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
