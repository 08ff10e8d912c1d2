// Trend service - Use case for building a metric trend view
use crate::application::aggregator::aggregate;
use crate::application::curve_builder::build_curve;
use crate::application::vitals_repository::{load_student_vitals, VitalsRepository};
use crate::domain::trend::{ChartCanvas, Curve, Timeframe, TrendState, TrendView};
use crate::domain::vitals::{BloodPressureStats, MetricKind, VitalRecord};
use chrono::{DateTime, TimeZone};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrendService {
    repository: Arc<dyn VitalsRepository>,
    vitals_limit: usize,
}

impl TrendService {
    pub fn new(repository: Arc<dyn VitalsRepository>, vitals_limit: usize) -> Self {
        Self {
            repository,
            vitals_limit,
        }
    }

    pub async fn trend<Tz: TimeZone>(
        &self,
        student_id: &str,
        metric: MetricKind,
        timeframe: Timeframe,
        canvas: ChartCanvas,
        now: &DateTime<Tz>,
    ) -> TrendView {
        let records = self.load_records(student_id).await;
        let view = build_trend_view(&records, metric, timeframe, canvas, now);
        tracing::debug!(
            "Built {:?} {} trend for student {}: {:?}, {} points",
            timeframe,
            metric.as_str(),
            student_id,
            view.state,
            view.curve.points.len()
        );
        view
    }

    async fn load_records(&self, student_id: &str) -> Vec<VitalRecord> {
        match load_student_vitals(self.repository.as_ref(), student_id, self.vitals_limit).await {
            Ok(records) => records,
            Err(e) => {
                // Fetch failures surface as the "no records" state
                tracing::warn!("Error fetching vitals for student {}: {:#}", student_id, e);
                Vec::new()
            }
        }
    }
}

pub fn build_trend_view<Tz: TimeZone>(
    records: &[VitalRecord],
    metric: MetricKind,
    timeframe: Timeframe,
    canvas: ChartCanvas,
    now: &DateTime<Tz>,
) -> TrendView {
    let aggregation = aggregate(records, metric, timeframe, now);
    let has_real_data = aggregation.has_real_data();

    let state = if records.is_empty() {
        TrendState::NoRecords
    } else if !has_real_data {
        TrendState::NoDataForTimeframe
    } else {
        TrendState::Ready
    };

    let curve = if has_real_data {
        build_curve(&aggregation.values, canvas.width, canvas.height)
    } else {
        Curve::default()
    };

    let bp_stats = match metric {
        MetricKind::BloodPressure => BloodPressureStats::from_records(records),
        _ => None,
    };

    TrendView {
        metric,
        unit: metric.unit(),
        timeframe,
        state,
        has_real_data,
        labels: aggregation.labels,
        values: aggregation.values,
        curve,
        bp_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::vitals_repository::testing::InMemoryRepository;
    use chrono::{Duration, Utc};

    const STUDENT: &str = "2021-00123";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 15, 30, 0).unwrap()
    }

    fn reading(y: i32, m: u32, d: u32, systolic: f64, diastolic: Option<f64>) -> VitalRecord {
        VitalRecord {
            systolic: Some(systolic),
            diastolic,
            temperature: Some(f64::NAN),
            ..VitalRecord::new(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
        }
    }

    fn service(repo: InMemoryRepository) -> TrendService {
        TrendService::new(Arc::new(repo), 500)
    }

    #[tokio::test]
    async fn test_weekly_blood_pressure_trend() {
        let repo = InMemoryRepository::with_student(
            STUDENT,
            vec![
                reading(2025, 11, 1, 120.0, Some(78.0)),
                reading(2025, 11, 8, 140.0, Some(92.0)),
            ],
        );
        let view = service(repo)
            .trend(STUDENT, MetricKind::BloodPressure, Timeframe::Weekly, ChartCanvas::default(), &now())
            .await;

        assert_eq!(view.state, TrendState::Ready);
        assert!(view.has_real_data);
        assert_eq!(view.unit, "mmHg");
        assert_eq!(view.values.len(), 12);
        assert_eq!(view.values[8], 120.0);
        assert_eq!(view.values[9], 140.0);
        assert_eq!(view.values.iter().filter(|v| **v == 0.0).count(), 10);
        assert_eq!(view.curve.points.len(), 12);

        let stats = view.bp_stats.unwrap();
        assert_eq!(stats.systolic_max, 140.0);
        assert_eq!(stats.systolic_min, 120.0);
        assert_eq!(stats.diastolic_max, Some(92.0));
    }

    #[tokio::test]
    async fn test_missing_metric_values_yield_timeframe_empty_state() {
        let repo = InMemoryRepository::with_student(STUDENT, vec![reading(2025, 11, 18, 120.0, None)]);
        let view = service(repo)
            .trend(STUDENT, MetricKind::Temperature, Timeframe::Daily, ChartCanvas::default(), &now())
            .await;

        assert_eq!(view.state, TrendState::NoDataForTimeframe);
        assert!(!view.has_real_data);
        assert!(view.values.iter().all(|v| *v == 0.0));
        assert!(view.curve.is_empty());
        assert_eq!(view.bp_stats, None);
    }

    #[tokio::test]
    async fn test_long_history_keeps_recent_readings() {
        let pulse = |at: DateTime<Utc>| VitalRecord {
            heart_rate: Some(72.0),
            ..VitalRecord::new(at)
        };
        let old = now() - Duration::days(400);
        let mut records: Vec<VitalRecord> = (0..600).map(|i| pulse(old + Duration::minutes(i))).collect();
        records.extend((0..20).map(|i| pulse(now() - Duration::hours(12 * i))));

        let view = service(InMemoryRepository::with_student(STUDENT, records))
            .trend(STUDENT, MetricKind::HeartRate, Timeframe::Daily, ChartCanvas::default(), &now())
            .await;

        assert_eq!(view.state, TrendState::Ready);
        assert_eq!(view.values.last().copied(), Some(72.0));
        assert_eq!(view.values.iter().filter(|v| **v == 72.0).count(), 10);
    }

    #[tokio::test]
    async fn test_no_records_state() {
        let view = service(InMemoryRepository::default())
            .trend(STUDENT, MetricKind::HeartRate, Timeframe::Monthly, ChartCanvas::default(), &now())
            .await;

        assert_eq!(view.state, TrendState::NoRecords);
        assert_eq!(view.values.len(), 6);
        assert!(view.curve.path_data.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_no_records() {
        let repo = InMemoryRepository {
            fail: true,
            ..Default::default()
        };
        let view = service(repo)
            .trend(STUDENT, MetricKind::BloodPressure, Timeframe::Weekly, ChartCanvas::default(), &now())
            .await;

        assert_eq!(view.state, TrendState::NoRecords);
        assert_eq!(view.bp_stats, None);
    }

    #[test]
    fn test_old_records_only_is_timeframe_empty() {
        let records = vec![reading(2024, 1, 10, 130.0, Some(85.0))];
        let view = build_trend_view(
            &records,
            MetricKind::BloodPressure,
            Timeframe::Daily,
            ChartCanvas::default(),
            &now(),
        );
        assert_eq!(view.state, TrendState::NoDataForTimeframe);
        // Raw extrema still reflect every reading
        assert_eq!(view.bp_stats.map(|s| s.systolic_max), Some(130.0));
    }
}
