// Trailing-window aggregation of vital records into fixed buckets
use crate::domain::trend::{round_to, AggregationResult, TimeBucket, Timeframe};
use crate::domain::vitals::{MetricKind, VitalRecord};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Average `metric` per bucket over the trailing window ending at `now`.
///
/// Always yields `timeframe.bucket_count()` entries, oldest first. Empty
/// buckets report 0. Records outside the window, or without a finite value
/// for `metric`, contribute nothing.
pub fn aggregate<Tz: TimeZone>(
    records: &[VitalRecord],
    metric: MetricKind,
    timeframe: Timeframe,
    now: &DateTime<Tz>,
) -> AggregationResult {
    let zone = now.timezone();
    let mut buckets = bucket_layout(timeframe, now.date_naive());
    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.period_start, i))
        .collect();

    for record in records {
        let Some(value) = record.metric_value(metric) else {
            continue;
        };
        let local_day = record.timestamp.with_timezone(&zone).date_naive();
        if let Some(&i) = index.get(&period_start(timeframe, local_day)) {
            buckets[i].add(value);
        }
    }

    AggregationResult {
        labels: buckets.iter().map(|b| b.period_label.clone()).collect(),
        values: buckets.iter().map(|b| round_to(b.average(), 2)).collect(),
    }
}

/// Empty buckets for the window ending on `today`, oldest first
pub fn bucket_layout(timeframe: Timeframe, today: NaiveDate) -> Vec<TimeBucket> {
    let current = period_start(timeframe, today);
    let count = timeframe.bucket_count();

    (0..count)
        .rev()
        .filter_map(|back| step_back(timeframe, current, back as u32))
        .map(|start| TimeBucket::new(start, timeframe))
        .collect()
}

/// Anchor date of the bucket containing `day`
pub fn period_start(timeframe: Timeframe, day: NaiveDate) -> NaiveDate {
    match timeframe {
        Timeframe::Daily => day,
        Timeframe::Weekly => day - Duration::days(day.weekday().num_days_from_monday() as i64),
        Timeframe::Monthly => day.with_day(1).unwrap_or(day),
    }
}

fn step_back(timeframe: Timeframe, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
    match timeframe {
        Timeframe::Daily => anchor.checked_sub_signed(Duration::days(steps as i64)),
        Timeframe::Weekly => anchor.checked_sub_signed(Duration::weeks(steps as i64)),
        Timeframe::Monthly => anchor.checked_sub_months(chrono::Months::new(steps)),
    }
}
