// ABOUTME: Tests for per-day reduction of raw samples
// ABOUTME: Covers sum vs average per metric kind, UTC day boundaries and dropped samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use common::{approx_eq, at, date, sample};
use serde_json::{json, Value};
use vitals_core::constants::metrics::{HEART_RATE, STEP_COUNT};
use vitals_core::models::{AggregationType, Metadata, RawMetricSample};
use vitals_core::MetricKind;
use vitals_intelligence::DailyBucketizer;

fn raw(timestamp: &str, value: Value) -> RawMetricSample {
    RawMetricSample {
        timestamp: timestamp.to_owned(),
        value,
        unit: "count".to_owned(),
        metadata: Metadata::new(),
    }
}

#[test]
fn test_cumulative_metric_sums_per_day() {
    let samples = vec![
        sample(at(2024, 3, 4, 8, 0), 1200.0),
        sample(at(2024, 3, 4, 18, 30), 800.0),
        sample(at(2024, 3, 5, 9, 0), 450.0),
    ];

    let series = DailyBucketizer::bucketize_metric(STEP_COUNT, &samples);

    assert_eq!(series.len(), 2);
    let first = &series[&date(2024, 3, 4)];
    assert!(approx_eq(first.value, 2000.0));
    assert_eq!(first.sample_count, 2);
    assert_eq!(first.aggregation_type, AggregationType::Sum);
    assert!(approx_eq(series[&date(2024, 3, 5)].value, 450.0));
}

#[test]
fn test_status_metric_averages_per_day() {
    let samples = vec![
        sample(at(2024, 3, 4, 8, 0), 58.0),
        sample(at(2024, 3, 4, 12, 0), 72.0),
        sample(at(2024, 3, 4, 20, 0), 65.0),
    ];

    let series = DailyBucketizer::bucketize_metric(HEART_RATE, &samples);

    let day = &series[&date(2024, 3, 4)];
    assert!(approx_eq(day.value, 65.0));
    assert_eq!(day.sample_count, 3);
    assert_eq!(day.aggregation_type, AggregationType::Average);
}

#[test]
fn test_days_split_at_utc_midnight() {
    let samples = vec![
        sample(at(2024, 6, 30, 23, 59), 10.0),
        sample(at(2024, 7, 1, 0, 1), 20.0),
    ];

    let series = DailyBucketizer::bucketize(&samples, MetricKind::Cumulative);

    let dates: Vec<_> = series.keys().copied().collect();
    assert_eq!(dates, vec![date(2024, 6, 30), date(2024, 7, 1)]);
}

#[test]
fn test_non_finite_values_are_skipped() {
    let samples = vec![
        sample(at(2024, 1, 10, 9, 0), f64::NAN),
        sample(at(2024, 1, 10, 10, 0), 30.0),
        sample(at(2024, 1, 11, 10, 0), f64::INFINITY),
    ];

    let series = DailyBucketizer::bucketize(&samples, MetricKind::Cumulative);

    assert_eq!(series.len(), 1);
    let day = &series[&date(2024, 1, 10)];
    assert!(approx_eq(day.value, 30.0));
    assert_eq!(day.sample_count, 1);
}

#[test]
fn test_empty_input_yields_empty_series() {
    assert!(DailyBucketizer::bucketize(&[], MetricKind::Status).is_empty());
}

#[test]
fn test_raw_samples_drop_malformed_entries() {
    let raw_samples = vec![
        raw("2024-02-01T07:00:00Z", json!(100)),
        raw("2024-02-01T09:00:00", json!("250")),
        raw("2024-02-02", json!(40.5)),
        raw("yesterday", json!(999)),
        raw("2024-02-01T10:00:00Z", json!("lots")),
        raw("2024-02-01T11:00:00Z", json!(null)),
    ];

    let series = DailyBucketizer::bucketize_raw(STEP_COUNT, &raw_samples);

    assert_eq!(series.len(), 2);
    assert!(approx_eq(series[&date(2024, 2, 1)].value, 350.0));
    assert!(approx_eq(series[&date(2024, 2, 2)].value, 40.5));
    assert_eq!(DailyBucketizer::total_samples(&series), 3);
}

#[test]
fn test_offset_timestamps_are_converted_to_utc() {
    let raw_samples = vec![raw("2024-02-01T23:30:00-05:00", json!(5))];

    let series = DailyBucketizer::bucketize_raw(STEP_COUNT, &raw_samples);

    assert!(series.contains_key(&date(2024, 2, 2)));
}

#[test]
fn test_daily_value_renders_as_sample() {
    let samples = vec![sample(at(2024, 5, 20, 6, 0), 12.0)];
    let series = DailyBucketizer::bucketize_metric(STEP_COUNT, &samples);
    let day = series.values().next().unwrap();

    assert_eq!(day.day_key(), "2024-05-20");
    let rendered = day.to_sample();
    assert_eq!(rendered.timestamp, at(2024, 5, 20, 0, 0));
    assert_eq!(rendered.metadata["sampleCount"], json!(1));
    assert_eq!(rendered.metadata["aggregationType"], json!("sum"));
}

#[test]
fn test_daily_counts_add_up_to_valid_inputs() {
    let raw_samples = vec![
        raw("2024-07-01T06:00:00Z", json!(100)),
        raw("2024-07-01T12:00:00Z", json!("250")),
        raw("2024-07-01T23:59:59Z", json!(50.5)),
        raw("2024-07-02T00:00:00Z", json!(10)),
        raw("2024-07-03", json!(7)),
        raw("2024-07-03T08:00:00Z", json!("NaN")),
        raw("2024-07-03T09:00:00Z", json!("inf")),
        raw("2024-07-03T10:00:00Z", json!("steps")),
        raw("2024-07-03T11:00:00Z", Value::Null),
        raw("yesterday", json!(40)),
        raw("2024-13-01T00:00:00Z", json!(40)),
    ];

    let series = DailyBucketizer::bucketize_raw(STEP_COUNT, &raw_samples);

    assert_eq!(series.len(), 3);
    assert_eq!(DailyBucketizer::total_samples(&series), 5);
    assert_eq!(series[&date(2024, 7, 1)].sample_count, 3);
    assert!(approx_eq(series[&date(2024, 7, 1)].value, 400.5));

    let typed = vec![
        sample(at(2024, 7, 1, 8, 0), 60.0),
        sample(at(2024, 7, 1, 9, 0), f64::NAN),
        sample(at(2024, 7, 2, 9, 0), f64::INFINITY),
        sample(at(2024, 7, 2, 10, 0), 70.0),
        sample(at(2024, 7, 4, 10, 0), 80.0),
    ];
    let series = DailyBucketizer::bucketize(&typed, MetricKind::Status);
    assert_eq!(DailyBucketizer::total_samples(&series), 3);
    assert_eq!(series.len(), 3);
}
