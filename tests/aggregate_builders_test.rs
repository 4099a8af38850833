// ABOUTME: Tests for the multi-metric context builder and the quarterly aggregate builder
// ABOUTME: Verifies metric naming, skipping of metrics without data and cross-source completeness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use std::collections::BTreeMap;

use common::{approx_eq, at, daily_samples, date, init_test_logging};
use serde_json::json;
use vitals_core::constants::metrics::{HEART_RATE, RESTING_HEART_RATE, STEP_COUNT};
use vitals_core::models::{
    MetricSample, Metadata, PeriodType, Quarter, RawMetricSample, SleepIntervalRecord,
    SleepSession, SleepStage,
};
use vitals_intelligence::{
    MetricContextBuilder, QuarterlyAggregateBuilder, SleepSessionReducer, TierConfig,
};

fn samples_by_metric(
    entries: Vec<(&str, Vec<MetricSample>)>,
) -> BTreeMap<String, Vec<MetricSample>> {
    entries
        .into_iter()
        .map(|(identifier, samples)| (identifier.to_owned(), samples))
        .collect()
}

#[test]
fn test_context_covers_every_metric_with_data() {
    init_test_logging();
    let samples = samples_by_metric(vec![
        (STEP_COUNT, daily_samples(date(2024, 1, 1), 100, |_| 9000.0)),
        (HEART_RATE, daily_samples(date(2024, 3, 1), 10, |_| 62.0)),
        (RESTING_HEART_RATE, Vec::new()),
    ]);
    let config = TierConfig::default();

    let context = MetricContextBuilder::build(&samples, &config);

    assert_eq!(context.len(), 2);
    assert!(!context.contains_key(RESTING_HEART_RATE));
    assert_eq!(context[HEART_RATE].len(), 10);
    assert!(context[STEP_COUNT].len() <= config.max_entries());
    assert!(context[STEP_COUNT]
        .iter()
        .any(|entry| entry.period_type == PeriodType::Weekly));
    assert!(context[STEP_COUNT]
        .iter()
        .all(|entry| approx_eq(entry.value, 9000.0)));
}

#[test]
fn test_single_metric_context_uses_metric_kind() {
    let samples = vec![
        MetricSample::new(at(2024, 6, 3, 8, 0), 60.0, "count/min"),
        MetricSample::new(at(2024, 6, 3, 20, 0), 70.0, "count/min"),
    ];

    let history = MetricContextBuilder::for_metric(HEART_RATE, &samples, &TierConfig::default());

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].period_type, PeriodType::Daily);
    assert!(approx_eq(history[0].value, 65.0));
}

#[test]
fn test_context_from_raw_samples() {
    let raw = |timestamp: &str, value| RawMetricSample {
        timestamp: timestamp.to_owned(),
        value,
        unit: "count".to_owned(),
        metadata: Metadata::new(),
    };
    let mut raw_by_metric = BTreeMap::new();
    raw_by_metric.insert(
        STEP_COUNT.to_owned(),
        vec![
            raw("2024-08-01T08:00:00Z", json!(4000)),
            raw("2024-08-01T19:00:00Z", json!("1500")),
            raw("not-a-time", json!(10)),
        ],
    );
    raw_by_metric.insert(HEART_RATE.to_owned(), vec![raw("2024-08-01", json!("n/a"))]);

    let context = MetricContextBuilder::build_raw(&raw_by_metric, &TierConfig::default());

    assert_eq!(context.len(), 1);
    let steps = &context[STEP_COUNT];
    assert_eq!(steps.len(), 1);
    assert!(approx_eq(steps[0].value, 5500.0));
    assert_eq!(steps[0].sample_count, 2);
}

#[test]
fn test_quarterly_aggregate_from_metrics_and_sleep() {
    init_test_logging();
    let q1 = Quarter::new(2024, 1).unwrap();
    let samples = samples_by_metric(vec![
        (STEP_COUNT, daily_samples(date(2024, 1, 1), 10, |offset| 1000.0 * (offset + 1) as f64)),
        (HEART_RATE, daily_samples(date(2024, 5, 1), 10, |_| 60.0)),
        ("HKQuantityTypeIdentifierBodyMass", daily_samples(date(2024, 2, 1), 2, |_| 70.5)),
    ]);
    let intervals = vec![
        SleepIntervalRecord {
            start: at(2024, 3, 1, 23, 0),
            end: at(2024, 3, 2, 7, 0),
            stage: SleepStage::Asleep,
        },
        SleepIntervalRecord {
            start: at(2024, 3, 2, 23, 30),
            end: at(2024, 3, 3, 6, 30),
            stage: SleepStage::Core,
        },
    ];
    let sessions = SleepSessionReducer::reduce(&intervals);
    let generated_at = at(2024, 4, 2, 9, 0);

    let aggregate =
        QuarterlyAggregateBuilder::build(q1, &samples, &sessions, "healthkit", generated_at)
            .unwrap();

    assert_eq!(aggregate.version, 1);
    assert_eq!((aggregate.year, aggregate.quarter), (2024, 1));
    assert_eq!(aggregate.date_range.start, date(2024, 1, 1));
    assert_eq!(aggregate.date_range.end, date(2024, 3, 31));
    assert_eq!(aggregate.generated_at, generated_at);
    assert_eq!(aggregate.data_source, "healthkit");

    let names: Vec<&str> = aggregate.metrics.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["HKQuantityTypeIdentifierBodyMass", "sleep", "steps"]);

    let steps = &aggregate.metrics["steps"];
    assert_eq!(steps.sample_count, 10);
    assert!(approx_eq(steps.average, 5500.0));

    let sleep = &aggregate.metrics["sleep"];
    assert_eq!(sleep.sample_count, 2);
    assert!(approx_eq(sleep.avg_duration.unwrap(), 450.0));
    assert!(approx_eq(sleep.avg_efficiency.unwrap(), 100.0));

    // 10 step days + 2 body-mass days + 2 sleep-only days
    assert_eq!(aggregate.summary.total_days, 91);
    assert_eq!(aggregate.summary.active_days, 14);
    assert!(approx_eq(aggregate.summary.completeness, 14.0 / 91.0));
    assert!(aggregate.is_for(q1));
}

#[test]
fn test_quarter_without_data_has_no_metrics() {
    let q3 = Quarter::new(2024, 3).unwrap();
    let samples =
        samples_by_metric(vec![(STEP_COUNT, daily_samples(date(2024, 1, 1), 5, |_| 1.0))]);

    let aggregate =
        QuarterlyAggregateBuilder::build(q3, &samples, &[], "healthkit", at(2024, 10, 1, 0, 0))
            .unwrap();

    assert!(aggregate.metrics.is_empty());
    assert_eq!(aggregate.summary.active_days, 0);
    assert!(approx_eq(aggregate.summary.completeness, 0.0));
}

#[test]
fn test_quarter_with_data_every_day_is_complete() {
    let q1 = Quarter::new(2024, 1).unwrap();
    let samples = samples_by_metric(vec![(
        STEP_COUNT,
        daily_samples(date(2024, 1, 1), 91, |offset| 8000.0 + offset as f64),
    )]);

    let aggregate =
        QuarterlyAggregateBuilder::build(q1, &samples, &[], "healthkit", at(2024, 4, 1, 0, 0))
            .unwrap();

    assert_eq!(aggregate.summary.total_days, 91);
    assert_eq!(aggregate.summary.active_days, 91);
    assert!(approx_eq(aggregate.summary.completeness, 1.0));
    assert_eq!(aggregate.metrics["steps"].sample_count, 91);
}

#[test]
fn test_unusable_sleep_sessions_are_ignored() {
    let q2 = Quarter::new(2024, 2).unwrap();
    let broken = |day: u32, minutes: f64, efficiency: f64| SleepSession {
        date: date(2024, 4, day),
        sleep_duration: minutes,
        efficiency,
        stage_breakdown: BTreeMap::new(),
    };
    let sessions = vec![
        broken(2, f64::NAN, 90.0),
        broken(3, 420.0, f64::NAN),
        broken(4, f64::INFINITY, 95.0),
    ];
    let samples =
        samples_by_metric(vec![(HEART_RATE, daily_samples(date(2024, 4, 1), 2, |_| 58.0))]);
    let generated_at = at(2024, 7, 1, 0, 0);

    let aggregate =
        QuarterlyAggregateBuilder::build(q2, &samples, &sessions, "healthkit", generated_at)
            .unwrap();

    assert!(!aggregate.metrics.contains_key("sleep"));
    assert_eq!(aggregate.summary.active_days, 2);
}
