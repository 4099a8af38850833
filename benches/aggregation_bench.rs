// ABOUTME: Criterion benchmarks for the aggregation pipeline
// ABOUTME: Measures daily bucketing, tiered selection and quarterly aggregate building
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the aggregation pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vitals_engine::vitals_core::constants::metrics::{HEART_RATE, STEP_COUNT};
use vitals_engine::vitals_core::models::{MetricSample, Quarter};
use vitals_engine::vitals_core::MetricKind;
use vitals_engine::vitals_intelligence::{
    DailyBucketizer, MetricContextBuilder, QuarterlyAggregateBuilder, TierConfig,
    TieredResolutionSelector,
};

/// Readings per day in generated histories
const SAMPLES_PER_DAY: i64 = 24;

fn history_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Hourly readings over `days` days
#[allow(clippy::cast_precision_loss)]
fn generate_samples(days: i64) -> Vec<MetricSample> {
    let start = history_start();
    (0..days * SAMPLES_PER_DAY)
        .map(|hour| {
            let value = 40.0 + ((hour * 37) % 200) as f64;
            MetricSample::new(start + Duration::hours(hour), value, "count")
        })
        .collect()
}

fn bench_bucketize(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_bucketize");

    for days in [90_i64, 365, 1095] {
        let samples = generate_samples(days);
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &samples, |b, samples| {
            b.iter(|| DailyBucketizer::bucketize(black_box(samples), MetricKind::Cumulative));
        });
    }

    group.finish();
}

fn bench_tiered_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiered_select");
    let config = TierConfig::default();

    for days in [365_i64, 730, 2000] {
        let series = DailyBucketizer::bucketize(&generate_samples(days), MetricKind::Status);
        group.bench_with_input(BenchmarkId::from_parameter(days), &series, |b, series| {
            b.iter(|| {
                TieredResolutionSelector::select(black_box(series), &config, MetricKind::Status)
            });
        });
    }

    group.finish();
}

fn bench_pipelines(c: &mut Criterion) {
    let mut samples = BTreeMap::new();
    samples.insert(STEP_COUNT.to_owned(), generate_samples(730));
    samples.insert(HEART_RATE.to_owned(), generate_samples(730));
    let config = TierConfig::default();

    c.bench_function("metric_context_two_years", |b| {
        b.iter(|| MetricContextBuilder::build(black_box(&samples), &config));
    });

    if let Ok(quarter) = Quarter::new(2023, 2) {
        let generated_at = history_start();
        c.bench_function("quarterly_aggregate", |b| {
            b.iter(|| {
                QuarterlyAggregateBuilder::build(
                    quarter,
                    black_box(&samples),
                    &[],
                    "bench",
                    generated_at,
                )
            });
        });
    }
}

criterion_group!(benches, bench_bucketize, bench_tiered_select, bench_pipelines);
criterion_main!(benches);
