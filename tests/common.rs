// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, date/sample builders and a canned quarterly aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitals_engine`

use std::collections::BTreeMap;
use std::env;
use std::sync::Once;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tracing::Level;
use vitals_core::models::{
    DateRange, MetricSample, Quarter, QuarterlyHealthAggregate, QuarterlyMetricSummary,
    QuarterlySummary, Trend,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn sample(timestamp: DateTime<Utc>, value: f64) -> MetricSample {
    MetricSample::new(timestamp, value, "count")
}

/// One noon sample per day for `days` consecutive days
pub fn daily_samples(start: NaiveDate, days: i64, value: impl Fn(i64) -> f64) -> Vec<MetricSample> {
    (0..days)
        .map(|offset| {
            let day = start + Duration::days(offset);
            let timestamp = Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap());
            sample(timestamp, value(offset))
        })
        .collect()
}

pub fn summary(average: f64) -> QuarterlyMetricSummary {
    QuarterlyMetricSummary {
        average,
        min: average - 10.0,
        max: average + 10.0,
        median: average,
        std_dev: 4.5,
        sample_count: 60,
        trend: Trend::Stable,
        p25: average - 5.0,
        p75: average + 5.0,
        avg_efficiency: None,
        avg_duration: None,
    }
}

/// Canned aggregate for `quarter` of `year`
pub fn aggregate(year: i32, quarter: u8) -> QuarterlyHealthAggregate {
    let quarter = Quarter::new(year, quarter).unwrap();
    let mut metrics = BTreeMap::new();
    metrics.insert("steps".to_owned(), summary(8500.0));
    metrics.insert("heartRate".to_owned(), summary(64.0));

    QuarterlyHealthAggregate {
        version: 1,
        quarter: quarter.number(),
        year: quarter.year(),
        date_range: DateRange {
            start: quarter.start_date(),
            end: quarter.end_date(),
        },
        metrics,
        summary: QuarterlySummary {
            total_days: quarter.total_days(),
            active_days: 60,
            completeness: 60.0 / f64::from(quarter.total_days()),
        },
        generated_at: at(2025, 1, 2, 8, 0),
        data_source: "test-suite".to_owned(),
    }
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
