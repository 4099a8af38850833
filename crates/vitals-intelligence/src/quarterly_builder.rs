// ABOUTME: Assembles a QuarterlyHealthAggregate from every metric's samples and the sleep sessions
// ABOUTME: Skips metrics without in-quarter data and computes completeness across all sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use tracing::{debug, info};
use vitals_core::constants::quarterly::{AGGREGATE_VERSION, SLEEP_METRIC_KEY};
use vitals_core::models::{
    DateRange, MetricSample, Quarter, QuarterlyHealthAggregate, QuarterlyMetricSummary,
    SleepSession,
};
use vitals_core::{metric_name, AppResult};

use crate::daily_bucketizer::DailyBucketizer;
use crate::quarterly_statistics::QuarterlyStatistics;

struct MetricOutcome {
    name: String,
    summary: QuarterlyMetricSummary,
    active_dates: Vec<NaiveDate>,
}

/// Quarterly aggregate builder
pub struct QuarterlyAggregateBuilder;

impl QuarterlyAggregateBuilder {
    /// Compute the aggregate of `quarter` from raw samples and sleep sessions
    ///
    /// Metrics are keyed by their short name (`steps`, `heartRate`, ...);
    /// identifiers outside the tracked set keep their identifier as name. The
    /// sleep summary is stored under `sleep`.
    ///
    /// # Errors
    ///
    /// Propagates statistics errors; with the empty-metric pre-check in place
    /// none are expected
    pub fn build(
        quarter: Quarter,
        samples_by_metric: &BTreeMap<String, Vec<MetricSample>>,
        sleep_sessions: &[SleepSession],
        data_source: &str,
        generated_at: DateTime<Utc>,
    ) -> AppResult<QuarterlyHealthAggregate> {
        let outcomes: Vec<Option<MetricOutcome>> = samples_by_metric
            .par_iter()
            .map(|(identifier, samples)| Self::summarize_metric(quarter, identifier, samples))
            .collect::<AppResult<_>>()?;

        let mut metrics = BTreeMap::new();
        let mut active_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for outcome in outcomes.into_iter().flatten() {
            active_dates.extend(outcome.active_dates);
            metrics.insert(outcome.name, outcome.summary);
        }

        let sleep_dates: Vec<NaiveDate> = sleep_sessions
            .iter()
            .filter(|session| {
                session.sleep_duration.is_finite() && session.efficiency.is_finite()
            })
            .map(|session| session.date)
            .filter(|date| quarter.contains(*date))
            .collect();
        if !sleep_dates.is_empty() {
            let summary = QuarterlyStatistics::from_sleep_sessions(sleep_sessions, quarter)?;
            metrics.insert(SLEEP_METRIC_KEY.to_owned(), summary);
            active_dates.extend(sleep_dates);
        }

        let summary = QuarterlyStatistics::coverage(quarter, &active_dates);

        info!(
            %quarter,
            metrics = metrics.len(),
            active_days = summary.active_days,
            completeness = summary.completeness,
            "Built quarterly aggregate"
        );

        Ok(QuarterlyHealthAggregate {
            version: AGGREGATE_VERSION,
            quarter: quarter.number(),
            year: quarter.year(),
            date_range: DateRange {
                start: quarter.start_date(),
                end: quarter.end_date(),
            },
            metrics,
            summary,
            generated_at,
            data_source: data_source.to_owned(),
        })
    }

    fn summarize_metric(
        quarter: Quarter,
        identifier: &str,
        samples: &[MetricSample],
    ) -> AppResult<Option<MetricOutcome>> {
        let daily = DailyBucketizer::bucketize_metric(identifier, samples);
        let active_dates: Vec<NaiveDate> = daily
            .range(quarter.start_date()..=quarter.end_date())
            .map(|(date, _)| *date)
            .collect();

        if active_dates.is_empty() {
            debug!(metric = identifier, %quarter, "Skipping metric without quarter data");
            return Ok(None);
        }

        let summary = QuarterlyStatistics::from_daily_values(&daily, quarter)?;
        Ok(Some(MetricOutcome {
            name: metric_name(identifier),
            summary,
            active_dates,
        }))
    }
}
