// ABOUTME: Reduces the daily values inside a week or month boundary into one aggregated period
// ABOUTME: Always averages per-day values so partial and full periods stay comparable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day counts per period are tiny

use chrono::NaiveDate;
use serde_json::Value;
use vitals_core::models::{AggregatedPeriod, DailyValue, Metadata, PeriodType};
use vitals_core::MetricKind;

/// Period aggregator
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Reduce the daily values within `[calendar_start, calendar_end]` to one period
    ///
    /// The value is the arithmetic mean of the per-day values for every metric
    /// kind; for cumulative metrics that is the average daily total. The sample
    /// count is the sum of the days' sample counts. Start and end dates are the
    /// first and last days with data; the calendar boundary goes into metadata.
    ///
    /// Days outside the boundary are ignored. Returns `None` when no day remains.
    #[must_use]
    pub fn aggregate<'a, I>(
        period_type: PeriodType,
        calendar_start: NaiveDate,
        calendar_end: NaiveDate,
        days: I,
        kind: MetricKind,
    ) -> Option<AggregatedPeriod>
    where
        I: IntoIterator<Item = &'a DailyValue>,
    {
        let mut in_period: Vec<&DailyValue> = days
            .into_iter()
            .filter(|day| (calendar_start..=calendar_end).contains(&day.date))
            .collect();
        if in_period.is_empty() {
            return None;
        }
        in_period.sort_by_key(|day| day.date);

        let first = in_period.first()?;
        let last = in_period.last()?;
        let days_with_data = in_period.len();
        let value = in_period.iter().map(|day| day.value).sum::<f64>() / days_with_data as f64;
        let sample_count = in_period.iter().map(|day| day.sample_count).sum();

        let mut metadata = Metadata::new();
        metadata.insert(
            "calendarStart".to_owned(),
            Value::from(calendar_start.to_string()),
        );
        metadata.insert(
            "calendarEnd".to_owned(),
            Value::from(calendar_end.to_string()),
        );
        metadata.insert("daysWithData".to_owned(), Value::from(days_with_data));
        metadata.insert(
            "aggregation".to_owned(),
            Value::from(if kind.is_cumulative() {
                "averageDailyTotal"
            } else {
                "averageDailyValue"
            }),
        );

        Some(AggregatedPeriod {
            period_type,
            start_date: first.date,
            end_date: last.date,
            value,
            sample_count,
            unit: first.unit.clone(),
            metadata,
        })
    }
}
