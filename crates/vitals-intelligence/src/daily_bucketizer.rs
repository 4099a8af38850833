// ABOUTME: Groups raw metric samples by UTC calendar day and reduces each day to one value
// ABOUTME: Cumulative metrics are summed, status metrics are averaged; invalid values are skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: per-day sample counts are far below 2^52

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;
use vitals_core::models::{
    normalize_samples, AggregationType, DailySeries, DailyValue, MetricSample, RawMetricSample,
};
use vitals_core::MetricKind;

#[derive(Debug)]
struct DayAccumulator {
    sum: f64,
    count: usize,
    unit: String,
}

/// Daily bucketizer
pub struct DailyBucketizer;

impl DailyBucketizer {
    /// Reduce samples of one metric to one value per UTC day
    ///
    /// Samples with a non-finite value are skipped. The sum of `sample_count`
    /// over the result equals the number of valid input samples.
    #[must_use]
    pub fn bucketize(samples: &[MetricSample], kind: MetricKind) -> DailySeries {
        let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
        let mut skipped = 0_usize;

        for sample in samples {
            if !sample.has_valid_value() {
                skipped += 1;
                continue;
            }
            let day = days.entry(sample.date()).or_insert_with(|| DayAccumulator {
                sum: 0.0,
                count: 0,
                unit: sample.unit.clone(),
            });
            day.sum += sample.value;
            day.count += 1;
        }

        if skipped > 0 {
            debug!(skipped, "Skipped samples with non-numeric values");
        }

        let aggregation_type = AggregationType::for_kind(kind);
        days.into_iter()
            .map(|(date, day)| {
                let value = match aggregation_type {
                    AggregationType::Sum => day.sum,
                    AggregationType::Average => day.sum / day.count as f64,
                };
                (
                    date,
                    DailyValue {
                        date,
                        value,
                        unit: day.unit,
                        sample_count: day.count,
                        aggregation_type,
                    },
                )
            })
            .collect()
    }

    /// Reduce samples of the metric named by `identifier`
    #[must_use]
    pub fn bucketize_metric(identifier: &str, samples: &[MetricSample]) -> DailySeries {
        Self::bucketize(samples, MetricKind::classify(identifier))
    }

    /// Normalize raw ingested samples, then reduce them
    ///
    /// Raw samples with a malformed timestamp or a non-numeric value are dropped.
    #[must_use]
    pub fn bucketize_raw(identifier: &str, raw: &[RawMetricSample]) -> DailySeries {
        Self::bucketize_metric(identifier, &normalize_samples(raw))
    }

    /// Total valid samples behind a daily series
    #[must_use]
    pub fn total_samples(series: &DailySeries) -> usize {
        series.values().map(|day| day.sample_count).sum()
    }
}
