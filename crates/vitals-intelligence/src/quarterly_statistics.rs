// ABOUTME: Quarterly summary statistics for one metric: mean, extremes, median, percentiles, spread, trend
// ABOUTME: Works from daily values (preferred), raw samples, or sleep sessions restricted to a quarter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: value counts per quarter are far below 2^52
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: percentile index < len

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use vitals_core::constants::quarterly::{
    P25_FRACTION, P75_FRACTION, TREND_STABLE_THRESHOLD_PERCENT,
};
use vitals_core::models::{
    DailySeries, MetricSample, Quarter, QuarterlyMetricSummary, QuarterlySummary, SleepSession,
    Trend,
};
use vitals_core::{AppError, AppResult};

/// Quarterly statistics calculator
pub struct QuarterlyStatistics;

impl QuarterlyStatistics {
    /// Summarize values given in chronological order
    ///
    /// Non-finite values are ignored. Percentiles use nearest rank without
    /// interpolation and the standard deviation is the population one.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when no finite value remains. Callers are
    /// expected to skip metrics without data before calling.
    pub fn summarize(chronological: &[f64]) -> AppResult<QuarterlyMetricSummary> {
        let values: Vec<f64> = chronological
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .collect();

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        let (Some(&min), Some(&max), Some(median), Some(p25), Some(p75)) = (
            sorted.first(),
            sorted.last(),
            median(&sorted),
            nearest_rank(&sorted, P25_FRACTION),
            nearest_rank(&sorted, P75_FRACTION),
        ) else {
            return Err(AppError::insufficient_data(
                "Cannot summarize a quarter without values",
            ));
        };

        let count = values.len();
        let average = values.iter().sum::<f64>() / count as f64;
        let variance = values
            .iter()
            .map(|value| (value - average).powi(2))
            .sum::<f64>()
            / count as f64;

        Ok(QuarterlyMetricSummary {
            average,
            min,
            max,
            median,
            std_dev: variance.sqrt(),
            sample_count: count,
            trend: Self::calculate_trend(&values),
            p25,
            p75,
            avg_efficiency: None,
            avg_duration: None,
        })
    }

    /// Summarize the daily values of one metric that fall inside `quarter`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when the series has no day in the quarter
    pub fn from_daily_values(
        series: &DailySeries,
        quarter: Quarter,
    ) -> AppResult<QuarterlyMetricSummary> {
        let values: Vec<f64> = series
            .range(quarter.start_date()..=quarter.end_date())
            .map(|(_, day)| day.value)
            .collect();
        Self::summarize(&values).map_err(|_| {
            AppError::insufficient_data(format!("No daily values in {quarter}"))
        })
    }

    /// Summarize raw samples of one metric that fall inside `quarter`
    ///
    /// Samples are ordered by timestamp before the trend is computed.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when no valid sample falls in the quarter
    pub fn from_samples(
        samples: &[MetricSample],
        quarter: Quarter,
    ) -> AppResult<QuarterlyMetricSummary> {
        let mut in_quarter: Vec<&MetricSample> = samples
            .iter()
            .filter(|sample| sample.has_valid_value() && quarter.contains(sample.date()))
            .collect();
        in_quarter.sort_by_key(|sample| sample.timestamp);

        let values: Vec<f64> = in_quarter.iter().map(|sample| sample.value).collect();
        Self::summarize(&values)
            .map_err(|_| AppError::insufficient_data(format!("No samples in {quarter}")))
    }

    /// Summarize sleep durations (minutes) of the sessions inside `quarter`
    ///
    /// Adds the mean efficiency and mean duration to the summary.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when no session falls in the quarter
    pub fn from_sleep_sessions(
        sessions: &[SleepSession],
        quarter: Quarter,
    ) -> AppResult<QuarterlyMetricSummary> {
        let mut in_quarter: Vec<&SleepSession> = sessions
            .iter()
            .filter(|session| {
                quarter.contains(session.date)
                    && session.sleep_duration.is_finite()
                    && session.efficiency.is_finite()
            })
            .collect();
        in_quarter.sort_by_key(|session| session.date);

        let durations: Vec<f64> = in_quarter
            .iter()
            .map(|session| session.sleep_duration)
            .collect();
        let mut summary = Self::summarize(&durations).map_err(|_| {
            AppError::insufficient_data(format!("No sleep sessions in {quarter}"))
        })?;

        let nights = in_quarter.len() as f64;
        summary.avg_efficiency =
            Some(in_quarter.iter().map(|session| session.efficiency).sum::<f64>() / nights);
        summary.avg_duration = Some(summary.average);

        Ok(summary)
    }

    /// Compare the first and last thirds of a chronological sequence
    ///
    /// Fewer than three values, or a change under 5%, is stable. When the first
    /// third averages zero the sign of the difference decides.
    #[must_use]
    pub fn calculate_trend(chronological: &[f64]) -> Trend {
        let third = chronological.len() / 3;
        if third == 0 {
            return Trend::Stable;
        }

        let first_avg = chronological[..third].iter().sum::<f64>() / third as f64;
        let last_avg =
            chronological[chronological.len() - third..].iter().sum::<f64>() / third as f64;

        if first_avg.abs() < f64::EPSILON {
            return match last_avg.partial_cmp(&0.0) {
                Some(Ordering::Greater) => Trend::Increasing,
                Some(Ordering::Less) => Trend::Decreasing,
                _ => Trend::Stable,
            };
        }

        let change_percent = (last_avg - first_avg) / first_avg * 100.0;
        if change_percent.abs() < TREND_STABLE_THRESHOLD_PERCENT {
            Trend::Stable
        } else if change_percent > 0.0 {
            Trend::Increasing
        } else {
            Trend::Decreasing
        }
    }

    /// Coverage of `quarter` given the dates that had any data
    ///
    /// Dates outside the quarter are ignored.
    #[must_use]
    pub fn coverage(quarter: Quarter, active_dates: &BTreeSet<NaiveDate>) -> QuarterlySummary {
        let total_days = quarter.total_days();
        let active_days = u32::try_from(
            active_dates
                .range(quarter.start_date()..=quarter.end_date())
                .count(),
        )
        .unwrap_or(total_days);

        QuarterlySummary {
            total_days,
            active_days,
            completeness: if total_days == 0 {
                0.0
            } else {
                f64::from(active_days) / f64::from(total_days)
            },
        }
    }
}

/// Median of an ascending slice, `None` when empty
fn median(sorted: &[f64]) -> Option<f64> {
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(*sorted.get(middle.checked_sub(1)?)?, *sorted.get(middle)?))
    } else {
        sorted.get(middle).copied()
    }
}

/// Nearest-rank percentile: the value at `floor(len * fraction)`, `None` when empty
fn nearest_rank(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let index = ((sorted.len() as f64) * fraction).floor() as usize;
    sorted.get(index.min(last)).copied()
}
