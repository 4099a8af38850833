// ABOUTME: Core data models for the aggregation engine
// ABOUTME: Re-exports samples, daily values, periods, quarters, sleep sessions and aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Reduction is one-way: a [`MetricSample`] is reduced into a [`DailyValue`],
//! which is reduced again into an [`AggregatedPeriod`] (ephemeral, for AI
//! context) or a [`QuarterlyMetricSummary`] (persisted inside a
//! [`QuarterlyHealthAggregate`]). No model keeps a reference to its inputs.
//!
//! All calendar arithmetic is done in UTC; see [`calendar`].

/// UTC calendar helpers (day, week and month boundaries)
pub mod calendar;

mod aggregate;
mod period;
mod quarter;
mod sample;
mod sleep;

pub use aggregate::{
    DateRange, QuarterlyHealthAggregate, QuarterlyMetricSummary, QuarterlySummary, Trend,
};
pub use period::{AggregatedPeriod, AggregationType, DailySeries, DailyValue, PeriodType};
pub use quarter::Quarter;
pub use sample::{normalize_samples, parse_timestamp, Metadata, MetricSample, RawMetricSample};
pub use sleep::{SleepIntervalRecord, SleepSession, SleepStage};
