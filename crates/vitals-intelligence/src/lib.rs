// ABOUTME: Aggregation engine turning raw health readings into tiered context and quarterly statistics
// ABOUTME: Pure, synchronous, allocation-only transforms safe to call from any number of threads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitals Intelligence
//!
//! Reduction pipeline, leaf-first:
//!
//! 1. [`daily_bucketizer`] groups samples by UTC day (sum or average per metric kind)
//! 2. [`period_aggregator`] reduces daily values inside a week or month to their mean
//! 3. [`tiered_selector`] mixes daily, weekly and monthly resolutions into a bounded sequence
//! 4. [`quarterly_statistics`] computes the per-quarter summary statistics
//!
//! On top of those, [`context_builder`] and [`quarterly_builder`] run the
//! pipeline for every metric of a user, and [`sleep_sessions`] is the default
//! reducer from sleep interval records to per-day sessions.
//!
//! Nothing here holds state: every function reads its arguments and returns a
//! freshly allocated result.

/// Per-day reduction of raw samples
pub mod daily_bucketizer;
/// Reduction of daily values inside a calendar boundary
pub mod period_aggregator;
/// Daily/weekly/monthly resolution selection
pub mod tiered_selector;
/// Quarterly summary statistics
pub mod quarterly_statistics;
/// Sleep interval records to per-day sessions
pub mod sleep_sessions;
/// Tiered context for many metrics at once
pub mod context_builder;
/// Quarterly aggregate assembly
pub mod quarterly_builder;

pub use context_builder::{MetricContext, MetricContextBuilder};
pub use daily_bucketizer::DailyBucketizer;
pub use period_aggregator::PeriodAggregator;
pub use quarterly_builder::QuarterlyAggregateBuilder;
pub use quarterly_statistics::QuarterlyStatistics;
pub use sleep_sessions::SleepSessionReducer;
pub use tiered_selector::{TierConfig, TieredResolutionSelector};
