// ABOUTME: Quarterly statistical snapshot models, the only entities durably persisted
// ABOUTME: Per-metric summaries, quarter coverage summary, and the versioned aggregate envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::quarter::Quarter;

/// Direction of change between the first and last third of a quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Last third is at least 5% above the first third
    Increasing,
    /// Last third is at least 5% below the first third
    Decreasing,
    /// Change under 5% either way
    Stable,
}

/// Statistics of one metric over one quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyMetricSummary {
    /// Arithmetic mean
    pub average: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Median (mean of the two central values for even counts)
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Number of values summarized
    pub sample_count: usize,
    /// First-third vs last-third direction
    pub trend: Trend,
    /// Nearest-rank 25th percentile
    pub p25: f64,
    /// Nearest-rank 75th percentile
    pub p75: f64,
    /// Mean sleep efficiency (sleep summaries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_efficiency: Option<f64>,
    /// Mean sleep duration in minutes (sleep summaries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_duration: Option<f64>,
}

/// Inclusive date range covered by an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
}

/// Data coverage of a quarter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlySummary {
    /// Calendar days in the quarter
    pub total_days: u32,
    /// Days with at least one sample from any metric or sleep session
    pub active_days: u32,
    /// `active_days / total_days`
    pub completeness: f64,
}

/// Immutable per-quarter statistical snapshot
///
/// Identity is `(quarter, year, owner)`; the owner is implicit in where the
/// aggregate is stored. Once stored it is never rewritten or pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyHealthAggregate {
    /// Schema version
    pub version: u32,
    /// Quarter number, 1-4
    pub quarter: u8,
    /// Calendar year
    pub year: i32,
    /// Days covered
    pub date_range: DateRange,
    /// Metric name to summary
    pub metrics: BTreeMap<String, QuarterlyMetricSummary>,
    /// Coverage of the quarter
    pub summary: QuarterlySummary,
    /// When the snapshot was computed
    pub generated_at: DateTime<Utc>,
    /// Where the raw samples came from
    pub data_source: String,
}

impl QuarterlyHealthAggregate {
    /// Whether this aggregate is the snapshot of `quarter`
    #[must_use]
    pub fn is_for(&self, quarter: Quarter) -> bool {
        self.quarter == quarter.number() && self.year == quarter.year()
    }
}
