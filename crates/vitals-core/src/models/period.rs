// ABOUTME: Daily values and aggregated periods produced by the reduction pipeline
// ABOUTME: Both can be rendered back into MetricSample shape for AI context payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::calendar::start_of_day_utc;
use super::sample::{Metadata, MetricSample};
use crate::classification::MetricKind;

/// How a day's readings were combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    /// Readings were summed
    Sum,
    /// Readings were averaged
    Average,
}

impl AggregationType {
    /// Daily reduction rule for a metric kind
    #[must_use]
    pub const fn for_kind(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Cumulative => Self::Sum,
            MetricKind::Status => Self::Average,
        }
    }

    /// Lowercase name as serialized
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
        }
    }
}

/// One metric reduced to a single value for one UTC calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValue {
    /// Calendar day (UTC), serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Day total (cumulative metrics) or day mean (status metrics)
    pub value: f64,
    /// Unit of the first valid reading of the day
    pub unit: String,
    /// Valid readings that went into this day
    pub sample_count: usize,
    /// Rule used to combine the readings
    pub aggregation_type: AggregationType,
}

impl DailyValue {
    /// `YYYY-MM-DD` key of this day
    #[must_use]
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Render as a sample stamped at midnight UTC
    #[must_use]
    pub fn to_sample(&self) -> MetricSample {
        MetricSample::new(start_of_day_utc(self.date), self.value, self.unit.clone())
            .with_metadata("sampleCount", self.sample_count)
            .with_metadata("aggregationType", self.aggregation_type.as_str())
    }
}

/// Daily values of one metric, ordered by day
pub type DailySeries = BTreeMap<NaiveDate, DailyValue>;

/// Resolution of an aggregated period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// One calendar day
    Daily,
    /// One Monday-start week
    Weekly,
    /// One calendar month
    Monthly,
}

impl PeriodType {
    /// Lowercase name as serialized
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Summary of one metric over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPeriod {
    /// Resolution of this entry
    pub period_type: PeriodType,
    /// First day with data in the period
    pub start_date: NaiveDate,
    /// Last day with data in the period
    pub end_date: NaiveDate,
    /// Mean of the per-day values
    pub value: f64,
    /// Raw readings behind the period (sum of daily sample counts)
    pub sample_count: usize,
    /// Unit of the underlying readings
    pub unit: String,
    /// Period details (calendar boundary, days with data, aggregation rule)
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl AggregatedPeriod {
    /// Daily-resolution entry kept verbatim from a daily value
    #[must_use]
    pub fn from_daily(day: &DailyValue) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(
            "aggregationType".to_owned(),
            Value::from(day.aggregation_type.as_str()),
        );
        Self {
            period_type: PeriodType::Daily,
            start_date: day.date,
            end_date: day.date,
            value: day.value,
            sample_count: day.sample_count,
            unit: day.unit.clone(),
            metadata,
        }
    }

    /// Instant used to order entries (start of the period, UTC)
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        start_of_day_utc(self.start_date)
    }

    /// Render as a sample carrying its resolution in metadata
    #[must_use]
    pub fn to_sample(&self) -> MetricSample {
        let mut sample = MetricSample::new(self.timestamp(), self.value, self.unit.clone())
            .with_metadata("periodType", self.period_type.as_str())
            .with_metadata("startDate", self.start_date.to_string())
            .with_metadata("endDate", self.end_date.to_string())
            .with_metadata("sampleCount", self.sample_count);
        for (key, value) in &self.metadata {
            sample.metadata.entry(key.clone()).or_insert_with(|| value.clone());
        }
        sample
    }
}
