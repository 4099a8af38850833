// ABOUTME: Metric sample models in typed and raw (ingestion) form
// ABOUTME: Normalization drops malformed timestamps and non-numeric values instead of grouping them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::calendar::start_of_day_utc;

/// Opaque key/value metadata carried by samples and periods
pub type Metadata = serde_json::Map<String, Value>;

/// One typed health-metric reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Reading value
    pub value: f64,
    /// Unit reported by the source
    #[serde(default)]
    pub unit: String,
    /// Source-specific metadata
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl MetricSample {
    /// Create a sample without metadata
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            unit: unit.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach one metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// UTC calendar day of this reading
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Whether the value can take part in a reduction
    #[must_use]
    pub fn has_valid_value(&self) -> bool {
        self.value.is_finite()
    }
}

/// A reading as delivered by the ingestion pipeline, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetricSample {
    /// Timestamp text (RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`)
    pub timestamp: String,
    /// Value as received (number or numeric string)
    pub value: Value,
    /// Unit reported by the source
    #[serde(default)]
    pub unit: String,
    /// Source-specific metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl RawMetricSample {
    /// Convert into a typed sample, or `None` when the timestamp or value is unusable
    #[must_use]
    pub fn normalize(&self) -> Option<MetricSample> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        let value = numeric_value(&self.value)?;
        Some(MetricSample {
            timestamp,
            value,
            unit: self.unit.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

/// Parse a timestamp, treating zone-less forms as UTC
///
/// Accepts full RFC 3339 (`2025-11-26T07:30:00+02:00`), ISO 8601 without a
/// zone (`2025-11-26T07:30:00`) and a plain date (`2025-11-26`, midnight UTC).
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(start_of_day_utc)
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Normalize a batch of raw samples, dropping unusable ones
#[must_use]
pub fn normalize_samples(raw: &[RawMetricSample]) -> Vec<MetricSample> {
    let samples: Vec<MetricSample> = raw.iter().filter_map(RawMetricSample::normalize).collect();

    let dropped = raw.len() - samples.len();
    if dropped > 0 {
        debug!(
            dropped,
            total = raw.len(),
            "Dropped raw samples with malformed timestamp or non-numeric value"
        );
    }

    samples
}
