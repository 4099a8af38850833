// ABOUTME: Fixed partition of health metric identifiers into cumulative and status metrics
// ABOUTME: Pure membership test plus a typed enumeration of the tracked metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::metrics::{
    ACTIVE_ENERGY_BURNED, APPLE_EXERCISE_TIME, CUMULATIVE_METRICS, DISTANCE_WALKING_RUNNING,
    FLIGHTS_CLIMBED, HEART_RATE, HEART_RATE_VARIABILITY_SDNN, RESPIRATORY_RATE,
    RESTING_HEART_RATE, STEP_COUNT,
};
use serde::{Deserialize, Serialize};

/// How readings of one metric combine within a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Readings are summed per day (steps, energy, distance, ...)
    Cumulative,
    /// Readings are averaged per day (heart rate, HRV, ...)
    Status,
}

impl MetricKind {
    /// Classify a metric identifier. Unknown identifiers are status metrics.
    #[must_use]
    pub fn classify(identifier: &str) -> Self {
        if is_cumulative(identifier) {
            Self::Cumulative
        } else {
            Self::Status
        }
    }

    /// Whether this kind sums its daily readings
    #[must_use]
    pub const fn is_cumulative(self) -> bool {
        matches!(self, Self::Cumulative)
    }
}

/// Whether readings of `identifier` are summed within a day
#[must_use]
pub fn is_cumulative(identifier: &str) -> bool {
    CUMULATIVE_METRICS.contains(&identifier)
}

/// Health metrics tracked by the quarterly aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthMetric {
    /// Step count
    Steps,
    /// Active energy burned
    ActiveEnergy,
    /// Exercise minutes
    ExerciseTime,
    /// Walking and running distance
    Distance,
    /// Flights of stairs climbed
    FlightsClimbed,
    /// Heart rate
    HeartRate,
    /// Resting heart rate
    RestingHeartRate,
    /// Heart-rate variability
    Hrv,
    /// Respiratory rate
    RespiratoryRate,
}

impl HealthMetric {
    /// Every tracked metric, cumulative ones first
    pub const ALL: [Self; 9] = [
        Self::Steps,
        Self::ActiveEnergy,
        Self::ExerciseTime,
        Self::Distance,
        Self::FlightsClimbed,
        Self::HeartRate,
        Self::RestingHeartRate,
        Self::Hrv,
        Self::RespiratoryRate,
    ];

    /// Source identifier for this metric
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Steps => STEP_COUNT,
            Self::ActiveEnergy => ACTIVE_ENERGY_BURNED,
            Self::ExerciseTime => APPLE_EXERCISE_TIME,
            Self::Distance => DISTANCE_WALKING_RUNNING,
            Self::FlightsClimbed => FLIGHTS_CLIMBED,
            Self::HeartRate => HEART_RATE,
            Self::RestingHeartRate => RESTING_HEART_RATE,
            Self::Hrv => HEART_RATE_VARIABILITY_SDNN,
            Self::RespiratoryRate => RESPIRATORY_RATE,
        }
    }

    /// Look up a tracked metric by its source identifier
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.identifier() == identifier)
    }

    /// Short key used as the metric name in quarterly aggregates
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::ActiveEnergy => "activeEnergy",
            Self::ExerciseTime => "exerciseTime",
            Self::Distance => "distance",
            Self::FlightsClimbed => "flightsClimbed",
            Self::HeartRate => "heartRate",
            Self::RestingHeartRate => "restingHeartRate",
            Self::Hrv => "hrv",
            Self::RespiratoryRate => "respiratoryRate",
        }
    }

    /// Canonical unit reported by the source
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Steps | Self::FlightsClimbed => "count",
            Self::ActiveEnergy => "kcal",
            Self::ExerciseTime => "min",
            Self::Distance => "km",
            Self::HeartRate | Self::RestingHeartRate => "count/min",
            Self::Hrv => "ms",
            Self::RespiratoryRate => "breaths/min",
        }
    }

    /// Sum-vs-average classification of this metric
    #[must_use]
    pub fn kind(self) -> MetricKind {
        MetricKind::classify(self.identifier())
    }
}

/// Metric name for an identifier: the short key when tracked, otherwise the
/// identifier itself
#[must_use]
pub fn metric_name(identifier: &str) -> String {
    HealthMetric::from_identifier(identifier)
        .map_or_else(|| identifier.to_owned(), |metric| metric.key().to_owned())
}
