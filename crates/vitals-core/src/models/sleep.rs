// ABOUTME: Sleep interval records and the per-day sleep sessions reduced from them
// ABOUTME: Sessions are the already-reduced daily input for quarterly sleep statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::sleep::SECONDS_PER_MINUTE;

/// Stage reported for one sleep interval
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepStage {
    /// In bed, not necessarily asleep
    InBed,
    /// Awake during the night
    Awake,
    /// Asleep, stage unspecified
    Asleep,
    /// Core (light) sleep
    Core,
    /// Deep sleep
    Deep,
    /// REM sleep
    Rem,
}

impl SleepStage {
    /// Whether time in this stage counts as sleep
    #[must_use]
    pub const fn is_asleep(self) -> bool {
        matches!(self, Self::Asleep | Self::Core | Self::Deep | Self::Rem)
    }
}

/// One contiguous interval from a sleep tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepIntervalRecord {
    /// Interval start
    pub start: DateTime<Utc>,
    /// Interval end
    pub end: DateTime<Utc>,
    /// Stage for the whole interval
    pub stage: SleepStage,
}

impl SleepIntervalRecord {
    /// Interval length in minutes, zero for inverted intervals
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: interval lengths are far below 2^52 seconds
    pub fn duration_minutes(&self) -> f64 {
        let seconds = (self.end - self.start).num_seconds().max(0);
        seconds as f64 / SECONDS_PER_MINUTE
    }
}

/// One night of sleep attributed to the UTC date it ended on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSession {
    /// Date the session ended (wake-up day)
    pub date: NaiveDate,
    /// Minutes asleep
    pub sleep_duration: f64,
    /// Minutes asleep as a percentage of minutes in bed (0-100)
    pub efficiency: f64,
    /// Minutes per stage
    #[serde(default)]
    pub stage_breakdown: BTreeMap<SleepStage, f64>,
}
