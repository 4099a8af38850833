// ABOUTME: Default sleep-session collaborator reducing tracker interval records to one session per day
// ABOUTME: Computes minutes asleep, efficiency against time in bed, and a per-stage breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::NaiveDate;
use vitals_core::constants::sleep::MAX_EFFICIENCY_PERCENT;
use vitals_core::models::{SleepIntervalRecord, SleepSession, SleepStage};

/// Sleep session reducer
pub struct SleepSessionReducer;

impl SleepSessionReducer {
    /// Reduce interval records to per-day sessions, sorted by date
    ///
    /// Intervals are attributed to the UTC date they end on, so a night that
    /// crosses midnight counts for the wake-up day. Time in bed comes from
    /// explicit `InBed` intervals when present, otherwise from the span between
    /// the earliest start and the latest end of that day's intervals. Days
    /// without any asleep time produce no session.
    #[must_use]
    pub fn reduce(records: &[SleepIntervalRecord]) -> Vec<SleepSession> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&SleepIntervalRecord>> = BTreeMap::new();
        for record in records {
            by_date
                .entry(record.end.date_naive())
                .or_default()
                .push(record);
        }

        by_date
            .into_iter()
            .filter_map(|(date, intervals)| Self::reduce_day(date, &intervals))
            .collect()
    }

    fn reduce_day(date: NaiveDate, intervals: &[&SleepIntervalRecord]) -> Option<SleepSession> {
        let mut stage_breakdown: BTreeMap<SleepStage, f64> = BTreeMap::new();
        for interval in intervals {
            *stage_breakdown.entry(interval.stage).or_insert(0.0) += interval.duration_minutes();
        }

        let asleep: f64 = stage_breakdown
            .iter()
            .filter(|(stage, _)| stage.is_asleep())
            .map(|(_, minutes)| minutes)
            .sum();
        if asleep <= 0.0 {
            return None;
        }

        let explicit_in_bed = stage_breakdown
            .get(&SleepStage::InBed)
            .copied()
            .unwrap_or(0.0);
        let in_bed = if explicit_in_bed > 0.0 {
            explicit_in_bed
        } else {
            let start = intervals.iter().map(|interval| interval.start).min()?;
            let end = intervals.iter().map(|interval| interval.end).max()?;
            SleepIntervalRecord {
                start,
                end,
                stage: SleepStage::InBed,
            }
            .duration_minutes()
        };

        let efficiency = if in_bed > 0.0 {
            (asleep / in_bed * 100.0).clamp(0.0, MAX_EFFICIENCY_PERCENT)
        } else {
            0.0
        };

        Some(SleepSession {
            date,
            sleep_duration: asleep,
            efficiency,
            stage_breakdown,
        })
    }
}
