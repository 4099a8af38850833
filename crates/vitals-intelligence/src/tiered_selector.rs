// ABOUTME: Partitions a daily series into recent (daily), middle (weekly) and historical (monthly) tiers
// ABOUTME: Output size is bounded by the tier configuration regardless of input volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tiered resolution selection
//!
//! Tiers are anchored to the number of days *with data*, counted back from the
//! newest day present, never to today's date. Gaps in history therefore do not
//! shift which days land in which tier.
//!
//! ```text
//!  oldest ................................................ newest
//!  | dropped | historical (months) | middle (weeks) | recent (days) |
//!            |<--- monthly_days -->|<-- weekly_days ->|<- daily_days ->|
//! ```
//!
//! The middle tier keeps at most `ceil(weekly_days / 7)` weeks and the
//! historical tier at most `ceil(monthly_days / 30)` months, so the output
//! never exceeds [`TierConfig::max_entries`]. Days of weeks beyond the weekly
//! cap move into the historical pool; months beyond the monthly cap are dropped.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitals_core::constants::tiers::{
    DAYS_PER_WEEK, DEFAULT_DAILY_DAYS, DEFAULT_MONTHLY_DAYS, DEFAULT_WEEKLY_DAYS,
    NOMINAL_DAYS_PER_MONTH,
};
use vitals_core::models::calendar::{month_end, month_start, week_end, week_start};
use vitals_core::models::{AggregatedPeriod, DailySeries, DailyValue, PeriodType};
use vitals_core::{AppError, AppResult, MetricKind};

use crate::period_aggregator::PeriodAggregator;

/// Sizes of the three resolution tiers, in days with data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierConfig {
    /// Trailing days kept at daily resolution
    pub daily_days: usize,
    /// Following days reduced to weekly resolution
    pub weekly_days: usize,
    /// Following days reduced to monthly resolution
    pub monthly_days: usize,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            daily_days: DEFAULT_DAILY_DAYS,
            weekly_days: DEFAULT_WEEKLY_DAYS,
            monthly_days: DEFAULT_MONTHLY_DAYS,
        }
    }
}

impl TierConfig {
    /// Most weekly entries the middle tier may emit
    #[must_use]
    pub const fn max_weekly_buckets(&self) -> usize {
        self.weekly_days.div_ceil(DAYS_PER_WEEK)
    }

    /// Most monthly entries the historical tier may emit
    #[must_use]
    pub const fn max_monthly_buckets(&self) -> usize {
        self.monthly_days.div_ceil(NOMINAL_DAYS_PER_MONTH)
    }

    /// Upper bound on the selector's output length
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.daily_days + self.max_weekly_buckets() + self.max_monthly_buckets()
    }

    /// Reject tier sizes of zero
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the first empty tier
    pub fn validate(&self) -> AppResult<()> {
        for (name, days) in [
            ("daily_days", self.daily_days),
            ("weekly_days", self.weekly_days),
            ("monthly_days", self.monthly_days),
        ] {
            if days == 0 {
                return Err(AppError::config(format!("Tier size {name} must be positive")));
            }
        }
        Ok(())
    }
}

type Buckets<'a> = BTreeMap<NaiveDate, Vec<&'a DailyValue>>;

/// Tiered resolution selector
pub struct TieredResolutionSelector;

impl TieredResolutionSelector {
    /// Mix daily, weekly and monthly entries into one ascending sequence
    ///
    /// Entries never overlap: each entry starts after the previous one ends.
    /// An empty series yields an empty sequence.
    #[must_use]
    pub fn select(
        series: &DailySeries,
        config: &TierConfig,
        kind: MetricKind,
    ) -> Vec<AggregatedPeriod> {
        let days: Vec<&DailyValue> = series.values().collect();

        let (older, recent) = days.split_at(days.len().saturating_sub(config.daily_days));
        let (historical_pool, middle) =
            older.split_at(older.len().saturating_sub(config.weekly_days));
        let (beyond_horizon, historical) =
            historical_pool.split_at(historical_pool.len().saturating_sub(config.monthly_days));

        let mut weeks = group_days(middle, week_start);
        let mut historical: Vec<&DailyValue> = historical.to_vec();
        while weeks.len() > config.max_weekly_buckets() {
            if let Some((_, spilled)) = weeks.pop_first() {
                historical.extend(spilled);
            }
        }

        let mut months = group_days(&historical, month_start);
        let mut dropped_months = 0_usize;
        while months.len() > config.max_monthly_buckets() {
            months.pop_first();
            dropped_months += 1;
        }

        if !beyond_horizon.is_empty() || dropped_months > 0 {
            debug!(
                dropped_days = beyond_horizon.len(),
                dropped_months, "Dropped history beyond the monthly tier horizon"
            );
        }

        let mut entries: Vec<AggregatedPeriod> =
            Vec::with_capacity(recent.len() + weeks.len() + months.len());
        entries.extend(months.iter().filter_map(|(start, days)| {
            PeriodAggregator::aggregate(
                PeriodType::Monthly,
                *start,
                month_end(*start),
                days.iter().copied(),
                kind,
            )
        }));
        entries.extend(weeks.iter().filter_map(|(start, days)| {
            PeriodAggregator::aggregate(
                PeriodType::Weekly,
                *start,
                week_end(*start),
                days.iter().copied(),
                kind,
            )
        }));
        entries.extend(recent.iter().map(|day| AggregatedPeriod::from_daily(day)));

        entries.sort_by_key(|entry| entry.start_date);

        debug!(
            days_present = days.len(),
            recent = recent.len(),
            weekly = weeks.len(),
            monthly = months.len(),
            "Selected tiered resolutions"
        );

        entries
    }
}

fn group_days<'a>(days: &[&'a DailyValue], boundary: fn(NaiveDate) -> NaiveDate) -> Buckets<'a> {
    let mut buckets: Buckets<'a> = BTreeMap::new();
    for day in days {
        buckets.entry(boundary(day.date)).or_default().push(day);
    }
    buckets
}
