// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for classification, tiering, quarterly statistics and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list. The metric identifier table lives in [`metrics`]; everything that
//! steers tier sizes and quarterly statistics has its default here so that
//! configuration loaders and tests agree on one value.

/// Metric identifiers and the cumulative-metric table
pub mod metrics;

/// Default tier sizes for the resolution selector
pub mod tiers {
    /// Trailing days kept at daily resolution
    pub const DEFAULT_DAILY_DAYS: usize = 30;
    /// Days present re-bucketed into weeks after the daily tier
    pub const DEFAULT_WEEKLY_DAYS: usize = 150;
    /// Days present re-bucketed into months after the weekly tier
    pub const DEFAULT_MONTHLY_DAYS: usize = 518;
    /// Days per weekly bucket, used for the output-size bound
    pub const DAYS_PER_WEEK: usize = 7;
    /// Nominal days per monthly bucket, used for the output-size bound
    pub const NOMINAL_DAYS_PER_MONTH: usize = 30;
}

/// Quarterly statistics constants
pub mod quarterly {
    /// Absolute change (percent) below which a trend is stable
    pub const TREND_STABLE_THRESHOLD_PERCENT: f64 = 5.0;
    /// Lower nearest-rank percentile
    pub const P25_FRACTION: f64 = 0.25;
    /// Upper nearest-rank percentile
    pub const P75_FRACTION: f64 = 0.75;
    /// Schema version written into every stored aggregate
    pub const AGGREGATE_VERSION: u32 = 1;
    /// Metric name under which the sleep summary is stored
    pub const SLEEP_METRIC_KEY: &str = "sleep";
    /// Number of quarters in a year
    pub const QUARTERS_PER_YEAR: u8 = 4;
    /// Calendar months in a quarter
    pub const MONTHS_PER_QUARTER: u32 = 3;
}

/// Storage collaborator constants
pub mod storage {
    /// Record-type tag for quarterly aggregates (never pruned)
    pub const QUARTERLY_AGGREGATE_DATA_TYPE: &str = "quarterly-aggregate";
    /// Metadata key carrying the quarter number
    pub const METADATA_QUARTER: &str = "quarter";
    /// Metadata key carrying the year
    pub const METADATA_YEAR: &str = "year";
    /// Retrievals in flight when listing every stored aggregate
    pub const DEFAULT_LIST_CONCURRENCY: usize = 4;
    /// Default age after which prunable record types expire
    pub const DEFAULT_RETENTION_MAX_AGE_DAYS: i64 = 365;
    /// URI scheme of the in-memory object store
    pub const MEMORY_URI_SCHEME: &str = "memory://";
}

/// Sleep reduction constants
pub mod sleep {
    /// Efficiency upper bound (percent)
    pub const MAX_EFFICIENCY_PERCENT: f64 = 100.0;
    /// Seconds per minute, for interval duration conversion
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Service names used in structured logging
pub mod service_names {
    /// Engine service name
    pub const VITALS_ENGINE: &str = "vitals-engine";
    /// CLI service name
    pub const VITALS_CLI: &str = "vitals-cli";
}
