// ABOUTME: Environment-only configuration for tiers, retention, storage access and logging
// ABOUTME: Unparseable values fall back to defaults; tier sizes are validated after loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use vitals_core::constants::storage::{DEFAULT_LIST_CONCURRENCY, DEFAULT_RETENTION_MAX_AGE_DAYS};
use vitals_core::constants::tiers::{
    DEFAULT_DAILY_DAYS, DEFAULT_MONTHLY_DAYS, DEFAULT_WEEKLY_DAYS,
};
use vitals_core::{AppError, AppResult};
use vitals_intelligence::TierConfig;

use crate::logging::LoggingConfig;

/// Complete engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tier sizes for context building
    pub tiers: TierConfig,
    /// Retention of stored objects
    pub retention: RetentionConfig,
    /// Storage access settings
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load and validate configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a tier size is zero or the retention age
    /// is negative or out of range
    pub fn from_env() -> AppResult<Self> {
        let config = Self::from_env_unvalidated();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment, leaving validation to the caller
    ///
    /// Lets a caller apply overrides (command-line flags) before validating.
    #[must_use]
    pub fn from_env_unvalidated() -> Self {
        Self {
            tiers: tiers_from_env(),
            retention: RetentionConfig::from_env(),
            storage: StorageConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }

    /// Check tier sizes and the retention age
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        self.tiers.validate()?;
        self.retention.max_age()?;
        Ok(())
    }
}

/// Tier sizes from `VITALS_TIER_DAILY_DAYS`, `VITALS_TIER_WEEKLY_DAYS` and `VITALS_TIER_MONTHLY_DAYS`
#[must_use]
pub fn tiers_from_env() -> TierConfig {
    TierConfig {
        daily_days: env_or("VITALS_TIER_DAILY_DAYS", DEFAULT_DAILY_DAYS),
        weekly_days: env_or("VITALS_TIER_WEEKLY_DAYS", DEFAULT_WEEKLY_DAYS),
        monthly_days: env_or("VITALS_TIER_MONTHLY_DAYS", DEFAULT_MONTHLY_DAYS),
    }
}

/// Retention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Age in days after which unprotected objects expire
    pub max_age_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_age_days: DEFAULT_RETENTION_MAX_AGE_DAYS,
        }
    }
}

impl RetentionConfig {
    /// Load retention configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_age_days: env_or(
                "VITALS_RETENTION_MAX_AGE_DAYS",
                DEFAULT_RETENTION_MAX_AGE_DAYS,
            ),
        }
    }

    /// Maximum age as a duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the age is negative or too large to represent
    pub fn max_age(&self) -> AppResult<Duration> {
        if self.max_age_days < 0 {
            return Err(AppError::config(format!(
                "VITALS_RETENTION_MAX_AGE_DAYS must not be negative, got {}",
                self.max_age_days
            )));
        }
        Duration::try_days(self.max_age_days).ok_or_else(|| {
            AppError::config(format!(
                "VITALS_RETENTION_MAX_AGE_DAYS is out of range: {}",
                self.max_age_days
            ))
        })
    }
}

/// Storage access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Retrievals kept in flight by `list_all`
    pub list_concurrency: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            list_concurrency: DEFAULT_LIST_CONCURRENCY,
        }
    }
}

impl StorageConfig {
    /// Load storage configuration from environment; zero falls back to the default
    #[must_use]
    pub fn from_env() -> Self {
        let list_concurrency = env_or("VITALS_STORAGE_LIST_CONCURRENCY", DEFAULT_LIST_CONCURRENCY);
        Self {
            list_concurrency: if list_concurrency == 0 {
                DEFAULT_LIST_CONCURRENCY
            } else {
                list_concurrency
            },
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
