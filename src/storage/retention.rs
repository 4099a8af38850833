// ABOUTME: Age-based retention policy for stored objects with protected record types
// ABOUTME: Quarterly aggregates are always protected so pruning never removes a snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use vitals_core::constants::storage::{
    DEFAULT_RETENTION_MAX_AGE_DAYS, QUARTERLY_AGGREGATE_DATA_TYPE,
};
use vitals_core::AppResult;

use super::StoredObjectInfo;
use crate::config::RetentionConfig;

/// Retention policy
///
/// Fields are private so the quarterly aggregate type can never be removed
/// from the protected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    max_age: Duration,
    protected_types: BTreeSet<String>,
}

impl RetentionPolicy {
    /// Policy expiring unprotected objects older than `max_age`
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            protected_types: BTreeSet::from([QUARTERLY_AGGREGATE_DATA_TYPE.to_owned()]),
        }
    }

    /// Policy from environment-derived configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the maximum age is negative or not
    /// representable as a duration
    pub fn from_config(config: &RetentionConfig) -> AppResult<Self> {
        Ok(Self::new(config.max_age()?))
    }

    /// Also protect `data_type` from age-based expiry
    #[must_use]
    pub fn with_protected_type(mut self, data_type: impl Into<String>) -> Self {
        self.protected_types.insert(data_type.into());
        self
    }

    /// Maximum age of unprotected objects
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether `data_type` is exempt from expiry
    #[must_use]
    pub fn is_protected(&self, data_type: &str) -> bool {
        data_type == QUARTERLY_AGGREGATE_DATA_TYPE || self.protected_types.contains(data_type)
    }

    /// Whether the object should be kept at `now`
    #[must_use]
    pub fn should_retain(&self, info: &StoredObjectInfo, now: DateTime<Utc>) -> bool {
        self.is_protected(&info.data_type) || now - info.uploaded_at <= self.max_age
    }

    /// Objects the policy would delete at `now`
    #[must_use]
    pub fn select_expired<'a>(
        &self,
        infos: &'a [StoredObjectInfo],
        now: DateTime<Utc>,
    ) -> Vec<&'a StoredObjectInfo> {
        infos
            .iter()
            .filter(|info| !self.should_retain(info, now))
            .collect()
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_RETENTION_MAX_AGE_DAYS))
    }
}
