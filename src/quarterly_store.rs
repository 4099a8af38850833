// ABOUTME: Persists and loads immutable per-quarter health aggregates through the storage collaborator
// ABOUTME: Linear scan over the owner's quarterly records; list_all retrieves with bounded concurrency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use vitals_core::constants::storage::{
    DEFAULT_LIST_CONCURRENCY, METADATA_QUARTER, METADATA_YEAR, QUARTERLY_AGGREGATE_DATA_TYPE,
};
use vitals_core::models::{Metadata, Quarter, QuarterlyHealthAggregate};
use vitals_core::AppResult;

use crate::config::StorageConfig;
use crate::storage::{
    EncryptedStorage, EncryptionKey, OwnerKey, StoreOptions, StoredObject, StoredObjectInfo,
};

/// Quarterly aggregate store over an encrypted storage backend
///
/// Record counts are small (four per year), so `load` scans every quarterly
/// record of the owner. Keys are never logged.
pub struct QuarterlyAggregateStore<S> {
    storage: S,
    list_concurrency: usize,
}

impl<S: EncryptedStorage> QuarterlyAggregateStore<S> {
    /// Store with default settings
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            list_concurrency: DEFAULT_LIST_CONCURRENCY,
        }
    }

    /// Store with settings from configuration
    #[must_use]
    pub fn with_config(storage: S, config: &StorageConfig) -> Self {
        Self {
            storage,
            list_concurrency: config.list_concurrency.max(1),
        }
    }

    /// Underlying storage backend
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize and persist `aggregate` for `owner`
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if encoding fails, otherwise the backend's error unchanged
    #[instrument(skip_all, fields(quarter = aggregate.quarter, year = aggregate.year))]
    pub async fn store(
        &self,
        aggregate: &QuarterlyHealthAggregate,
        owner: &OwnerKey,
        key: &EncryptionKey,
    ) -> AppResult<StoredObject> {
        let data = serde_json::to_vec(aggregate)?;

        let mut metadata = Metadata::new();
        metadata.insert(METADATA_QUARTER.to_owned(), json!(aggregate.quarter));
        metadata.insert(METADATA_YEAR.to_owned(), json!(aggregate.year));

        let stored = self
            .storage
            .store(
                &data,
                owner,
                key,
                StoreOptions {
                    data_type: QUARTERLY_AGGREGATE_DATA_TYPE.to_owned(),
                    metadata,
                },
            )
            .await?;

        info!(uri = %stored.uri, bytes = data.len(), "Stored quarterly aggregate");
        Ok(stored)
    }

    /// Load the aggregate of quarter `quarter` of `year`, if one was stored
    ///
    /// Listing entries whose metadata names another quarter are skipped
    /// without retrieval; the rest are retrieved one at a time until a decoded
    /// aggregate matches.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a quarter outside 1-4, `SerializationError`
    /// for an undecodable record, otherwise the backend's error unchanged
    #[instrument(skip(self, owner, key))]
    pub async fn load(
        &self,
        quarter: u8,
        year: i32,
        owner: &OwnerKey,
        key: &EncryptionKey,
    ) -> AppResult<Option<QuarterlyHealthAggregate>> {
        let wanted = Quarter::new(year, quarter)?;
        let entries = self
            .storage
            .list(owner, key, Some(QUARTERLY_AGGREGATE_DATA_TYPE))
            .await?;

        for entry in entries.iter().filter(|entry| may_hold(entry, wanted)) {
            let aggregate = self.fetch(entry, key).await?;
            if aggregate.is_for(wanted) {
                info!(uri = %entry.uri, "Loaded quarterly aggregate");
                return Ok(Some(aggregate));
            }
        }

        debug!(scanned = entries.len(), "No stored aggregate for quarter");
        Ok(None)
    }

    /// Whether an aggregate for quarter `quarter` of `year` was stored
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]
    pub async fn exists(
        &self,
        quarter: u8,
        year: i32,
        owner: &OwnerKey,
        key: &EncryptionKey,
    ) -> AppResult<bool> {
        Ok(self.load(quarter, year, owner, key).await?.is_some())
    }

    /// Every stored aggregate of `owner`, sorted by year then quarter
    ///
    /// # Errors
    ///
    /// Fails on the first retrieval or decode error
    #[instrument(skip_all)]
    pub async fn list_all(
        &self,
        owner: &OwnerKey,
        key: &EncryptionKey,
    ) -> AppResult<Vec<QuarterlyHealthAggregate>> {
        let entries = self
            .storage
            .list(owner, key, Some(QUARTERLY_AGGREGATE_DATA_TYPE))
            .await?;

        let mut aggregates: Vec<QuarterlyHealthAggregate> = stream::iter(entries.iter())
            .map(|entry| self.fetch(entry, key))
            .buffered(self.list_concurrency)
            .try_collect()
            .await?;

        aggregates.sort_by_key(|aggregate| (aggregate.year, aggregate.quarter));
        debug!(count = aggregates.len(), "Listed quarterly aggregates");
        Ok(aggregates)
    }

    async fn fetch(
        &self,
        entry: &StoredObjectInfo,
        key: &EncryptionKey,
    ) -> AppResult<QuarterlyHealthAggregate> {
        let object = self.storage.retrieve(&entry.uri, key).await?;
        Ok(serde_json::from_slice(&object.data)?)
    }
}

/// False only when the listing metadata positively names another quarter
fn may_hold(entry: &StoredObjectInfo, wanted: Quarter) -> bool {
    let quarter = entry.metadata.get(METADATA_QUARTER).and_then(Value::as_u64);
    let year = entry.metadata.get(METADATA_YEAR).and_then(Value::as_i64);
    quarter.is_none_or(|quarter| quarter == u64::from(wanted.number()))
        && year.is_none_or(|year| year == i64::from(wanted.year()))
}
