// ABOUTME: In-memory encrypted object store used for tests, the CLI and local development
// ABOUTME: Hashes content, checks the caller's key in constant time, isolates owners, applies retention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use vitals_core::constants::storage::MEMORY_URI_SCHEME;
use vitals_core::{AppError, AppResult};

use super::retention::RetentionPolicy;
use super::{
    content_hash, EncryptedStorage, EncryptionKey, OwnerKey, RetrievedObject, StoreOptions,
    StoredObject, StoredObjectInfo,
};

#[derive(Debug, Clone)]
struct StoredEntry {
    owner: OwnerKey,
    key_fingerprint: [u8; 32],
    data: Vec<u8>,
    info: StoredObjectInfo,
}

impl StoredEntry {
    fn opens_with(&self, key: &EncryptionKey) -> bool {
        let fingerprint = key.fingerprint();
        bool::from(self.key_fingerprint.as_slice().ct_eq(fingerprint.as_slice()))
    }
}

/// In-memory object store
///
/// Data is kept in plaintext; the key is only fingerprinted so that a
/// retrieval with another key fails the way a real decryption would.
/// Listing metadata is not encrypted and is returned regardless of the key.
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl InMemoryObjectStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with an explicit upload instant
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the data type tag is empty
    pub async fn store_at(
        &self,
        data: &[u8],
        owner: &OwnerKey,
        key: &EncryptionKey,
        options: StoreOptions,
        uploaded_at: DateTime<Utc>,
    ) -> AppResult<StoredObject> {
        if options.data_type.is_empty() {
            return Err(AppError::invalid_input("Stored objects need a data type"));
        }

        let uri = format!("{MEMORY_URI_SCHEME}{}", Uuid::new_v4());
        let hash = content_hash(data);
        let entry = StoredEntry {
            owner: owner.clone(),
            key_fingerprint: key.fingerprint(),
            data: data.to_vec(),
            info: StoredObjectInfo {
                uri: uri.clone(),
                data_type: options.data_type,
                metadata: options.metadata,
                uploaded_at,
            },
        };

        self.objects.write().await.insert(uri.clone(), entry);
        debug!(%uri, bytes = data.len(), "Stored object in memory");

        Ok(StoredObject {
            uri,
            content_hash: hash,
        })
    }

    /// Number of objects across all owners
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether no object is stored
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Delete every object the policy selects as expired, returning how many were removed
    pub async fn apply_retention(&self, policy: &RetentionPolicy, now: DateTime<Utc>) -> usize {
        let mut objects = self.objects.write().await;
        let infos: Vec<StoredObjectInfo> =
            objects.values().map(|entry| entry.info.clone()).collect();
        let expired: Vec<String> = policy
            .select_expired(&infos, now)
            .into_iter()
            .map(|info| info.uri.clone())
            .collect();

        for uri in &expired {
            objects.remove(uri);
        }
        drop(objects);

        if !expired.is_empty() {
            debug!(removed = expired.len(), "Applied retention policy");
        }
        expired.len()
    }
}

#[async_trait]
impl EncryptedStorage for InMemoryObjectStore {
    async fn store(
        &self,
        data: &[u8],
        owner: &OwnerKey,
        key: &EncryptionKey,
        options: StoreOptions,
    ) -> AppResult<StoredObject> {
        self.store_at(data, owner, key, options, Utc::now()).await
    }

    async fn retrieve(&self, uri: &str, key: &EncryptionKey) -> AppResult<RetrievedObject> {
        let objects = self.objects.read().await;
        let entry = objects
            .get(uri)
            .ok_or_else(|| AppError::not_found(format!("Object {uri}")))?;

        if !entry.opens_with(key) {
            return Err(AppError::decryption_failed(format!(
                "Key does not match object {uri}"
            )));
        }

        Ok(RetrievedObject {
            data: entry.data.clone(),
        })
    }

    async fn list(
        &self,
        owner: &OwnerKey,
        _key: &EncryptionKey,
        data_type: Option<&str>,
    ) -> AppResult<Vec<StoredObjectInfo>> {
        let objects = self.objects.read().await;
        let mut infos: Vec<StoredObjectInfo> = objects
            .values()
            .filter(|entry| &entry.owner == owner)
            .filter(|entry| data_type.is_none_or(|wanted| entry.info.data_type == wanted))
            .map(|entry| entry.info.clone())
            .collect();
        drop(objects);

        infos.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then_with(|| a.uri.cmp(&b.uri)));
        Ok(infos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_hashes_content() -> AppResult<()> {
        let store = InMemoryObjectStore::new();
        let stored = store
            .store(
                b"abc",
                &OwnerKey::new("owner"),
                &EncryptionKey::new(vec![1_u8; 32]),
                StoreOptions {
                    data_type: "note".to_owned(),
                    ..StoreOptions::default()
                },
            )
            .await?;

        assert!(stored.uri.starts_with(MEMORY_URI_SCHEME));
        assert_eq!(
            stored.content_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_data_type_rejected() {
        let store = InMemoryObjectStore::new();
        let result = store
            .store(
                b"abc",
                &OwnerKey::new("owner"),
                &EncryptionKey::new(vec![1_u8; 32]),
                StoreOptions::default(),
            )
            .await;
        assert!(result.is_err());
        assert!(store.is_empty().await);
    }
}
