// ABOUTME: Encrypted object storage collaborator contract used to persist quarterly aggregates
// ABOUTME: Pluggable backend trait plus owner/key newtypes; the in-memory backend lives in memory.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory object store implementation
pub mod memory;
/// Age-based retention that never prunes quarterly aggregates
pub mod retention;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vitals_core::models::Metadata;
use vitals_core::AppResult;
use zeroize::Zeroizing;

/// Storage collaborator trait for pluggable encrypted object stores
///
/// The engine treats implementations as a key-value store keyed by opaque
/// URIs. Encryption and decryption are the implementation's responsibility;
/// errors are propagated to callers unchanged.
#[async_trait]
pub trait EncryptedStorage: Send + Sync {
    /// Store `data` for `owner`, encrypted under `key`
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the write fails
    async fn store(
        &self,
        data: &[u8],
        owner: &OwnerKey,
        key: &EncryptionKey,
        options: StoreOptions,
    ) -> AppResult<StoredObject>;

    /// Retrieve and decrypt the object at `uri`
    ///
    /// # Errors
    ///
    /// Returns an error when the object is missing or `key` cannot decrypt it
    async fn retrieve(&self, uri: &str, key: &EncryptionKey) -> AppResult<RetrievedObject>;

    /// List the objects of `owner`, optionally restricted to one data type
    ///
    /// # Errors
    ///
    /// Returns the backend's error when listing fails
    async fn list(
        &self,
        owner: &OwnerKey,
        key: &EncryptionKey,
        data_type: Option<&str>,
    ) -> AppResult<Vec<StoredObjectInfo>>;
}

/// Identifier of the owner of stored objects (a wallet address, user id, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerKey(String);

impl OwnerKey {
    /// Wrap an owner identifier
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }

    /// Owner identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symmetric key material handed to the storage collaborator
///
/// Zeroed on drop and never printed.
#[derive(Clone)]
pub struct EncryptionKey(Zeroizing<Vec<u8>>);

impl EncryptionKey {
    /// Wrap raw key bytes
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Raw key bytes
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// SHA-256 of the key, used by backends to recognise the key without keeping it
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        Sha256::digest(self.expose()).into()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

/// Record type tag and searchable metadata of a stored object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOptions {
    /// Record type tag used for list filtering
    pub data_type: String,
    /// Plain metadata returned by `list`
    pub metadata: Metadata,
}

/// Reference to a freshly stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    /// Opaque object reference
    pub uri: String,
    /// Hex-encoded SHA-256 of the stored bytes
    pub content_hash: String,
}

/// Decrypted object contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedObject {
    /// Plaintext bytes
    pub data: Vec<u8>,
}

/// Listing entry of a stored object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObjectInfo {
    /// Opaque object reference
    pub uri: String,
    /// Record type tag
    pub data_type: String,
    /// Metadata supplied at store time
    pub metadata: Metadata,
    /// Upload instant
    pub uploaded_at: DateTime<Utc>,
}

/// Hex-encoded SHA-256 digest of `data`
#[must_use]
pub fn content_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
