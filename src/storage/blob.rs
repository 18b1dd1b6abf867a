// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blob store port and adapters.
//!
//! The consent pipeline only ever reads objects by `(bucket, key)`. Two
//! adapters are provided:
//!
//! - [`FsBlobStore`] keeps objects under `<data>/blobs/<bucket>/<key>` with an
//!   optional `<key>.sha256` sidecar that is verified on every read
//! - [`InMemoryBlobStore`] keeps objects in a map, for tests and local runs

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{FileStorage, StorageError};
use crate::storage::paths::is_safe_segment;

/// Suffix of the digest sidecar stored next to each object.
const DIGEST_SUFFIX: &str = "sha256";

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Blob store unavailable: {0}")]
    Unavailable(String),

    #[error("Blob content does not match its digest: {bucket}/{key}")]
    IntegrityViolation { bucket: String, key: String },
}

impl BlobError {
    fn not_found(bucket: &str, key: &str) -> Self {
        BlobError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }
}

/// Read access to content stored by bucket and key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the full content of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError>;
}

/// Hex-encoded SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `key` can name an object in any adapter.
pub fn is_valid_object_key(key: &str) -> bool {
    key_to_relative_path(key).is_some()
}

/// Validate an object key and turn it into a relative path.
///
/// Keys are `/`-separated; empty, `.` and `..` segments are refused, and so
/// are keys that would collide with a digest sidecar.
fn key_to_relative_path(key: &str) -> Option<PathBuf> {
    if key.is_empty() || key.starts_with('/') || is_digest_sidecar(key) {
        return None;
    }
    let mut path = PathBuf::new();
    for segment in key.split('/') {
        if !is_safe_segment(segment) {
            return None;
        }
        path.push(segment);
    }
    debug_assert!(path.components().all(|c| matches!(c, Component::Normal(_))));
    Some(path)
}

fn is_digest_sidecar(key: &str) -> bool {
    key.rsplit_once('.')
        .is_some_and(|(_, extension)| extension.eq_ignore_ascii_case(DIGEST_SUFFIX))
}

fn with_digest_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(DIGEST_SUFFIX);
    PathBuf::from(name)
}

/// Blob store backed by the data directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    storage: FileStorage,
}

impl FsBlobStore {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        if !is_safe_segment(bucket) {
            return None;
        }
        let relative = key_to_relative_path(key)?;
        Some(self.storage.paths().bucket_dir(bucket).join(relative))
    }

    /// Store an object together with its digest sidecar.
    pub fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), BlobError> {
        let path = self
            .object_path(bucket, key)
            .ok_or_else(|| BlobError::Unavailable(format!("invalid object key {bucket}/{key}")))?;

        self.storage
            .write_raw(&path, data)
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;
        self.storage
            .write_raw(with_digest_suffix(&path), sha256_hex(data).as_bytes())
            .map_err(|e| BlobError::Unavailable(e.to_string()))
    }

    fn read_verified(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let path = self
            .object_path(bucket, key)
            .ok_or_else(|| BlobError::not_found(bucket, key))?;

        let data = self.storage.read_raw(&path).map_err(|e| match e {
            StorageError::NotFound(_) => BlobError::not_found(bucket, key),
            other => BlobError::Unavailable(other.to_string()),
        })?;

        match self.storage.read_raw(with_digest_suffix(&path)) {
            Ok(expected) => {
                let expected = String::from_utf8_lossy(&expected);
                if expected.trim() != sha256_hex(&data) {
                    return Err(BlobError::IntegrityViolation {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
            }
            // Objects written without a sidecar are served unverified.
            Err(StorageError::NotFound(_)) => {}
            Err(other) => return Err(BlobError::Unavailable(other.to_string())),
        }

        Ok(data)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let store = self.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || store.read_verified(&bucket, &key))
            .await
            .map_err(|e| BlobError::Unavailable(format!("blob read task failed: {e}")))?
    }
}

/// Blob store kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) {
        let mut objects = self
            .objects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects.insert((bucket.to_string(), key.to_string()), data.into());
    }

    pub fn remove(&self, bucket: &str, key: &str) {
        let mut objects = self
            .objects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects.remove(&(bucket.to_string(), key.to_string()));
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| BlobError::Unavailable("in-memory blob store lock poisoned".into()))?;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| BlobError::not_found(bucket, key))
    }
}
