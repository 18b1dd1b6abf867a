// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent document resolution.
//!
//! ## Pipeline
//!
//! 1. Look up the consent record (`RecordNotFound`)
//! 2. Require a participant-study link (`ConsentDataUnavailable`)
//! 3. Require the link's site (`ConsentDataUnavailable`)
//! 4. Check the user's grant on that site (`SitePermissionAccessDenied`)
//! 5. Derive the object key `documents/<document_path>`
//! 6. Fetch from the blob store under the fetch deadline (`DocumentStorage`)
//!
//! The first failing step decides the error. Structural checks run before
//! the permission check, so a broken record always reports
//! `ConsentDataUnavailable` regardless of who asks.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, DOCUMENT_KEY_PREFIX};
use crate::storage::{is_valid_object_key, BlobError, BlobStore};

use super::error::{ConsentAccessError, DocumentStorageError};
use super::gate::SitePermissionGate;
use super::lookup::{ConsentRecordLookup, LookupError};
use super::model::{ConsentRecord, DocumentPayload};

/// Where documents live and how long a fetch may take.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub document_bucket: String,
    pub blob_fetch_timeout: Duration,
}

impl From<&AppConfig> for ResolverSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            document_bucket: config.document_bucket.clone(),
            blob_fetch_timeout: config.blob_fetch_timeout,
        }
    }
}

/// Object key of a record's document, or `None` if the record's path is
/// unusable.
pub fn document_key(record: &ConsentRecord) -> Option<String> {
    let path = record.document_path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    let key = format!("{DOCUMENT_KEY_PREFIX}/{path}");
    is_valid_object_key(&key).then_some(key)
}

/// Guarded lookup-and-fetch of consent documents.
///
/// Holds no mutable state; one instance may serve any number of concurrent
/// calls.
pub struct ConsentDocumentResolver<L, G> {
    records: L,
    gate: G,
    blobs: Arc<dyn BlobStore>,
    settings: ResolverSettings,
}

impl<L, G> ConsentDocumentResolver<L, G>
where
    L: ConsentRecordLookup,
    G: SitePermissionGate,
{
    pub fn new(records: L, gate: G, blobs: Arc<dyn BlobStore>, settings: ResolverSettings) -> Self {
        Self {
            records,
            gate,
            blobs,
            settings,
        }
    }

    /// Fetch the signed consent document `consent_id` on behalf of `user_id`.
    pub async fn fetch_consent_document(
        &self,
        consent_id: &str,
        user_id: &str,
    ) -> Result<DocumentPayload, ConsentAccessError> {
        let resolved = match self.records.resolve(consent_id) {
            Ok(resolved) => resolved,
            Err(LookupError::NotFound) => {
                return Err(ConsentAccessError::RecordNotFound {
                    consent_id: consent_id.to_string(),
                });
            }
            Err(LookupError::Backend(reason)) => {
                tracing::error!(consent_id, %reason, "Consent record lookup failed");
                return Err(DocumentStorageError::Unavailable.into());
            }
        };

        let unavailable = || ConsentAccessError::ConsentDataUnavailable {
            consent_id: consent_id.to_string(),
        };

        if resolved.link.is_none() {
            tracing::warn!(consent_id, "Consent record has no participant study");
            return Err(unavailable());
        }
        let Some(site) = resolved.site.as_ref() else {
            tracing::warn!(consent_id, "Consent participant study has no site");
            return Err(unavailable());
        };

        if !self.gate.authorize(user_id, &site.id).is_granted() {
            tracing::info!(consent_id, user_id, site_id = %site.id, "Site permission denied");
            return Err(ConsentAccessError::SitePermissionAccessDenied);
        }

        let Some(key) = document_key(&resolved.record) else {
            tracing::warn!(
                consent_id,
                document_path = %resolved.record.document_path,
                "Consent record has an unusable document path"
            );
            return Err(unavailable());
        };

        let bucket = self.settings.document_bucket.as_str();
        let content = match tokio::time::timeout(
            self.settings.blob_fetch_timeout,
            self.blobs.get(bucket, &key),
        )
        .await
        {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => return Err(classify_blob_error(consent_id, bucket, &key, e).into()),
            Err(_) => {
                tracing::warn!(
                    consent_id,
                    bucket,
                    key = %key,
                    timeout_ms = self.settings.blob_fetch_timeout.as_millis() as u64,
                    "Consent document fetch timed out"
                );
                return Err(DocumentStorageError::Timeout.into());
            }
        };

        tracing::debug!(consent_id, bytes = content.len(), "Consent document fetched");

        Ok(DocumentPayload {
            media_type: resolved.record.media_type,
            content,
        })
    }
}

fn classify_blob_error(
    consent_id: &str,
    bucket: &str,
    key: &str,
    error: BlobError,
) -> DocumentStorageError {
    match error {
        BlobError::NotFound { .. } => {
            // A consistent record pointing at nothing needs investigation.
            tracing::error!(consent_id, bucket, key, "Consent document missing from blob store");
            DocumentStorageError::Missing
        }
        BlobError::IntegrityViolation { .. } => {
            tracing::error!(consent_id, bucket, key, "Consent document failed integrity check");
            DocumentStorageError::Corrupted
        }
        BlobError::Unavailable(reason) => {
            tracing::warn!(consent_id, bucket, key, %reason, "Blob store unavailable");
            DocumentStorageError::Unavailable
        }
    }
}
