// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Failure kinds of a consent document fetch.
//!
//! Every failure leaving [`ConsentDocumentResolver`](super::ConsentDocumentResolver)
//! is exactly one of these. Transport mapping lives in the API layer.

/// Why the stored document bytes could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStorageError {
    /// No object at the expected key although the record is consistent
    #[error("consent document is missing from storage")]
    Missing,
    /// Object content failed verification
    #[error("consent document failed integrity verification")]
    Corrupted,
    /// Backing store could not be reached or read
    #[error("document storage is unavailable")]
    Unavailable,
    /// Fetch did not complete before the deadline
    #[error("document storage did not respond in time")]
    Timeout,
}

impl DocumentStorageError {
    /// Transient failures may succeed if the caller retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DocumentStorageError::Unavailable | DocumentStorageError::Timeout
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsentAccessError {
    #[error("consent record {consent_id} not found")]
    RecordNotFound { consent_id: String },

    /// Record exists but its participant-study or site linkage is broken.
    #[error("consent data is not available for {consent_id}")]
    ConsentDataUnavailable { consent_id: String },

    /// Carries nothing about the record on purpose: callers without a grant
    /// learn only that access was refused.
    #[error("site permission access denied")]
    SitePermissionAccessDenied,

    #[error(transparent)]
    DocumentStorage(#[from] DocumentStorageError),
}

impl ConsentAccessError {
    /// Stable, machine-readable identifier of the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsentAccessError::RecordNotFound { .. } => "consent_not_found",
            ConsentAccessError::ConsentDataUnavailable { .. } => "consent_data_not_available",
            ConsentAccessError::SitePermissionAccessDenied => "site_permission_access_denied",
            ConsentAccessError::DocumentStorage(e) if e.is_retryable() => {
                "document_storage_unavailable"
            }
            ConsentAccessError::DocumentStorage(_) => "document_storage_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ConsentAccessError::DocumentStorage(e) => e.is_retryable(),
            _ => false,
        }
    }
}
