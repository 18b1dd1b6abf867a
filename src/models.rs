// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Response shapes of the REST API. All types derive `Serialize` and
//! `ToSchema` for JSON handling and OpenAPI documentation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::GET_CONSENT_DOCUMENT_SUCCESS;
use crate::consent::{ConsentAccessError, DocumentPayload, DocumentStorageError};

/// A signed consent document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ConsentDocumentResponse {
    /// Media type of the document, e.g. `application/pdf`.
    #[serde(rename = "type")]
    pub media_type: String,
    /// Document content exactly as stored. Producers store documents in an
    /// already text-safe encoding.
    pub content: String,
    /// Outcome message.
    pub message: String,
}

impl TryFrom<DocumentPayload> for ConsentDocumentResponse {
    type Error = ConsentAccessError;

    /// Fails with `Corrupted` when the stored bytes are not valid UTF-8.
    fn try_from(payload: DocumentPayload) -> Result<Self, Self::Error> {
        let content = String::from_utf8(payload.content).map_err(|e| {
            tracing::error!(
                valid_up_to = e.utf8_error().valid_up_to(),
                "Stored consent document is not valid UTF-8"
            );
            ConsentAccessError::from(DocumentStorageError::Corrupted)
        })?;

        Ok(Self {
            media_type: payload.media_type,
            content,
            message: GET_CONSENT_DOCUMENT_SUCCESS.to_string(),
        })
    }
}
