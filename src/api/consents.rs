// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent document API endpoint.
//!
//! Returns the signed consent document of a participant to a user holding
//! an active permission grant on the participant's site.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    audit_log,
    auth::Auth,
    consent::ConsentAccessError,
    error::{ApiError, ErrorBody},
    models::ConsentDocumentResponse,
    state::AppState,
    storage::{AuditEvent, AuditEventType},
};

/// Get the signed consent document for a consent record.
#[utoipa::path(
    get,
    path = "/v1/consents/{consent_id}/consent-document",
    tag = "Consents",
    params(
        ("consent_id" = String, Path, description = "Consent record ID"),
        ("userId" = String, Header, description = "Acting user, set by the auth gateway")
    ),
    responses(
        (status = 200, description = "Consent document", body = ConsentDocumentResponse),
        (status = 400, description = "Consent data not available", body = ErrorBody),
        (status = 401, description = "Missing user ID", body = ErrorBody),
        (status = 403, description = "No permission on the consent's site", body = ErrorBody),
        (status = 404, description = "Consent record not found", body = ErrorBody),
        (status = 500, description = "Document missing or corrupted in storage", body = ErrorBody),
        (status = 503, description = "Document storage unavailable", body = ErrorBody)
    )
)]
pub async fn get_consent_document(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(consent_id): Path<String>,
) -> Result<Json<ConsentDocumentResponse>, ApiError> {
    let result = state
        .resolver()
        .fetch_consent_document(&consent_id, &user.user_id)
        .await
        .and_then(ConsentDocumentResponse::try_from);

    let event = match &result {
        Ok(response) => AuditEvent::new(AuditEventType::ConsentDocumentAccessed).with_details(
            serde_json::json!({
                "media_type": response.media_type,
                "bytes": response.content.len(),
            }),
        ),
        Err(ConsentAccessError::SitePermissionAccessDenied) => {
            AuditEvent::new(AuditEventType::ConsentDocumentDenied)
                .failed(ConsentAccessError::SitePermissionAccessDenied.error_code())
        }
        Err(e) => AuditEvent::new(AuditEventType::ConsentDocumentFailed).failed(e.error_code()),
    };
    audit_log!(
        state.storage(),
        event
            .with_user(&user.user_id)
            .with_resource("consent", &consent_id)
    );

    Ok(Json(result?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::DocumentStorageError;
    use crate::storage::AuditRepository;
    use crate::test_support::{seed_consent_fixture, test_state_with_blobs, TEST_BUCKET};
    use crate::{storage::InMemoryBlobStore, auth::AuthenticatedUser};
    use axum::http::StatusCode;
    use chrono::Utc;
    use std::sync::Arc;

    async fn call(
        state: &AppState,
        consent_id: &str,
        user_id: &str,
    ) -> Result<Json<ConsentDocumentResponse>, ApiError> {
        get_consent_document(
            Auth(AuthenticatedUser {
                user_id: user_id.to_string(),
            }),
            State(state.clone()),
            Path(consent_id.to_string()),
        )
        .await
    }

    #[tokio::test]
    async fn returns_document_for_granted_user() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let (state, _temp) = test_state_with_blobs(blobs.clone());
        seed_consent_fixture(state.storage(), &blobs);

        let Json(response) = call(&state, "R1", "U1").await.unwrap();

        assert_eq!(response.media_type, "application/pdf");
        assert_eq!(response.message, "Get consent document successfully");
        assert_eq!(response.content, "sample consent document content");
    }

    #[tokio::test]
    async fn non_text_document_is_reported_corrupted_and_audited() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let (state, _temp) = test_state_with_blobs(blobs.clone());
        seed_consent_fixture(state.storage(), &blobs);
        blobs.put(TEST_BUCKET, "documents/test-document.pdf", vec![0xffu8, 0xfe, 0x00]);

        let err = call(&state, "R1", "U1").await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "document_storage_error");

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let events = AuditRepository::new(state.storage())
            .search_by_resource("consent", "R1", &today)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, AuditEventType::ConsentDocumentFailed);
    }

    #[tokio::test]
    async fn maps_denial_to_forbidden_and_audits_it() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let (state, _temp) = test_state_with_blobs(blobs.clone());
        seed_consent_fixture(state.storage(), &blobs);

        let err = call(&state, "R1", "stranger").await.unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, "site_permission_access_denied");

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let events = AuditRepository::new(state.storage())
            .search_by_resource("consent", "R1", &today)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, AuditEventType::ConsentDocumentDenied);
        assert_eq!(events[0].user_id.as_deref(), Some("stranger"));
    }

    #[tokio::test]
    async fn missing_blob_maps_to_internal_error() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let (state, _temp) = test_state_with_blobs(blobs.clone());
        seed_consent_fixture(state.storage(), &blobs);
        blobs.remove(TEST_BUCKET, "documents/test-document.pdf");

        let err = call(&state, "R1", "U1").await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.code,
            ConsentAccessError::from(DocumentStorageError::Missing).error_code()
        );
    }
}
