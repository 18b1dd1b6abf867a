// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent domain entities.
//!
//! These are the read-side shapes the consent pipeline works with. They are
//! persisted as JSON by the repositories in [`crate::storage::repository`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::DEFAULT_DOCUMENT_MEDIA_TYPE;

fn default_media_type() -> String {
    DEFAULT_DOCUMENT_MEDIA_TYPE.to_string()
}

/// A participant's signed acknowledgment of a study's consent terms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ConsentRecord {
    /// Unique consent record identifier
    pub id: String,
    /// Enrollment this consent belongs to; cleared administratively in some cases
    #[serde(default)]
    pub participant_study_id: Option<String>,
    /// Storage key of the signed document, relative to the documents prefix
    pub document_path: String,
    /// Declared media type of the stored document
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Consent form version the participant signed
    #[serde(default)]
    pub version: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Enrollment of a participant at a site for a study.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ParticipantStudyLink {
    pub id: String,
    /// Site the participant is enrolled at; `None` once cleared
    #[serde(default)]
    pub site_id: Option<String>,
    pub study_id: String,
    pub participant_id: String,
}

/// A study site. Belongs to exactly one study.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Site {
    pub id: String,
    pub study_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Lifecycle state of a site permission grant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    Active,
    Revoked,
}

/// Authorization of a user on one site.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SitePermissionGrant {
    pub user_id: String,
    pub site_id: String,
    pub status: GrantStatus,
    pub granted_at: DateTime<Utc>,
}

impl SitePermissionGrant {
    pub fn is_active(&self) -> bool {
        self.status == GrantStatus::Active
    }
}

/// A consent record together with whatever linkage could be resolved.
///
/// Dangling references resolve to `None`, same as references that were
/// never set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConsent {
    pub record: ConsentRecord,
    pub link: Option<ParticipantStudyLink>,
    pub site: Option<Site>,
}

/// Fetched document bytes and their media type. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    pub media_type: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_record_defaults_media_type_to_pdf() {
        let json = r#"{
            "id": "consent-1",
            "participant_study_id": "ps-1",
            "document_path": "test-document.pdf",
            "created_at": "2026-01-28T00:00:00Z"
        }"#;

        let record: ConsentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.media_type, "application/pdf");
        assert_eq!(record.participant_study_id.as_deref(), Some("ps-1"));
        assert!(record.version.is_none());
    }

    #[test]
    fn missing_link_fields_deserialize_as_none() {
        let record: ConsentRecord = serde_json::from_str(
            r#"{"id":"c","document_path":"d.pdf","created_at":"2026-01-28T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(record.participant_study_id.is_none());

        let link: ParticipantStudyLink = serde_json::from_str(
            r#"{"id":"ps","study_id":"st","participant_id":"p"}"#,
        )
        .unwrap();
        assert!(link.site_id.is_none());
    }

    #[test]
    fn grant_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&GrantStatus::Revoked).unwrap(),
            r#""revoked""#
        );
        let grant = SitePermissionGrant {
            user_id: "u".into(),
            site_id: "s".into(),
            status: GrantStatus::Active,
            granted_at: Utc::now(),
        };
        assert!(grant.is_active());
    }
}
