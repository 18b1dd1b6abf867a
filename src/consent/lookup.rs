// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent record lookup.
//!
//! Resolves a consent ID to the record plus the participant-study link and
//! site it hangs off. Pure reads, no permission logic.

use crate::storage::{
    ConsentRepository, FileStorage, ParticipantStudyRepository, SiteRepository, StorageError,
};

use super::model::{ParticipantStudyLink, ResolvedConsent, Site};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("consent record not found")]
    NotFound,

    /// The backing store failed for a reason other than absence.
    #[error("consent lookup failed: {0}")]
    Backend(String),
}

/// Resolve consent records and their linkage.
pub trait ConsentRecordLookup: Send + Sync {
    fn resolve(&self, consent_id: &str) -> Result<ResolvedConsent, LookupError>;
}

/// [`ConsentRecordLookup`] over the file-backed repositories.
pub struct StorageConsentLookup<'a> {
    storage: &'a FileStorage,
}

impl<'a> StorageConsentLookup<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    fn resolve_link(&self, link_id: &str) -> Result<Option<ParticipantStudyLink>, LookupError> {
        match ParticipantStudyRepository::new(self.storage).get(link_id) {
            Ok(link) => Ok(Some(link)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(link_id, "Consent references a missing participant study");
                Ok(None)
            }
            Err(e) => Err(backend(e)),
        }
    }

    fn resolve_site(&self, site_id: &str) -> Result<Option<Site>, LookupError> {
        match SiteRepository::new(self.storage).get(site_id) {
            Ok(site) => Ok(Some(site)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(site_id, "Participant study references a missing site");
                Ok(None)
            }
            Err(e) => Err(backend(e)),
        }
    }
}

fn backend(e: StorageError) -> LookupError {
    LookupError::Backend(e.to_string())
}

impl ConsentRecordLookup for StorageConsentLookup<'_> {
    fn resolve(&self, consent_id: &str) -> Result<ResolvedConsent, LookupError> {
        let record = match ConsentRepository::new(self.storage).get(consent_id) {
            Ok(record) => record,
            Err(e) if e.is_not_found() => return Err(LookupError::NotFound),
            Err(e) => return Err(backend(e)),
        };

        let link = match record.participant_study_id.as_deref() {
            Some(link_id) => self.resolve_link(link_id)?,
            None => None,
        };

        let site = match link.as_ref().and_then(|l| l.site_id.as_deref()) {
            Some(site_id) => self.resolve_site(site_id)?,
            None => None,
        };

        Ok(ResolvedConsent { record, link, site })
    }
}
