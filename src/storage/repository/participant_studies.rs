// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Participant-study link repository (`<data>/participant_studies/`).

use crate::consent::model::ParticipantStudyLink;
use crate::storage::paths::is_safe_segment;

use super::super::{FileStorage, StorageError, StorageResult};

pub struct ParticipantStudyRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> ParticipantStudyRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self, link_id: &str) -> StorageResult<ParticipantStudyLink> {
        if !is_safe_segment(link_id) {
            return Err(StorageError::InvalidIdentifier(link_id.to_string()));
        }
        let path = self.storage.paths().participant_study(link_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Participant study {link_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create or replace an enrollment link.
    ///
    /// Clearing `site_id` is an administrative action and goes through here.
    pub fn save(&self, link: &ParticipantStudyLink) -> StorageResult<()> {
        if !is_safe_segment(&link.id) {
            return Err(StorageError::InvalidIdentifier(link.id.clone()));
        }
        self.storage
            .write_json(self.storage.paths().participant_study(&link.id), link)
    }
}
