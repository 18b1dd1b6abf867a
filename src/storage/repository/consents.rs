// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent record repository.
//!
//! Each consent record is stored as a separate JSON file under
//! `<data>/consents/`. Records are immutable after signing apart from
//! administrative correction, which goes through [`ConsentRepository::update`].

use crate::consent::model::ConsentRecord;
use crate::storage::paths::is_safe_segment;

use super::super::{FileStorage, StorageError, StorageResult};

/// Repository for consent record operations.
pub struct ConsentRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> ConsentRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a consent record exists.
    pub fn exists(&self, consent_id: &str) -> bool {
        is_safe_segment(consent_id) && self.storage.exists(self.storage.paths().consent(consent_id))
    }

    /// Get a consent record by ID.
    pub fn get(&self, consent_id: &str) -> StorageResult<ConsentRecord> {
        if !is_safe_segment(consent_id) {
            return Err(StorageError::InvalidIdentifier(consent_id.to_string()));
        }
        let path = self.storage.paths().consent(consent_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Consent {consent_id}")));
        }
        self.storage.read_json(path)
    }

    /// Store a newly signed consent record.
    pub fn create(&self, record: &ConsentRecord) -> StorageResult<()> {
        let consent_id = &record.id;
        if !is_safe_segment(consent_id) {
            return Err(StorageError::InvalidIdentifier(consent_id.clone()));
        }
        if self.exists(consent_id) {
            return Err(StorageError::AlreadyExists(format!("Consent {consent_id}")));
        }

        self.storage
            .write_json(self.storage.paths().consent(consent_id), record)
    }

    /// Administrative correction of an existing record.
    pub fn update(&self, record: &ConsentRecord) -> StorageResult<()> {
        let consent_id = &record.id;
        if !self.exists(consent_id) {
            return Err(StorageError::NotFound(format!("Consent {consent_id}")));
        }

        self.storage
            .write_json(self.storage.paths().consent(consent_id), record)
    }
}
