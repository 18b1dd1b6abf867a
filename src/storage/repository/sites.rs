// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Site repository (`<data>/sites/`).

use crate::consent::model::Site;
use crate::storage::paths::is_safe_segment;

use super::super::{FileStorage, StorageError, StorageResult};

pub struct SiteRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> SiteRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self, site_id: &str) -> StorageResult<Site> {
        if !is_safe_segment(site_id) {
            return Err(StorageError::InvalidIdentifier(site_id.to_string()));
        }
        let path = self.storage.paths().site(site_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Site {site_id}")));
        }
        self.storage.read_json(path)
    }

    pub fn save(&self, site: &Site) -> StorageResult<()> {
        if !is_safe_segment(&site.id) {
            return Err(StorageError::InvalidIdentifier(site.id.clone()));
        }
        self.storage.write_json(self.storage.paths().site(&site.id), site)
    }
}
