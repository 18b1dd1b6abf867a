// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Site permission grant repository.
//!
//! Grants are stored at `<data>/site_permissions/{site_id}/{user_id}.json`,
//! so there is at most one grant per (user, site) pair. Revocation keeps the
//! file and flips its status.

use chrono::Utc;

use crate::consent::model::{GrantStatus, SitePermissionGrant};
use crate::storage::paths::is_safe_segment;

use super::super::{FileStorage, StorageError, StorageResult};

pub struct SitePermissionRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> SitePermissionRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Find the grant a user holds on a site, whatever its status.
    pub fn find(&self, user_id: &str, site_id: &str) -> StorageResult<Option<SitePermissionGrant>> {
        if !is_safe_segment(user_id) || !is_safe_segment(site_id) {
            return Ok(None);
        }
        let path = self.storage.paths().site_permission(site_id, user_id);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        let grant: SitePermissionGrant = self.storage.read_json(path)?;

        // The file location is authoritative; a grant body naming another
        // user or site is corrupt and must never authorize.
        if grant.user_id != user_id || grant.site_id != site_id {
            return Err(StorageError::IntegrityViolation(format!(
                "Grant at {site_id}/{user_id} names {}/{}",
                grant.site_id, grant.user_id
            )));
        }
        Ok(Some(grant))
    }

    /// Find the grant only if it is currently active.
    pub fn find_active(
        &self,
        user_id: &str,
        site_id: &str,
    ) -> StorageResult<Option<SitePermissionGrant>> {
        Ok(self.find(user_id, site_id)?.filter(SitePermissionGrant::is_active))
    }

    /// Issue (or re-activate) a grant.
    pub fn grant(&self, user_id: &str, site_id: &str) -> StorageResult<SitePermissionGrant> {
        let grant = SitePermissionGrant {
            user_id: user_id.to_string(),
            site_id: site_id.to_string(),
            status: GrantStatus::Active,
            granted_at: Utc::now(),
        };
        self.save(&grant)?;
        Ok(grant)
    }

    /// Revoke an existing grant.
    pub fn revoke(&self, user_id: &str, site_id: &str) -> StorageResult<()> {
        let mut grant = self.find(user_id, site_id)?.ok_or_else(|| {
            StorageError::NotFound(format!("Grant for {user_id} on site {site_id}"))
        })?;
        grant.status = GrantStatus::Revoked;
        self.save(&grant)
    }

    fn save(&self, grant: &SitePermissionGrant) -> StorageResult<()> {
        if !is_safe_segment(&grant.user_id) {
            return Err(StorageError::InvalidIdentifier(grant.user_id.clone()));
        }
        if !is_safe_segment(&grant.site_id) {
            return Err(StorageError::InvalidIdentifier(grant.site_id.clone()));
        }
        self.storage.write_json(
            self.storage
                .paths()
                .site_permission(&grant.site_id, &grant.user_id),
            grant,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();
        (temp, storage)
    }

    #[test]
    fn grant_then_find_active() {
        let (_temp, storage) = setup();
        let repo = SitePermissionRepository::new(&storage);

        repo.grant("user-1", "site-1").unwrap();

        let grant = repo.find_active("user-1", "site-1").unwrap().unwrap();
        assert_eq!(grant.status, GrantStatus::Active);
        assert!(repo.find_active("user-1", "site-2").unwrap().is_none());
        assert!(repo.find_active("user-2", "site-1").unwrap().is_none());
    }

    #[test]
    fn revoked_grant_is_not_active() {
        let (_temp, storage) = setup();
        let repo = SitePermissionRepository::new(&storage);

        repo.grant("user-1", "site-1").unwrap();
        repo.revoke("user-1", "site-1").unwrap();

        assert!(repo.find_active("user-1", "site-1").unwrap().is_none());
        let stored = repo.find("user-1", "site-1").unwrap().unwrap();
        assert_eq!(stored.status, GrantStatus::Revoked);
    }

    #[test]
    fn revoke_without_grant_is_not_found() {
        let (_temp, storage) = setup();
        let repo = SitePermissionRepository::new(&storage);

        let result = repo.revoke("user-1", "site-1");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn mismatched_grant_body_is_integrity_violation() {
        let (_temp, storage) = setup();
        let repo = SitePermissionRepository::new(&storage);

        let forged = SitePermissionGrant {
            user_id: "someone-else".to_string(),
            site_id: "site-1".to_string(),
            status: GrantStatus::Active,
            granted_at: Utc::now(),
        };
        storage
            .write_json(storage.paths().site_permission("site-1", "user-1"), &forged)
            .unwrap();

        let result = repo.find_active("user-1", "site-1");
        assert!(matches!(result, Err(StorageError::IntegrityViolation(_))));
    }

    #[test]
    fn unsafe_identifiers_find_nothing() {
        let (_temp, storage) = setup();
        let repo = SitePermissionRepository::new(&storage);

        assert!(repo.find("..", "site-1").unwrap().is_none());
        assert!(matches!(
            repo.grant("user/1", "site-1"),
            Err(StorageError::InvalidIdentifier(_))
        ));
    }
}
