// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Site permission gate.
//!
//! Access to a consent document is scoped to the site the participant is
//! enrolled at. A grant on a sibling site of the same study, or on the study
//! itself, does not count.

use crate::storage::{FileStorage, SitePermissionRepository};

/// Outcome of a site permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

impl Authorization {
    pub fn is_granted(self) -> bool {
        self == Authorization::Granted
    }
}

/// Decide whether a user may act on a site.
pub trait SitePermissionGate: Send + Sync {
    fn authorize(&self, user_id: &str, site_id: &str) -> Authorization;
}

/// [`SitePermissionGate`] over stored site permission grants.
///
/// Read failures deny.
pub struct StorageSitePermissionGate<'a> {
    storage: &'a FileStorage,
}

impl<'a> StorageSitePermissionGate<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }
}

impl SitePermissionGate for StorageSitePermissionGate<'_> {
    fn authorize(&self, user_id: &str, site_id: &str) -> Authorization {
        if user_id.trim().is_empty() || site_id.trim().is_empty() {
            return Authorization::Denied;
        }

        match SitePermissionRepository::new(self.storage).find_active(user_id, site_id) {
            Ok(Some(_)) => Authorization::Granted,
            Ok(None) => Authorization::Denied,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id,
                    site_id,
                    "Site permission lookup failed, denying"
                );
                Authorization::Denied
            }
        }
    }
}
