// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the on-disk storage layout.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Check that an identifier can be used as a single path segment.
///
/// Identifiers arrive from request paths; anything that could escape its
/// directory is rejected.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}

/// Storage path utilities for the data directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Consent Paths ==========

    /// Directory containing all consent records.
    pub fn consents_dir(&self) -> PathBuf {
        self.root.join("consents")
    }

    /// Path to a specific consent record file.
    pub fn consent(&self, consent_id: &str) -> PathBuf {
        self.consents_dir().join(format!("{consent_id}.json"))
    }

    // ========== Participant Study Paths ==========

    pub fn participant_studies_dir(&self) -> PathBuf {
        self.root.join("participant_studies")
    }

    pub fn participant_study(&self, link_id: &str) -> PathBuf {
        self.participant_studies_dir().join(format!("{link_id}.json"))
    }

    // ========== Site Paths ==========

    pub fn sites_dir(&self) -> PathBuf {
        self.root.join("sites")
    }

    pub fn site(&self, site_id: &str) -> PathBuf {
        self.sites_dir().join(format!("{site_id}.json"))
    }

    // ========== Site Permission Paths ==========

    /// Directory containing permission grants, grouped per site.
    pub fn site_permissions_dir(&self) -> PathBuf {
        self.root.join("site_permissions")
    }

    /// Directory holding every grant issued on one site.
    pub fn site_permissions_for(&self, site_id: &str) -> PathBuf {
        self.site_permissions_dir().join(site_id)
    }

    /// Path to the grant of a single user on a single site.
    ///
    /// One file per (site, user) pair, so a user holds at most one grant
    /// per site.
    pub fn site_permission(&self, site_id: &str, user_id: &str) -> PathBuf {
        self.site_permissions_for(site_id)
            .join(format!("{user_id}.json"))
    }

    // ========== Blob Paths ==========

    /// Directory holding all blob buckets.
    pub fn blobs_dir(&self) -> PathBuf {
        self.root.join("blobs")
    }

    pub fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.blobs_dir().join(bucket)
    }

    // ========== Audit Log Paths ==========

    /// Directory containing audit logs.
    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("audit")
    }

    /// Directory for a specific date's audit logs.
    pub fn audit_date_dir(&self, date: &str) -> PathBuf {
        self.audit_dir().join(date)
    }

    /// Path to a daily audit events file (JSONL format).
    pub fn audit_events_file(&self, date: &str) -> PathBuf {
        self.audit_date_dir(date).join("events.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("/data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.consent("consent-123"),
            PathBuf::from("/tmp/test-data/consents/consent-123.json")
        );
    }

    #[test]
    fn record_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(
            paths.participant_study("ps-1"),
            PathBuf::from("/data/participant_studies/ps-1.json")
        );
        assert_eq!(paths.site("site-1"), PathBuf::from("/data/sites/site-1.json"));
    }

    #[test]
    fn site_permission_paths_are_scoped_per_site() {
        let paths = StoragePaths::default();
        assert_eq!(
            paths.site_permission("site-1", "user-1"),
            PathBuf::from("/data/site_permissions/site-1/user-1.json")
        );
        assert_ne!(
            paths.site_permission("site-1", "user-1"),
            paths.site_permission("site-2", "user-1")
        );
    }

    #[test]
    fn safe_segments_reject_traversal() {
        assert!(is_safe_segment("consent-1"));
        assert!(is_safe_segment("test-document.pdf"));
        assert!(!is_safe_segment(""));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("../etc"));
        assert!(!is_safe_segment("a\\b"));
    }

    #[test]
    fn blob_and_audit_paths_are_correct() {
        let paths = StoragePaths::default();
        assert_eq!(paths.bucket_dir("docs"), PathBuf::from("/data/blobs/docs"));
        assert_eq!(
            paths.audit_events_file("2026-01-28"),
            PathBuf::from("/data/audit/2026-01-28/events.jsonl")
        );
    }
}
