// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! File-backed persistence for consent data, plus the blob store the signed
//! consent documents are read from.
//!
//! ## Storage Layout
//!
//! ```text
//! <data>/
//!   consents/{consent_id}.json
//!   participant_studies/{link_id}.json
//!   sites/{site_id}.json
//!   site_permissions/{site_id}/{user_id}.json
//!   blobs/{bucket}/{key}            # object bytes
//!   blobs/{bucket}/{key}.sha256     # optional digest sidecar
//!   audit/{date}/events.jsonl
//! ```
//!
//! The consent pipeline only reads from here. Writes exist for seeding,
//! administrative correction and tests.

pub mod audit;
pub mod blob;
pub mod file_store;
pub mod paths;
pub mod repository;

pub use audit::{AuditEvent, AuditEventType, AuditRepository};
pub use blob::{is_valid_object_key, BlobError, BlobStore, FsBlobStore, InMemoryBlobStore};
pub use file_store::{FileStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    ConsentRepository, ParticipantStudyRepository, SitePermissionRepository, SiteRepository,
};
