// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to file storage.
//!
//! Each repository provides read/write operations for a specific entity
//! type, using [`FileStorage`](super::FileStorage) for all file operations.

pub mod consents;
pub mod participant_studies;
pub mod site_permissions;
pub mod sites;

pub use consents::ConsentRepository;
pub use participant_studies::ParticipantStudyRepository;
pub use site_permissions::SitePermissionRepository;
pub use sites::SiteRepository;
