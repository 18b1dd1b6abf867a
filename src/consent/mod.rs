// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Consent Document Access
//!
//! Given a consent ID and an acting user, resolve the consent record and the
//! site it belongs to, check the user's grant on that site and read the
//! signed document out of the blob store.
//!
//! - `lookup` - record and linkage resolution
//! - `gate` - site-scoped permission check
//! - `resolver` - the ordered pipeline tying both to the blob store
//! - `error` - the failure kinds callers can observe

pub mod error;
pub mod gate;
pub mod lookup;
pub mod model;
pub mod resolver;

pub use error::{ConsentAccessError, DocumentStorageError};
pub use gate::{Authorization, SitePermissionGate, StorageSitePermissionGate};
pub use lookup::{ConsentRecordLookup, LookupError, StorageConsentLookup};
pub use model::{
    ConsentRecord, DocumentPayload, GrantStatus, ParticipantStudyLink, ResolvedConsent, Site,
    SitePermissionGrant,
};
pub use resolver::{document_key, ConsentDocumentResolver, ResolverSettings};
