// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::consent::{
    ConsentDocumentResolver, ResolverSettings, StorageConsentLookup, StorageSitePermissionGate,
};
use crate::storage::{BlobStore, FileStorage};

/// Resolver wired to the file-backed lookup and gate.
pub type StorageResolver<'a> =
    ConsentDocumentResolver<StorageConsentLookup<'a>, StorageSitePermissionGate<'a>>;

#[derive(Clone)]
pub struct AppState {
    storage: Arc<FileStorage>,
    blobs: Arc<dyn BlobStore>,
    settings: ResolverSettings,
}

impl AppState {
    pub fn new(storage: FileStorage, blobs: Arc<dyn BlobStore>, settings: ResolverSettings) -> Self {
        Self {
            storage: Arc::new(storage),
            blobs,
            settings,
        }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Build a resolver over this state's storage and blob store.
    pub fn resolver(&self) -> StorageResolver<'_> {
        ConsentDocumentResolver::new(
            StorageConsentLookup::new(&self.storage),
            StorageSitePermissionGate::new(&self.storage),
            self.blobs.clone(),
            self.settings.clone(),
        )
    }
}
