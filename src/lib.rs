// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent Document Server - guarded consent document retrieval
//!
//! Resolves a participant's consent record to the site it was signed at,
//! checks that the acting user holds an active grant on that site, and
//! returns the signed document from the blob store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Acting-user extraction from the gateway header
//! - `consent` - Record lookup, permission gate and document resolver
//! - `storage` - File-backed records, blob store and audit log

pub mod api;
pub mod auth;
pub mod config;
pub mod consent;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
