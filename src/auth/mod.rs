// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! The service sits behind an auth gateway. The gateway verifies the
//! caller's credentials and forwards the resolved user ID in the `userId`
//! header; this module turns that header into an [`AuthenticatedUser`].
//!
//! Authorization (who may see which consent) is not decided here but in
//! [`crate::consent::gate`], per site.

pub mod error;
pub mod extractor;

pub use error::AuthError;
pub use extractor::{Auth, AuthenticatedUser};
