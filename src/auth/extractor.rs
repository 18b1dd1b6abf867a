// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the acting user.
//!
//! Use the `Auth` extractor in handlers to require a user:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;
use crate::config::USER_ID_HEADER;
use crate::state::AppState;

/// Longest user ID accepted from the gateway.
const MAX_USER_ID_LEN: usize = 255;

/// The user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID as issued by the auth gateway
    pub user_id: String,
}

/// Extractor for the acting user.
///
/// Reads the gateway-supplied user ID header. If a middleware already
/// placed an [`AuthenticatedUser`] in the request extensions, that wins.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(AuthError::MissingUserId)?
            .to_str()
            .map_err(|_| AuthError::InvalidUserId)?;

        let user_id = raw.trim();
        if user_id.is_empty() {
            return Err(AuthError::MissingUserId);
        }
        if user_id.len() > MAX_USER_ID_LEN || user_id.chars().any(char::is_control) {
            return Err(AuthError::InvalidUserId);
        }

        Ok(Auth(AuthenticatedUser {
            user_id: user_id.to_string(),
        }))
    }
}
