// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::consent::ConsentAccessError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error_code: String,
    /// Human-readable description.
    pub error_description: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl From<ConsentAccessError> for ApiError {
    fn from(err: ConsentAccessError) -> Self {
        let status = match &err {
            ConsentAccessError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            ConsentAccessError::ConsentDataUnavailable { .. } => StatusCode::BAD_REQUEST,
            ConsentAccessError::SitePermissionAccessDenied => StatusCode::FORBIDDEN,
            ConsentAccessError::DocumentStorage(e) if e.is_retryable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ConsentAccessError::DocumentStorage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.error_code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error_code: self.code.to_string(),
            error_description: self.message,
        });
        (self.status, body).into_response()
    }
}
