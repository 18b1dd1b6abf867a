// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! fixed constants shared across the service. Configuration is loaded from
//! the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for consent data and blobs | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `CONSENT_DOCUMENT_BUCKET` | Bucket holding signed consent documents | `consent-documents` |
//! | `BLOB_FETCH_TIMEOUT_MS` | Deadline for a single blob fetch | `10000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
/// Environment variable naming the bucket consent documents live in.
pub const DOCUMENT_BUCKET_ENV: &str = "CONSENT_DOCUMENT_BUCKET";
pub const BLOB_FETCH_TIMEOUT_ENV: &str = "BLOB_FETCH_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = "/data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DOCUMENT_BUCKET: &str = "consent-documents";
pub const DEFAULT_BLOB_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Request header carrying the acting user's ID.
///
/// The upstream auth gateway authenticates the caller and forwards the
/// resolved user ID in this header.
pub const USER_ID_HEADER: &str = "userId";

/// Object prefix under which consent documents are stored in the bucket.
pub const DOCUMENT_KEY_PREFIX: &str = "documents";

/// Media type assumed for consent records that do not declare one.
pub const DEFAULT_DOCUMENT_MEDIA_TYPE: &str = "application/pdf";

pub const GET_CONSENT_DOCUMENT_SUCCESS: &str = "Get consent document successfully";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Service configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub document_bucket: String,
    pub blob_fetch_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            document_bucket: DEFAULT_DOCUMENT_BUCKET.to_string(),
            blob_fetch_timeout: Duration::from_millis(DEFAULT_BLOB_FETCH_TIMEOUT_MS),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {PORT_ENV}, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let timeout_ms = match lookup(BLOB_FETCH_TIMEOUT_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {BLOB_FETCH_TIMEOUT_ENV}, using default");
                DEFAULT_BLOB_FETCH_TIMEOUT_MS
            }),
            None => DEFAULT_BLOB_FETCH_TIMEOUT_MS,
        };

        Self {
            data_dir: lookup(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            host: lookup(HOST_ENV).unwrap_or(defaults.host),
            port,
            document_bucket: lookup(DOCUMENT_BUCKET_ENV)
                .filter(|bucket| !bucket.trim().is_empty())
                .unwrap_or(defaults.document_bucket),
            blob_fetch_timeout: Duration::from_millis(timeout_ms),
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        }
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
