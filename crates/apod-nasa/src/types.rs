// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the APOD API.

use apod_core::{ApodEntry, ApodRecord, NO_URL};
use serde::Deserialize;

/// A successful APOD response body.
///
/// `date`, `explanation`, `title` and `media_type` are required; a body
/// missing any of them fails to deserialize. Unlisted fields
/// (`service_version`, `thumbnail_url`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodPayload {
    pub date: String,
    pub explanation: String,
    pub title: String,
    pub media_type: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl From<ApodPayload> for ApodEntry {
    fn from(payload: ApodPayload) -> Self {
        let url = payload
            .hdurl
            .or(payload.url)
            .unwrap_or_else(|| NO_URL.to_string());
        ApodEntry {
            record: ApodRecord {
                date: payload.date,
                explanation: payload.explanation,
                title: payload.title,
                url,
            },
            media_type: payload.media_type,
        }
    }
}

/// Error bodies returned by api.nasa.gov.
///
/// The APOD service itself answers `{"code": 400, "msg": "..."}`, while the
/// api.nasa.gov gateway answers `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorResponse {
    Service { code: u16, msg: String },
    Gateway { error: GatewayError },
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayError {
    pub code: String,
    pub message: String,
}

impl ApiErrorResponse {
    /// One-line description for logs and error replies.
    pub fn describe(&self) -> String {
        match self {
            Self::Service { code, msg } => format!("APOD API error ({code}): {msg}"),
            Self::Gateway { error } => {
                format!("APOD API error ({}): {}", error.code, error.message)
            }
        }
    }
}
