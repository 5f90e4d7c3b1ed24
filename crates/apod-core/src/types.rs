// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Records and reply shapes exchanged between the service and its clients.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::ApodError;

/// Sentinel used for [`ApodRecord::url`] when upstream supplies neither `hdurl` nor `url`.
pub const NO_URL: &str = "No URL";

/// Media type value for which the presenter downloads and shows the picture.
pub const IMAGE_MEDIA_TYPE: &str = "image";

/// Astronomy Picture of the Day metadata as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub date: String,
    pub explanation: String,
    pub title: String,
    pub url: String,
}

/// A fetched APOD record together with the upstream media type.
///
/// `media_type` drives the presenter but is not part of the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodEntry {
    pub record: ApodRecord,
    pub media_type: String,
}

/// Outcome of the image presentation step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum ImageStatus {
    #[strum(serialize = "Image Shown")]
    #[serde(rename = "Image Shown")]
    Shown,
    #[strum(serialize = "Image Not Shown")]
    #[serde(rename = "Image Not Shown")]
    NotShown,
    #[strum(serialize = "Image Not Requested")]
    #[serde(rename = "Image Not Requested")]
    NotRequested,
}

/// A reply sent back over the request/reply socket.
///
/// Serialized as a JSON object discriminated by its `status` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Reply {
    /// The message did not carry this service's tag.
    #[serde(rename = "invalid request")]
    InvalidRequest,

    /// The APOD record was fetched (and possibly shown).
    #[serde(rename = "success")]
    Success {
        apod: ApodRecord,
        image_status: ImageStatus,
    },

    /// Fetching or presenting failed; the request was still answered.
    #[serde(rename = "error")]
    Error { message: String },
}

impl Reply {
    /// The wire value of the `status` key.
    pub fn status(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    /// Encode the reply as a single JSON frame.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApodError> {
        serde_json::to_vec(self)
            .map_err(|e| ApodError::Internal(format!("failed to encode reply: {e}")))
    }

    /// Decode a reply frame, rejecting anything without a known `status`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApodError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ApodError::Protocol(format!("malformed reply: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ApodRecord {
        ApodRecord {
            date: "2024-03-01".into(),
            explanation: "A galaxy far away.".into(),
            title: "Spiral Galaxy".into(),
            url: "https://apod.nasa.gov/apod/image/2403/spiral.jpg".into(),
        }
    }

    #[test]
    fn invalid_request_wire_shape() {
        let json = serde_json::to_value(Reply::InvalidRequest).unwrap();
        assert_eq!(json, serde_json::json!({"status": "invalid request"}));
    }

    #[test]
    fn success_wire_shape() {
        let reply = Reply::Success {
            apod: sample_record(),
            image_status: ImageStatus::NotRequested,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["apod"]["title"], "Spiral Galaxy");
        assert_eq!(json["apod"]["date"], "2024-03-01");
        assert_eq!(json["image_status"], "Image Not Requested");
    }

    #[test]
    fn error_wire_shape() {
        let reply = Reply::Error {
            message: "upstream error: boom".into(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "upstream error: boom"})
        );
    }

    #[test]
    fn image_status_display_matches_wire() {
        for status in [
            ImageStatus::Shown,
            ImageStatus::NotShown,
            ImageStatus::NotRequested,
        ] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, serde_json::Value::String(status.to_string()));
        }
        assert_eq!(ImageStatus::Shown.to_string(), "Image Shown");
    }

    #[test]
    fn from_bytes_rejects_missing_status() {
        let err = Reply::from_bytes(br#"{"apod": {}}"#).unwrap_err();
        assert!(matches!(err, ApodError::Protocol(_)), "got: {err}");
    }

    #[test]
    fn from_bytes_rejects_non_json() {
        assert!(Reply::from_bytes(b"not json").is_err());
    }

    #[test]
    fn from_bytes_reads_invalid_request() {
        let reply = Reply::from_bytes(br#"{"status":"invalid request"}"#).unwrap();
        assert_eq!(reply, Reply::InvalidRequest);
        assert_eq!(reply.status(), "invalid request");
    }
}
