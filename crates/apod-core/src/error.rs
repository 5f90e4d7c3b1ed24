// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the APOD service.

use thiserror::Error;

/// The primary error type shared by the fetcher, presenter, service loop, and client.
#[derive(Debug, Error)]
pub enum ApodError {
    /// Configuration errors (missing API key, unusable values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request/reply socket errors (bind, connect, send, receive).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// APOD API errors (HTTP failure, non-success status, malformed body).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image download or display errors.
    #[error("presenter error: {message}")]
    Presenter {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A reply that does not match the wire contract.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApodError {
    /// Shorthand for an upstream error without an underlying source.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a presenter error without an underlying source.
    pub fn presenter(message: impl Into<String>) -> Self {
        Self::Presenter {
            message: message.into(),
            source: None,
        }
    }
}
