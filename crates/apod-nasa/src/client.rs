// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the APOD endpoint.
//!
//! Provides [`NasaClient`], which builds the request URL, performs a single
//! GET, and turns the JSON body into an [`ApodEntry`]. There is no retry and
//! no timeout beyond the reqwest defaults.

use apod_core::{ApodEntry, ApodError};
use reqwest::Url;
use tracing::debug;

use crate::types::{ApiErrorResponse, ApodPayload};

/// Default APOD endpoint.
pub const API_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// HTTP client for APOD API communication.
#[derive(Debug, Clone)]
pub struct NasaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NasaClient {
    /// Creates a new APOD client against `base_url`.
    ///
    /// Fails if `api_key` is empty or `base_url` does not parse.
    pub fn new(api_key: String, base_url: String) -> Result<Self, ApodError> {
        if api_key.trim().is_empty() {
            return Err(ApodError::Config("APOD API key must not be empty".into()));
        }
        Url::parse(&base_url)
            .map_err(|e| ApodError::Config(format!("invalid APOD base URL `{base_url}`: {e}")))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("apod/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApodError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Creates a client against the public api.nasa.gov endpoint.
    pub fn with_default_endpoint(api_key: String) -> Result<Self, ApodError> {
        Self::new(api_key, API_BASE_URL.to_string())
    }

    /// Returns the configured endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the entry for `date`, or today's entry when `date` is `None` or empty.
    pub async fn fetch_entry(&self, date: Option<&str>) -> Result<ApodEntry, ApodError> {
        let url = build_request_url(&self.base_url, &self.api_key, date)?;
        debug!(date = date.unwrap_or(""), "requesting APOD");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApodError::Upstream {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApodError::Upstream {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, bytes = body.len(), "APOD response received");

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => api_err.describe(),
                Err(_) => format!("APOD API returned {status}: {body}"),
            };
            return Err(ApodError::upstream(message));
        }

        let payload: ApodPayload =
            serde_json::from_str(&body).map_err(|e| ApodError::Upstream {
                message: format!("failed to parse APOD response: {e}"),
                source: Some(Box::new(e)),
            })?;
        if let Some(copyright) = &payload.copyright {
            debug!(copyright = copyright.trim(), "APOD credit");
        }

        Ok(payload.into())
    }
}

/// Builds `<base_url>?api_key=<KEY>[&date=<DATE>]`.
///
/// The date is appended only when present and non-empty and is not
/// validated as a calendar date.
pub fn build_request_url(
    base_url: &str,
    api_key: &str,
    date: Option<&str>,
) -> Result<Url, ApodError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApodError::Config(format!("invalid APOD base URL `{base_url}`: {e}")))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("api_key", api_key);
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            query.append_pair("date", date);
        }
    }
    Ok(url)
}
