// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NASA Astronomy Picture of the Day source for the APOD service.
//!
//! Implements [`ApodSource`] on top of [`NasaClient`].

pub mod client;
pub mod types;

use apod_config::model::NasaConfig;
use apod_core::{ApodEntry, ApodError, ApodSource};
use async_trait::async_trait;
use tracing::info;

pub use client::{build_request_url, NasaClient, API_BASE_URL};

/// APOD source backed by the api.nasa.gov REST endpoint.
pub struct NasaSource {
    client: NasaClient,
}

impl NasaSource {
    /// Creates a source from the `[nasa]` config section.
    ///
    /// A missing or empty `api_key` is a configuration error.
    pub fn new(config: &NasaConfig) -> Result<Self, ApodError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ApodError::Config(
                    "APOD API key not found. Set nasa.api_key in apod.toml or the APOD_API_KEY environment variable.".into(),
                )
            })?;
        let client = NasaClient::new(api_key, config.base_url.clone())?;
        info!(endpoint = client.base_url(), "APOD source initialized");
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: NasaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApodSource for NasaSource {
    fn name(&self) -> &str {
        "nasa"
    }

    async fn fetch(&self, date: Option<&str>) -> Result<ApodEntry, ApodError> {
        self.client.fetch_entry(date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_config_error() {
        let err = NasaSource::new(&NasaConfig::default()).err().unwrap();
        assert!(err.to_string().contains("API key not found"), "got: {err}");
    }

    #[test]
    fn blank_api_key_is_config_error() {
        let config = NasaConfig {
            api_key: Some("   ".into()),
            ..NasaConfig::default()
        };
        assert!(matches!(NasaSource::new(&config), Err(ApodError::Config(_))));
    }

    #[test]
    fn configured_key_builds_source() {
        let config = NasaConfig {
            api_key: Some("DEMO_KEY".into()),
            ..NasaConfig::default()
        };
        let source = NasaSource::new(&config).unwrap();
        assert_eq!(source.name(), "nasa");
    }
}
