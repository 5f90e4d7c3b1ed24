// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as a one-character tag, a usable bind address, and an http(s) base URL.

use crate::diagnostic::ConfigError;
use crate::model::ApodConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ApodConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let addr = config.service.bind_address.trim();
    if addr.is_empty() {
        fail("service.bind_address must not be empty".to_string());
    } else if addr != "*" {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "service.bind_address `{addr}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.service.port == 0 {
        fail("service.port must be between 1 and 65535".to_string());
    }

    if config.service.tag_char().is_none() {
        fail(format!(
            "service.tag must be exactly one character, got `{}`",
            config.service.tag
        ));
    }

    match reqwest::Url::parse(&config.nasa.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => fail(format!(
            "nasa.base_url must use http or https, got `{}`",
            url.scheme()
        )),
        Err(e) => fail(format!(
            "nasa.base_url `{}` is not a valid URL: {e}",
            config.nasa.base_url
        )),
    }

    if config.presenter.download_dir.trim().is_empty() {
        fail("presenter.download_dir must not be empty".to_string());
    }

    if let Some(viewer) = &config.presenter.viewer
        && viewer.trim().is_empty()
    {
        fail("presenter.viewer must not be empty when set".to_string());
    }

    if config.client.host.trim().is_empty() {
        fail("client.host must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
