// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `apod config` command implementation.

use apod_config::ApodConfig;
use apod_core::ApodError;

const MASK: &str = "********";

/// Prints the resolved configuration as TOML.
pub fn run_config(config: &ApodConfig) -> Result<(), ApodError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Renders `config` as TOML with the API key masked.
pub fn render_config(config: &ApodConfig) -> Result<String, ApodError> {
    let mut shown = config.clone();
    if let Some(key) = shown.nasa.api_key.as_mut() {
        *key = MASK.to_string();
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| ApodError::Internal(format!("failed to render config: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_masked() {
        let mut config = ApodConfig::default();
        config.nasa.api_key = Some("super-secret".into());

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains(MASK));
        assert!(rendered.contains("[service]"));
        assert!(rendered.contains("port = 5555"));
    }

    #[test]
    fn missing_key_is_omitted() {
        let rendered = render_config(&ApodConfig::default()).unwrap();
        assert!(!rendered.contains("api_key"));
        assert!(!rendered.contains(MASK));
    }

    #[test]
    fn rendered_config_loads_back() {
        let rendered = render_config(&ApodConfig::default()).unwrap();
        let reloaded = apod_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(reloaded.service.bind_address, "0.0.0.0");
        assert_eq!(reloaded.presenter.hold_ms, 1000);
    }
}
