// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./apod.toml` > `~/.config/apod/apod.toml` > `/etc/apod/apod.toml`
//! with `.env` and environment variable overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, Value},
    Figment,
};
use tracing::{debug, warn};

use crate::model::ApodConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/apod/apod.toml` (system-wide)
/// 3. `~/.config/apod/apod.toml` (user XDG config)
/// 4. `./apod.toml` (local directory)
/// 5. `./.env` (same variables as below)
/// 6. `SOCKET_NUMBER` and `APOD_API_KEY`
/// 7. `APOD_<SECTION>_*` environment variables
pub fn load_config() -> Result<ApodConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ApodConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ApodConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ApodConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration file");
    with_env(
        Figment::new()
            .merge(Serialized::defaults(ApodConfig::default()))
            .merge(Toml::file(path)),
    )
    .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    with_env(
        Figment::new()
            .merge(Serialized::defaults(ApodConfig::default()))
            .merge(Toml::file("/etc/apod/apod.toml"))
            .merge(Toml::file(
                dirs::config_dir()
                    .map(|d| d.join("apod/apod.toml"))
                    .unwrap_or_default(),
            ))
            .merge(Toml::file("apod.toml")),
    )
}

fn with_env(figment: Figment) -> Figment {
    merge_dotenv(figment, Path::new(".env"))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Config sections addressable as `APOD_<SECTION>_<FIELD>`.
const SECTIONS: [&str; 4] = ["service", "nasa", "presenter", "client"];

/// The two variables the service has always been configured with.
fn legacy_key(var: &str) -> Option<&'static str> {
    if var.eq_ignore_ascii_case("SOCKET_NUMBER") {
        Some("service.port")
    } else if var.eq_ignore_ascii_case("APOD_API_KEY") {
        Some("nasa.api_key")
    } else {
        None
    }
}

/// Maps `APOD_PRESENTER_HOLD_MS` to `presenter.hold_ms`.
///
/// `APOD_*` variables outside the four sections are not ours and yield `None`.
fn section_key(var: &str) -> Option<String> {
    let var = var.to_ascii_lowercase();
    let rest = var.strip_prefix("apod_")?;
    SECTIONS.iter().find_map(|section| {
        let field = rest.strip_prefix(section)?.strip_prefix('_')?;
        (!field.is_empty()).then(|| format!("{section}.{field}"))
    })
}

/// The config key an environment variable sets, if any.
pub fn config_key(var: &str) -> Option<String> {
    legacy_key(var)
        .map(str::to_string)
        .or_else(|| section_key(var))
}

/// Merge the variables of a dotenv file, below the process environment.
///
/// A missing file is not an error; unreadable lines are skipped with a warning.
fn merge_dotenv(figment: Figment, path: &Path) -> Figment {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) => {
            if !e.not_found() {
                warn!(path = %path.display(), error = %e, "ignoring unreadable dotenv file");
            }
            return figment;
        }
    };
    debug!(path = %path.display(), "reading dotenv file");

    entries.fold(figment, |figment, entry| match entry {
        Ok((var, raw)) => match config_key(&var) {
            Some(key) => {
                let Ok(value) = raw.parse::<Value>();
                figment.merge(Serialized::default(&key, value))
            }
            None => figment,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping dotenv entry");
            figment
        }
    })
}

fn legacy_env_provider() -> Env {
    Env::raw().filter_map(|var| legacy_key(var.as_str()).map(Uncased::from))
}

/// `APOD_<SECTION>_<FIELD>` variables, mapped with [`section_key`].
///
/// Uses explicit mapping rather than `Env::split("_")` because field names
/// contain underscores: `APOD_NASA_BASE_URL` must map to `nasa.base_url`,
/// not `nasa.base.url`. `APOD_API_KEY` is owned by the legacy provider.
fn env_provider() -> Env {
    Env::raw().filter_map(|var| {
        if legacy_key(var.as_str()).is_some() {
            return None;
        }
        section_key(var.as_str()).map(Uncased::from)
    })
}
