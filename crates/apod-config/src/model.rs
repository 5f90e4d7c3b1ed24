// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the APOD service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level APOD service configuration.
///
/// Built once at startup and passed by reference into the service loop and
/// the client. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApodConfig {
    /// Reply socket and dispatch settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// NASA APOD API settings.
    #[serde(default)]
    pub nasa: NasaConfig,

    /// Image download and display settings.
    #[serde(default)]
    pub presenter: PresenterConfig,

    /// Interactive test client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Reply socket configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Interface the reply socket binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// TCP port of the reply socket. Also used by the client to connect.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Leading character a message must carry to be handled by this service.
    #[serde(default = "default_tag", deserialize_with = "deserialize_tag")]
    pub tag: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ServiceConfig {
    /// The tag as a single character, if it is exactly one character long.
    pub fn tag_char(&self) -> Option<char> {
        let mut chars = self.tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// ZeroMQ endpoint the reply socket binds to.
    ///
    /// The ZeroMQ wildcard `*` is written as `0.0.0.0`, which the socket can resolve.
    pub fn bind_endpoint(&self) -> String {
        let address = match self.bind_address.trim() {
            "*" => "0.0.0.0",
            address => address,
        };
        format!("tcp://{address}:{}", self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            tag: default_tag(),
            log_level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5555
}

fn default_tag() -> String {
    "4".to_string()
}

/// Accepts `tag = "4"` as well as `APOD_SERVICE_TAG=4`, which Figment reads as a number.
fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tag {
        Text(String),
        Digit(u64),
    }

    Ok(match Tag::deserialize(deserializer)? {
        Tag::Text(text) => text,
        Tag::Digit(digit) => digit.to_string(),
    })
}

fn default_log_level() -> String {
    "info".to_string()
}

/// NASA APOD API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NasaConfig {
    /// api.nasa.gov key. `None` is accepted here and rejected by `serve`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// APOD endpoint; the API key and date are appended as query parameters.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.nasa.gov/planetary/apod".to_string()
}

/// Image presenter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PresenterConfig {
    /// How long the image stays on disk after the viewer is launched.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// Directory the transient image file is written to.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    /// Viewer program. Falls back to the platform opener when unset.
    #[serde(default)]
    pub viewer: Option<String>,

    /// Extra arguments passed to the viewer before the file path.
    #[serde(default)]
    pub viewer_args: Vec<String>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            download_dir: default_download_dir(),
            viewer: None,
            viewer_args: Vec::new(),
        }
    }
}

fn default_hold_ms() -> u64 {
    1000
}

fn default_download_dir() -> String {
    ".".to_string()
}

/// Interactive client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Host running the service. The port comes from `service.port`.
    #[serde(default = "default_client_host")]
    pub host: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_client_host(),
        }
    }
}

fn default_client_host() -> String {
    "localhost".to_string()
}
