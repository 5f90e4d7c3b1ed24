// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean?" suggestions.
//!
//! Unknown keys are matched against the section's valid keys using
//! Jaro-Winkler similarity and, when the offending file is known, labelled
//! with a source span.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches typos like `prot` -> `port` and `hold_sm` -> `hold_ms`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error rendered through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(apod::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value could not be read as the expected type.
    #[error("invalid value for `{key}`: found {found}")]
    #[diagnostic(code(apod::config::invalid_value), help("expected {expected}"))]
    InvalidValue {
        key: String,
        found: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(apod::config::missing_key),
        help("add `{key} = <value>` to your apod.toml")
    )]
    MissingKey { key: String },

    /// A value deserialized fine but is not usable.
    #[error("validation error: {message}")]
    #[diagnostic(code(apod::config::validation))]
    Validation { message: String },

    /// Anything else Figment reports (unreadable file, TOML syntax error).
    #[error("configuration error: {0}")]
    #[diagnostic(code(apod::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may carry several errors) into diagnostics.
///
/// `toml_sources` holds `(path, content)` pairs used to attach source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert_one(&error, toml_sources))
        .collect()
}

fn convert_one(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let suggestion = suggest_key(field, expected);
            let (span, src) = locate(error, field, toml_sources)
                .map(|(span, src)| (Some(span), Some(src)))
                .unwrap_or((None, None));
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion,
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.to_string(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidValue {
            key: error.path.join("."),
            found: actual.to_string(),
            expected: expected.to_string(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Locate `field` inside the TOML file the error came from.
fn locate(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let path = match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(path) => path.display().to_string(),
        _ => return None,
    };
    let (name, content) = toml_sources.iter().find(|(p, _)| *p == path)?;
    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["presenter"]` and `field = "hold_sm"`, finds the `[presenter]`
/// header then searches for `hold_sm` after it. Top-level fields search from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.starts_with([' ', '\t', '='])
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_port_for_prot() {
        let valid = &["bind_address", "port", "tag", "log_level"];
        assert_eq!(suggest_key("prot", valid), Some("port".to_string()));
    }

    #[test]
    fn suggest_hold_ms_for_hold_sm() {
        let valid = &["hold_ms", "download_dir", "viewer", "viewer_args"];
        assert_eq!(suggest_key("hold_sm", valid), Some("hold_ms".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["bind_address", "port", "tag", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[service]\nport = 5555\n\n[nasa]\napi_kye = \"x\"\n";
        let path = vec!["nasa".to_string()];
        let o = find_key_offset(content, &path, "api_kye").expect("key should be found");
        assert_eq!(&content[o..o + 7], "api_kye");
    }

    #[test]
    fn find_key_offset_ignores_prefix_matches() {
        let content = "[presenter]\nviewer_args = []\nviewer = \"feh\"\n";
        let path = vec!["presenter".to_string()];
        let o = find_key_offset(content, &path, "viewer").unwrap();
        assert!(content[o..].starts_with("viewer ="));
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[service]\nport = 5555\n";
        let path = vec!["client".to_string()];
        assert_eq!(find_key_offset(content, &path, "host"), None);
    }

    #[test]
    fn unknown_field_becomes_unknown_key_with_suggestion() {
        let err = crate::loader::load_config_from_str("[service]\nprot = 1\n").unwrap_err();
        let errors = figment_to_config_errors(err, &[]);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. } if key == "prot" && s == "port"
        )));
    }

    #[test]
    fn wrong_type_becomes_invalid_value() {
        let err =
            crate::loader::load_config_from_str("[presenter]\nhold_ms = \"soon\"\n").unwrap_err();
        let errors = figment_to_config_errors(err, &[]);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::InvalidValue { key, .. } if key.contains("hold_ms")
        )));
    }
}
