// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command grammar for inbound request messages.
//!
//! A message is `<tag><free text>`. The free text may contain a
//! `YYYY-MM-DD` date and the word `text`, which suppresses the image.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Marker that turns a request into a text-only request.
pub const TEXT_ONLY_MARKER: &str = "text";

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid"));

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Requested date, forwarded verbatim. `None` means today's picture.
    pub date: Option<String>,
    /// Whether the image should be downloaded and shown.
    pub show: bool,
}

/// Why a message was not addressed to this service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty message")]
    Empty,

    #[error("expected tag '{expected}', found '{found}'")]
    WrongTag { expected: char, found: char },
}

/// Parses a request message addressed with `tag`.
///
/// Dates are matched by shape only, so `2024-13-45` is accepted and left
/// for the upstream API to reject.
pub fn parse_command(message: &str, tag: char) -> Result<Command, CommandError> {
    let mut chars = message.chars();
    let first = chars.next().ok_or(CommandError::Empty)?;
    if first != tag {
        return Err(CommandError::WrongTag {
            expected: tag,
            found: first,
        });
    }

    let rest = chars.as_str();
    Ok(Command {
        date: DATE.find(rest).map(|m| m.as_str().to_string()),
        show: !message.contains(TEXT_ONLY_MARKER),
    })
}
