// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns one raw request into one reply.

use std::sync::Arc;

use apod_core::{ApodError, ApodSource, ImageStatus, Reply};
use apod_presenter::ImagePresenter;
use tracing::{debug, error, info, warn};

use crate::command::{parse_command, Command};

/// Request handler: parse, fetch, optionally present, reply.
pub struct ApodService {
    tag: char,
    source: Arc<dyn ApodSource>,
    presenter: ImagePresenter,
}

impl ApodService {
    pub fn new(tag: char, source: Arc<dyn ApodSource>, presenter: ImagePresenter) -> Self {
        Self {
            tag,
            source,
            presenter,
        }
    }

    pub fn tag(&self) -> char {
        self.tag
    }

    /// Handles one request frame. Never fails: every fault becomes a reply.
    pub async fn handle(&self, raw: &[u8]) -> Reply {
        let message = String::from_utf8_lossy(raw);
        let command = match parse_command(&message, self.tag) {
            Ok(command) => command,
            Err(e) => {
                warn!(reason = %e, "invalid request");
                return Reply::InvalidRequest;
            }
        };

        match self.execute(&command).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, date = ?command.date, show = command.show, "request failed");
                Reply::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn execute(&self, command: &Command) -> Result<Reply, ApodError> {
        debug!(date = ?command.date, show = command.show, source = self.source.name(), "fetching APOD");
        let entry = self.source.fetch(command.date.as_deref()).await?;

        let image_status = if command.show {
            self.presenter
                .present(&entry.record.url, &entry.media_type)
                .await?
        } else {
            ImageStatus::NotRequested
        };

        info!(
            date = %entry.record.date,
            media_type = %entry.media_type,
            status = %image_status,
            "request served"
        );
        Ok(Reply::Success {
            apod: entry.record,
            image_status,
        })
    }
}
