// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External-program image viewer.

use std::path::Path;
use std::process::Stdio;

use apod_config::model::PresenterConfig;
use apod_core::{ApodError, ImageViewer};
use async_trait::async_trait;
use tracing::debug;

/// Platform opener used when `presenter.viewer` is unset.
pub fn default_viewer() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Shows images by running `<program> [args...] <path>` and waiting for it to exit.
#[derive(Debug, Clone)]
pub struct CommandViewer {
    program: String,
    args: Vec<String>,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds the viewer from `[presenter]`, falling back to [`default_viewer`].
    pub fn from_config(config: &PresenterConfig) -> Self {
        let program = config
            .viewer
            .clone()
            .unwrap_or_else(|| default_viewer().to_string());
        Self::new(program, config.viewer_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ImageViewer for CommandViewer {
    async fn show(&self, path: &Path) -> Result<(), ApodError> {
        debug!(program = %self.program, path = %path.display(), "launching image viewer");

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| ApodError::Presenter {
                message: format!("failed to launch viewer `{}`: {e}", self.program),
                source: Some(Box::new(e)),
            })?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(ApodError::presenter(format!(
                "viewer `{}` exited with code {exit_code}",
                self.program
            )));
        }
        Ok(())
    }
}
