// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image presentation for the APOD service.
//!
//! [`ImagePresenter`] downloads the picture into a scoped temp file, hands
//! it to an [`ImageViewer`], holds it for a short delay, and removes it. The
//! temp file is owned by a [`tempfile::NamedTempFile`] guard, so it is
//! removed on every exit path, including download and viewer failures.

pub mod viewer;

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use apod_config::model::PresenterConfig;
use apod_core::{ApodError, ImageStatus, ImageViewer, IMAGE_MEDIA_TYPE};
use regex::Regex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

pub use viewer::{default_viewer, CommandViewer};

/// Trailing file extension of an image URL, e.g. `.jpg` or `.webp`.
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w{3,4}$").expect("extension pattern is valid"));

/// Returns the URL's trailing extension including the dot, or `""` if it has none.
pub fn image_suffix(url: &str) -> &str {
    EXTENSION.find(url).map_or("", |m| m.as_str())
}

/// Downloads, shows, and deletes APOD images.
pub struct ImagePresenter {
    client: reqwest::Client,
    viewer: Arc<dyn ImageViewer>,
    download_dir: PathBuf,
    hold: Duration,
}

impl ImagePresenter {
    /// Creates a presenter from `[presenter]`, using a [`CommandViewer`].
    pub fn new(config: &PresenterConfig) -> Result<Self, ApodError> {
        let viewer = CommandViewer::from_config(config);
        info!(viewer = viewer.program(), dir = %config.download_dir, "image presenter initialized");
        Self::with_viewer(
            Arc::new(viewer),
            PathBuf::from(&config.download_dir),
            Duration::from_millis(config.hold_ms),
        )
    }

    /// Creates a presenter with an explicit viewer, download directory, and hold delay.
    pub fn with_viewer(
        viewer: Arc<dyn ImageViewer>,
        download_dir: PathBuf,
        hold: Duration,
    ) -> Result<Self, ApodError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApodError::Presenter {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            viewer,
            download_dir,
            hold,
        })
    }

    /// Shows the image at `url` if `media_type` is `"image"`.
    ///
    /// Returns [`ImageStatus::NotShown`] without any I/O for other media
    /// types, and [`ImageStatus::Shown`] once the file has been displayed,
    /// held, and deleted.
    pub async fn present(&self, url: &str, media_type: &str) -> Result<ImageStatus, ApodError> {
        if media_type != IMAGE_MEDIA_TYPE {
            debug!(media_type, "not an image, skipping display");
            return Ok(ImageStatus::NotShown);
        }

        let mut file = tempfile::Builder::new()
            .prefix("apod-")
            .suffix(image_suffix(url))
            .tempfile_in(&self.download_dir)
            .map_err(|e| ApodError::Presenter {
                message: format!(
                    "failed to create temp file in {}: {e}",
                    self.download_dir.display()
                ),
                source: Some(Box::new(e)),
            })?;

        let handle = file.as_file().try_clone().map_err(|e| ApodError::Presenter {
            message: format!("failed to open temp file: {e}"),
            source: Some(Box::new(e)),
        })?;
        let bytes = self
            .download(url, tokio::fs::File::from_std(handle))
            .await?;
        debug!(path = %file.path().display(), bytes, "image downloaded");

        self.viewer.show(file.path()).await?;
        tokio::time::sleep(self.hold).await;

        let path = file.path().display().to_string();
        file.close().map_err(|e| ApodError::Presenter {
            message: format!("failed to remove {path}: {e}"),
            source: Some(Box::new(e)),
        })?;
        info!(path, "image shown and removed");

        Ok(ImageStatus::Shown)
    }

    async fn download(&self, url: &str, mut out: tokio::fs::File) -> Result<usize, ApodError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApodError::Presenter {
                message: format!("image download failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApodError::presenter(format!(
                "image download returned {status}"
            )));
        }

        let mut written = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| ApodError::Presenter {
            message: format!("image download interrupted: {e}"),
            source: Some(Box::new(e)),
        })? {
            out.write_all(&chunk).await.map_err(|e| ApodError::Presenter {
                message: format!("failed to write image: {e}"),
                source: Some(Box::new(e)),
            })?;
            written += chunk.len();
        }
        out.flush().await.map_err(|e| ApodError::Presenter {
            message: format!("failed to write image: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(written)
    }
}
