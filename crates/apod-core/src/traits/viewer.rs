// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Viewer adapter trait for displaying a downloaded image.

use std::path::Path;

use async_trait::async_trait;

use crate::error::ApodError;

/// Displays a local image file.
///
/// Implementations must not take ownership of the file: the caller deletes
/// it once `show` returns and the hold delay has elapsed.
#[async_trait]
pub trait ImageViewer: Send + Sync + 'static {
    /// Displays the image at `path`, returning once the viewer has been launched.
    async fn show(&self, path: &Path) -> Result<(), ApodError>;
}
