// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source adapter trait for APOD metadata.

use async_trait::async_trait;

use crate::error::ApodError;
use crate::types::ApodEntry;

/// Something that can look up the Astronomy Picture of the Day.
#[async_trait]
pub trait ApodSource: Send + Sync + 'static {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches the entry for `date` (`YYYY-MM-DD`), or for today when `None`.
    ///
    /// The date is forwarded as-is; calendar validation is left to the source.
    async fn fetch(&self, date: Option<&str>) -> Result<ApodEntry, ApodError>;
}
