// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image viewer that records what it was asked to show.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use apod_core::{ApodError, ImageViewer};

/// Snapshot of a file at the moment it was shown.
#[derive(Debug, Clone)]
pub struct ShownImage {
    pub path: PathBuf,
    /// File contents, or `None` if the file did not exist when shown.
    pub contents: Option<Vec<u8>>,
}

/// A viewer that captures shown files instead of displaying them.
///
/// Clones share the same capture buffer, so a test can hand one clone to
/// the presenter and inspect the other.
#[derive(Clone, Default)]
pub struct MockViewer {
    shown: Arc<Mutex<Vec<ShownImage>>>,
    fail: Arc<AtomicBool>,
}

impl MockViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewer whose every `show` call fails after recording the file.
    pub fn failing() -> Self {
        let viewer = Self::default();
        viewer.fail.store(true, Ordering::SeqCst);
        viewer
    }

    pub async fn shown(&self) -> Vec<ShownImage> {
        self.shown.lock().await.clone()
    }

    pub async fn shown_count(&self) -> usize {
        self.shown.lock().await.len()
    }
}

#[async_trait]
impl ImageViewer for MockViewer {
    async fn show(&self, path: &Path) -> Result<(), ApodError> {
        self.shown.lock().await.push(ShownImage {
            path: path.to_path_buf(),
            contents: std::fs::read(path).ok(),
        });
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApodError::presenter("mock viewer failure"));
        }
        Ok(())
    }
}
