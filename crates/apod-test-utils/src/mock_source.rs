// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock APOD source for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use apod_core::{ApodEntry, ApodError, ApodRecord, ApodSource};

/// Builds an entry with fixed text fields and the given media type and URL.
pub fn sample_entry(media_type: &str, url: &str) -> ApodEntry {
    ApodEntry {
        record: ApodRecord {
            date: "2024-05-10".to_string(),
            explanation: "Aurora over the northern hemisphere.".to_string(),
            title: "Northern Lights".to_string(),
            url: url.to_string(),
        },
        media_type: media_type.to_string(),
    }
}

/// A mock source that returns queued results and records every request.
///
/// Results are popped from a FIFO queue. When the queue is empty, a video
/// entry (which never triggers a download) is returned.
pub struct MockSource {
    results: Arc<Mutex<VecDeque<Result<ApodEntry, String>>>>,
    requested: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockSource {
    /// Create a new mock source with an empty result queue.
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock source pre-loaded with the given entries.
    pub fn with_entries(entries: Vec<ApodEntry>) -> Self {
        Self {
            results: Arc::new(Mutex::new(entries.into_iter().map(Ok).collect())),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a failing fetch, surfaced as an upstream error.
    pub async fn push_failure(&self, message: &str) {
        self.results.lock().await.push_back(Err(message.to_string()));
    }

    /// Dates passed to every `fetch` call, in order.
    pub async fn requested_dates(&self) -> Vec<Option<String>> {
        self.requested.lock().await.clone()
    }

    /// Number of `fetch` calls so far.
    pub async fn call_count(&self) -> usize {
        self.requested.lock().await.len()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApodSource for MockSource {
    fn name(&self) -> &str {
        "mock-source"
    }

    async fn fetch(&self, date: Option<&str>) -> Result<ApodEntry, ApodError> {
        self.requested.lock().await.push(date.map(str::to_string));
        match self.results.lock().await.pop_front() {
            Some(Ok(entry)) => Ok(entry),
            Some(Err(message)) => Err(ApodError::upstream(message)),
            None => Ok(sample_entry("video", "https://www.youtube.com/embed/mock")),
        }
    }
}
