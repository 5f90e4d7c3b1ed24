// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the APOD service.
//!
//! Holds the error type, the record and reply model shared by the service
//! and its clients, and the adapter traits implemented by the NASA client
//! and the image viewers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ApodError;
pub use traits::{ApodSource, ImageViewer};
pub use types::{ApodEntry, ApodRecord, ImageStatus, Reply, IMAGE_MEDIA_TYPE, NO_URL};
