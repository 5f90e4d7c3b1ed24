// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the service's two external seams.
//!
//! Both use `#[async_trait]` so the service can hold them as trait objects.

pub mod source;
pub mod viewer;

pub use source::ApodSource;
pub use viewer::ImageViewer;
