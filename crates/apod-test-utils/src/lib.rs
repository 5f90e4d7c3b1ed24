// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the APOD service.
//!
//! Provides mock implementations of the source and viewer adapters so the
//! dispatcher and presenter can be exercised without api.nasa.gov or a display.

pub mod mock_source;
pub mod mock_viewer;

pub use mock_source::{sample_entry, MockSource};
pub use mock_viewer::{MockViewer, ShownImage};
