// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/reply service for Astronomy Picture of the Day lookups.
//!
//! [`ApodServer`] owns a ZeroMQ REP socket and hands each frame to
//! [`ApodService`], which parses the command, fetches the record through an
//! [`ApodSource`](apod_core::ApodSource), optionally shows the image, and
//! produces a [`Reply`](apod_core::Reply). Requests are handled strictly one
//! at a time.

pub mod command;
pub mod dispatch;
pub mod server;
pub mod shutdown;

pub use command::{parse_command, Command, CommandError};
pub use dispatch::ApodService;
pub use server::ApodServer;
pub use shutdown::install_signal_handler;
