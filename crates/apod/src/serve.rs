// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `apod serve` command implementation.
//!
//! Wires the NASA source and image presenter into the request dispatcher,
//! binds the reply socket, and serves until SIGINT or SIGTERM.

use std::sync::Arc;

use apod_config::ApodConfig;
use apod_core::{ApodError, ApodSource};
use apod_nasa::NasaSource;
use apod_presenter::ImagePresenter;
use apod_service::{install_signal_handler, ApodServer, ApodService};
use tracing::info;

/// Runs the `apod serve` command.
pub async fn run_serve(config: ApodConfig) -> Result<(), ApodError> {
    crate::init_tracing(&config.service.log_level);

    let tag = config
        .service
        .tag_char()
        .ok_or_else(|| ApodError::Config(format!("invalid service tag `{}`", config.service.tag)))?;

    let source: Arc<dyn ApodSource> = Arc::new(NasaSource::new(&config.nasa)?);
    let presenter = ImagePresenter::new(&config.presenter)?;
    let service = ApodService::new(tag, source, presenter);

    let server = ApodServer::bind(&config.service.bind_endpoint(), service).await?;
    let shutdown = install_signal_handler();

    info!(endpoint = server.endpoint(), "waiting for requests");
    server.run(shutdown).await
}
