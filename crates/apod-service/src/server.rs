// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ZeroMQ reply-socket loop.

use apod_core::{ApodError, Reply};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use zeromq::{RepSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::dispatch::ApodService;

/// A bound REP socket serving one request at a time.
pub struct ApodServer {
    socket: RepSocket,
    endpoint: String,
    service: ApodService,
}

impl ApodServer {
    /// Binds the reply socket. A port of 0 picks a free port; see [`endpoint`](Self::endpoint).
    pub async fn bind(endpoint: &str, service: ApodService) -> Result<Self, ApodError> {
        let mut socket = RepSocket::new();
        let bound = socket
            .bind(endpoint)
            .await
            .map_err(|e| ApodError::Transport {
                message: format!("failed to bind {endpoint}: {e}"),
                source: Some(Box::new(e)),
            })?;
        let endpoint = bound.to_string();
        info!(endpoint = %endpoint, tag = %service.tag(), "APOD service listening");
        Ok(Self {
            socket,
            endpoint,
            service,
        })
    }

    /// The resolved endpoint the socket is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Receives, dispatches, and replies until `shutdown` is cancelled.
    ///
    /// Cancellation is only observed while waiting for a request, so an
    /// in-flight request is always answered first.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<(), ApodError> {
        loop {
            let request = tokio::select! {
                received = self.socket.recv() => received.map_err(|e| ApodError::Transport {
                    message: format!("receive failed: {e}"),
                    source: Some(Box::new(e)),
                })?,
                _ = shutdown.cancelled() => {
                    info!("shutdown signal received, stopping APOD service");
                    break;
                }
            };

            let frame = request.get(0).map(|b| &b[..]).unwrap_or_default();
            debug!(bytes = frame.len(), "request received");

            let reply = self.service.handle(frame).await;
            self.send(&reply).await?;
            debug!(status = reply.status(), "reply sent");
        }

        info!("APOD service stopped");
        Ok(())
    }

    async fn send(&mut self, reply: &Reply) -> Result<(), ApodError> {
        let bytes = reply.to_bytes()?;
        self.socket
            .send(ZmqMessage::from(bytes))
            .await
            .map_err(|e| ApodError::Transport {
                message: format!("send failed: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
