// SPDX-FileCopyrightText: 2026 APOD Service Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `apod client` command implementation.
//!
//! Interactive test client: each line typed is sent verbatim on a REQ
//! socket and the single reply is printed. A reply that does not follow
//! the wire contract ends the session with an error.

use apod_config::ApodConfig;
use apod_core::{ApodError, Reply};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

/// Endpoint the client connects to: `client.host` with `service.port`.
pub fn client_endpoint(config: &ApodConfig) -> String {
    format!("tcp://{}:{}", config.client.host, config.service.port)
}

/// Runs the `apod client` interactive loop.
pub async fn run_client(config: ApodConfig) -> Result<(), ApodError> {
    crate::init_tracing("warn");

    let endpoint = client_endpoint(&config);
    let mut socket = ReqSocket::new();
    socket
        .connect(&endpoint)
        .await
        .map_err(|e| ApodError::Transport {
            message: format!("failed to connect to {endpoint}: {e}"),
            source: Some(Box::new(e)),
        })?;
    debug!(endpoint = %endpoint, "connected");

    let mut rl = DefaultEditor::new()
        .map_err(|e| ApodError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{} {}", "apod client".bold().green(), endpoint.dimmed());
    println!(
        "Prefix requests with {} (add a date or {} as needed). Type {} to exit.\n",
        config.service.tag.yellow(),
        "text".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "apod".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(&line);
                }

                let reply = exchange(&mut socket, line).await?;
                println!("{}\n", render_reply(&reply));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}

/// Sends one message and waits for its reply.
async fn exchange(socket: &mut ReqSocket, message: String) -> Result<Reply, ApodError> {
    socket
        .send(ZmqMessage::from(message))
        .await
        .map_err(|e| ApodError::Transport {
            message: format!("send failed: {e}"),
            source: Some(Box::new(e)),
        })?;
    let reply = socket.recv().await.map_err(|e| ApodError::Transport {
        message: format!("receive failed: {e}"),
        source: Some(Box::new(e)),
    })?;
    decode_reply(reply.get(0).map(|b| &b[..]).unwrap_or_default())
}

/// Decodes a reply frame. Anything without a known `status` is a protocol error.
pub fn decode_reply(frame: &[u8]) -> Result<Reply, ApodError> {
    Reply::from_bytes(frame)
}

/// Formats a reply for the terminal.
pub fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::InvalidRequest => format!("{}", reply.status().yellow()),
        Reply::Error { message } => format!("{}: {message}", reply.status().red()),
        Reply::Success { apod, image_status } => [
            format!("{}", apod.title.bold()),
            format!("{} {}", "date:".dimmed(), apod.date),
            format!("{} {}", "url:".dimmed(), apod.url),
            format!("{} {}", "image:".dimmed(), image_status.to_string().cyan()),
            String::new(),
            apod.explanation.clone(),
        ]
        .join("\n"),
    }
}
