//! Control session loop
//!
//! Drives one accepted control connection: reads newline-terminated
//! commands and hands each to the request handler until the client
//! disconnects or the control channel itself fails. A rejected or failed
//! request never ends the session; the client may immediately try again.

use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

use crate::protocol::handle_request;
use crate::server::ServerConfig;

/// Handles one control session from accept to close.
///
/// Exits on client disconnect (zero-byte read) or on a control-channel I/O
/// failure; in both cases the connection is dropped and the session's
/// resources go with it. No per-request state survives between commands.
pub async fn handle_session(stream: TcpStream, peer: SocketAddr, config: Arc<ServerConfig>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => {
                info!("Connection closed by client {}", peer);
                break;
            }
            Ok(_) => match handle_request(&line, &mut write_half, peer, &config).await {
                Ok(result) => {
                    info!("Exchange with {}: {}", peer, result);
                }
                Err(e) => {
                    error!("Control channel to {} failed: {}", peer, e);
                    break;
                }
            },
            Err(e) => {
                error!("Failed to read from {}: {}", peer, e);
                break;
            }
        }
    }

    info!("Session with {} closed", peer);
}
