//! Request handling
//!
//! Drives one control-channel exchange end to end: parse the command, send
//! the acknowledgment, open the data channel back to the client, stream the
//! payload, and close the exchange with exactly one outcome line.

use log::{error, info, warn};
use std::io;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;

use crate::error::RequestError;
use crate::protocol::parser::parse_request;
use crate::protocol::request::{Operation, Request, TransferResult};
use crate::protocol::responses;
use crate::server::ServerConfig;
use crate::storage::{list_directory, open_file, render_listing};
use crate::transfer::{open_data_channel, stream_file, stream_payload};

/// Handles one control-channel exchange.
///
/// The `Ok` value is the outcome of the exchange; whatever it is, it has
/// already been reported to the client and the control connection is still
/// usable for the next command. The outer `Err` is a failure writing to the
/// control channel itself, which the session loop treats as session-fatal.
pub async fn handle_request(
    raw: &[u8],
    control: &mut OwnedWriteHalf,
    peer: SocketAddr,
    config: &ServerConfig,
) -> io::Result<TransferResult> {
    // 1. Parse and validate. A rejected command is reported and recovered;
    //    no data connection is attempted for it.
    let request = match parse_request(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected command from {}: {}", peer, e);
            let failure = RequestError::from(e);
            control
                .write_all(responses::failure(&failure).as_bytes())
                .await?;
            return Ok(TransferResult::Failed(failure));
        }
    };

    info!("Request from {}: {:?}", peer, request);

    // 2. Acknowledge before connecting, so the client is already expecting
    //    the inbound data connection when the attempt is made.
    control
        .write_all(responses::acknowledgment(&request).as_bytes())
        .await?;
    control.flush().await?;

    // 3. Open the data channel, stream the payload, close the data channel,
    //    then report. The transfer owns the data connection and closes it
    //    before returning, so the outcome line always follows the close.
    let outcome = match run_transfer(&request, peer, config).await {
        Ok(bytes) => {
            control
                .write_all(responses::success(bytes).as_bytes())
                .await?;
            TransferResult::Completed { bytes }
        }
        Err(failure) => {
            match &failure {
                RequestError::DataConnectFailed(_) | RequestError::Io(_) => {
                    error!("Request from {} failed: {}", peer, failure)
                }
                _ => warn!("Request from {} failed: {}", peer, failure),
            }
            control
                .write_all(responses::failure(&failure).as_bytes())
                .await?;
            TransferResult::Failed(failure)
        }
    };
    control.flush().await?;

    Ok(outcome)
}

/// Produces the payload for a validated request and streams it over a fresh
/// data connection opened to the client's advertised port.
async fn run_transfer(
    request: &Request,
    peer: SocketAddr,
    config: &ServerConfig,
) -> Result<u64, RequestError> {
    let data_addr = SocketAddr::new(peer.ip(), request.data_port);
    let data_stream = open_data_channel(data_addr, config.data_connect_timeout()).await?;

    match &request.operation {
        Operation::List => {
            let entries = match list_directory(&config.server_root).await {
                Ok(entries) => entries,
                Err(e) => return Err(close_unused(data_stream, e.into()).await),
            };
            let listing = render_listing(&entries);
            Ok(stream_payload(data_stream, listing.as_bytes()).await?)
        }
        Operation::Get(filename) => {
            let file = match open_file(&config.server_root, filename).await {
                Ok(file) => file,
                Err(e) => return Err(close_unused(data_stream, e.into()).await),
            };
            Ok(stream_file(data_stream, file, config.buffer_size).await?)
        }
    }
}

/// Closes a data connection no payload will be written to and passes the
/// failure on, keeping the close-before-status ordering uniform.
async fn close_unused(mut data_stream: TcpStream, failure: RequestError) -> RequestError {
    let _ = data_stream.shutdown().await;
    failure
}
