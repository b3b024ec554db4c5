//! Data channel setup
//!
//! Opens the per-request outbound connection to the client's advertised data
//! port. One attempt, bounded by the configured timeout; there is no retry,
//! a failed attempt is reported back over the control channel instead.

use log::{error, info};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::DataChannelError;

/// Connects to the client's data port, giving up after `connect_timeout`.
///
/// The returned stream carries exactly one payload; the caller closes it
/// before completing the exchange it belongs to.
pub async fn open_data_channel(
    addr: SocketAddr,
    connect_timeout: Duration,
) -> Result<TcpStream, DataChannelError> {
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            info!("Data connection established to {}", addr);
            Ok(stream)
        }
        Ok(Err(e)) => {
            error!("Failed to connect to client data port {}: {}", addr, e);
            Err(DataChannelError::ConnectFailed(addr, e))
        }
        Err(_) => {
            error!(
                "Connect to client data port {} timed out after {:?}",
                addr, connect_timeout
            );
            Err(DataChannelError::Timeout(addr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connects_to_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (stream, accepted) = tokio::join!(
            open_data_channel(addr, Duration::from_secs(1)),
            listener.accept()
        );
        assert!(stream.is_ok());
        assert!(accepted.is_ok());
    }

    #[tokio::test]
    async fn test_refused_port_reports_connect_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        match open_data_channel(addr, Duration::from_secs(1)).await {
            Err(DataChannelError::ConnectFailed(failed_addr, _)) => assert_eq!(failed_addr, addr),
            other => panic!("expected connect failure, got {:?}", other),
        }
    }
}
