//! Server core
//!
//! Owns the control listener: bound once at startup, closed when the process
//! exits, accepting control connections in between with one spawned session
//! per client.

use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::error::ServerError;
use crate::server::config::ServerConfig;
use crate::session::handle_session;

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Validates the served root and binds the control listener.
    ///
    /// Any failure here is fatal to the process: nothing has been served yet
    /// and there is no client to report to.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let metadata = tokio::fs::metadata(&config.server_root)
            .await
            .map_err(|e| ServerError::RootUnavailable(config.server_root.clone(), e))?;
        if !metadata.is_dir() {
            return Err(ServerError::RootNotADirectory(config.server_root.clone()));
        }

        let addr = config.control_socket();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind(addr.clone(), e))?;

        info!(
            "Server bound to {}, serving {}",
            addr,
            config.server_root.display()
        );

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// The address the control listener actually bound, with the real port
    /// when the configured one was 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts control connections until the process is stopped.
    ///
    /// Sessions are independent and share nothing mutable beyond the
    /// configuration, so no bookkeeping is kept across them. Accept errors
    /// are logged and the loop continues.
    pub async fn run(&self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("Control connection from {}", addr);
                    let config = Arc::clone(&self.config);

                    // One task per control connection so the accept loop never blocks
                    tokio::spawn(async move {
                        handle_session(stream, addr, config).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
