//! ft-server - Entry Point
//!
//! Binds the control listener on the port given on the command line and
//! serves listing and file requests until interrupted.

use clap::Parser;
use log::info;

use ft_server::server::{Server, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "ft-server",
    version,
    about = "Minimal two-channel file transfer server"
)]
struct Cli {
    /// Port to listen on for control connections.
    #[arg(value_parser = clap::value_parser!(u16).range(1024..=65535))]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let cli = Cli::parse();

    let config = match ServerConfig::load(cli.port) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ft-server: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("ft-server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Server open on port {}", cli.port);
    server.run().await;
}
