//! Server core functionality
//!
//! The listening/accept loop and the configuration it runs with.

pub mod config;
pub mod core;

pub use config::ServerConfig;
pub use core::Server;
