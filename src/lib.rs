//! A minimal two-channel file-transfer server.
//!
//! A client sends one-line commands over a persistent control connection
//! (`<data port> -l` for a directory listing, `<data port> -g <filename>`
//! for a file) and the server streams the payload back over a fresh
//! outbound connection to the advertised port, closing it when the payload
//! ends. The control connection stays open for the next command.

pub mod error;
pub mod protocol;
pub mod server;
pub mod session;
pub mod storage;
pub mod transfer;

pub use server::{Server, ServerConfig};
