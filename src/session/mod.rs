//! Control-session handling
//!
//! One session per accepted control connection, alive until the client
//! disconnects or the control channel fails.

pub mod handler;

pub use handler::handle_session;
