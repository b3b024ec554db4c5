//! Data-channel transfer
//!
//! Opens the per-request outbound data connection and streams payloads over
//! it, one connection per request.

pub mod data_channel;
pub mod file_ops;

pub use data_channel::open_data_channel;
pub use file_ops::{stream_file, stream_payload};
