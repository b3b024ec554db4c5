//! Error handling
//!
//! Defines error types for the transfer server.

pub mod types;

pub use types::*;
