//! Control-channel protocol
//!
//! Command parsing and validation, response formatting, and the handler
//! that drives one request/response exchange.

pub mod handlers;
pub mod parser;
pub mod request;
pub mod responses;

pub use handlers::handle_request;
pub use parser::parse_request;
pub use request::{Operation, Request, TransferResult};
