//! Module `request`
//!
//! Defines the validated request model for the control-channel protocol and
//! the per-request outcome reported back to the session loop.

use std::fmt;

use crate::error::RequestError;

/// Maximum accepted control message length in bytes, after the trailing line
/// terminator is stripped.
pub const MAX_COMMAND_LEN: usize = 255;

/// Maximum number of space-delimited tokens in a control message.
pub const MAX_TOKENS: usize = 3;

/// Lowest data port a client may advertise. Ports below this are reserved;
/// the upper bound is u16::MAX. The same floor applies to the server's own
/// listening port.
pub const DATA_PORT_MIN: u16 = 1024;

/// What the client asked the server to send.
///
/// The filename travels inside `Get` so a request with an operation that
/// needs a filename but lacks one cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Stream a listing of the served directory.
    List,
    /// Stream the named file from the served directory.
    Get(String),
}

/// One validated control-channel command.
///
/// Only the parser constructs these, and only after every field has been
/// validated; a `Request` is never partially valid. It lives for the duration
/// of one exchange and carries no state between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Client-advertised port the data connection will be opened to.
    pub data_port: u16,
    pub operation: Operation,
}

/// Outcome of one control-channel exchange.
///
/// Both variants mean the exchange ran to completion from the session's point
/// of view: a `Failed` outcome has already been reported to the client and
/// the control connection remains usable.
#[derive(Debug)]
pub enum TransferResult {
    /// Payload fully streamed and the data channel closed.
    Completed { bytes: u64 },
    /// The request was rejected or the transfer broke off.
    Failed(RequestError),
}

impl TransferResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferResult::Completed { .. })
    }
}

impl fmt::Display for TransferResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferResult::Completed { bytes } => write!(f, "completed ({} bytes)", bytes),
            TransferResult::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}
