//! Error types
//!
//! Defines domain-specific error types for each module of the transfer server.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command parser errors
///
/// Produced only by the command parser; both variants are recoverable at the
/// session level and map onto a one-line control-channel rejection.
#[derive(Debug)]
pub enum ParseError {
    /// Malformed, overlong, or wrong-arity input. Carries the reason for logs.
    BadCommand(String),
    /// Data port token non-numeric or outside the accepted range. Carries the token.
    BadPort(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadCommand(reason) => write!(f, "invalid command: {}", reason),
            ParseError::BadPort(token) => write!(f, "invalid data port: {}", token),
        }
    }
}

impl std::error::Error for ParseError {}

/// Payload provider errors
#[derive(Debug)]
pub enum StorageError {
    /// File absent, or present but not a regular file.
    NotFound(String),
    /// Underlying filesystem failure while reading an existing entry.
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(name) => write!(f, "file not found: {}", name),
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Data channel opener errors
#[derive(Debug)]
pub enum DataChannelError {
    /// The connect attempt to the client's data port failed outright.
    ConnectFailed(SocketAddr, io::Error),
    /// The connect attempt did not complete within the configured interval.
    Timeout(SocketAddr),
}

impl DataChannelError {
    /// The address the failed connection attempt targeted.
    pub fn addr(&self) -> SocketAddr {
        match self {
            DataChannelError::ConnectFailed(addr, _) => *addr,
            DataChannelError::Timeout(addr) => *addr,
        }
    }
}

impl fmt::Display for DataChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataChannelError::ConnectFailed(addr, e) => {
                write!(f, "failed to connect to {}: {}", addr, e)
            }
            DataChannelError::Timeout(addr) => {
                write!(f, "timed out connecting to {}", addr)
            }
        }
    }
}

impl std::error::Error for DataChannelError {}

/// Request-level failure union
///
/// Every way a single control-channel exchange can fail. All variants are
/// reported to the client over the control channel and recovered at the
/// session level; none of them closes the control connection.
#[derive(Debug)]
pub enum RequestError {
    BadCommand(String),
    BadPort(String),
    NotFound(String),
    DataConnectFailed(DataChannelError),
    Io(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::BadCommand(reason) => write!(f, "bad command: {}", reason),
            RequestError::BadPort(token) => write!(f, "bad data port: {}", token),
            RequestError::NotFound(name) => write!(f, "file not found: {}", name),
            RequestError::DataConnectFailed(e) => write!(f, "data connection failed: {}", e),
            RequestError::Io(e) => write!(f, "transfer I/O error: {}", e),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<ParseError> for RequestError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::BadCommand(reason) => RequestError::BadCommand(reason),
            ParseError::BadPort(token) => RequestError::BadPort(token),
        }
    }
}

impl From<StorageError> for RequestError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(name) => RequestError::NotFound(name),
            StorageError::Io(e) => RequestError::Io(e),
        }
    }
}

impl From<DataChannelError> for RequestError {
    fn from(error: DataChannelError) -> Self {
        RequestError::DataConnectFailed(error)
    }
}

impl From<io::Error> for RequestError {
    fn from(error: io::Error) -> Self {
        RequestError::Io(error)
    }
}

/// Startup-fatal server errors
///
/// Unlike [`RequestError`], these abort the whole process: nothing has been
/// served yet and there is no client to report to.
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    RootUnavailable(PathBuf, io::Error),
    RootNotADirectory(PathBuf),
    Bind(String, io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "configuration error: {}", e),
            ServerError::RootUnavailable(path, e) => {
                write!(f, "served root {} unavailable: {}", path.display(), e)
            }
            ServerError::RootNotADirectory(path) => {
                write!(f, "served root {} is not a directory", path.display())
            }
            ServerError::Bind(addr, e) => write!(f, "failed to bind {}: {}", addr, e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}
