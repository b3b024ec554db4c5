//! Server configuration
//!
//! Loaded from an optional `ftserver.toml` with `FTSERVER_*` environment
//! overrides; every field has a default, so the server runs with no file
//! present. The listening port is not a file key: it comes from the command
//! line and is injected after loading.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the control listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Directory whose contents are served. Must exist at startup.
    #[serde(default = "default_server_root")]
    pub server_root: PathBuf,

    /// Chunk size for payload streaming.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Bound on each outbound data-channel connect attempt.
    #[serde(default = "default_data_connect_timeout_secs")]
    pub data_connect_timeout_secs: u64,

    /// Control listener port, injected from the command line.
    #[serde(skip)]
    pub port: u16,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_server_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_buffer_size() -> usize {
    8192
}

fn default_data_connect_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            server_root: default_server_root(),
            buffer_size: default_buffer_size(),
            data_connect_timeout_secs: default_data_connect_timeout_secs(),
            port: 0,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `ftserver.toml` (if present) with environment
    /// overrides, then inject the listening port from the command line.
    pub fn load(port: u16) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("ftserver").required(false))
            .add_source(Environment::with_prefix("FTSERVER"))
            .build()?;

        let mut config: ServerConfig = settings.try_deserialize()?;
        config.port = port;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }
        if self.data_connect_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "data_connect_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Get bind address and control port as a socket address string
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the data-channel connect timeout as a Duration
    pub fn data_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.data_connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.server_root, PathBuf::from("."));
        assert_eq!(config.buffer_size, 8192);
        assert_eq!(config.data_connect_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_buffer_size() {
        let config = ServerConfig {
            buffer_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ServerConfig {
            data_connect_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_control_socket_format() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 4040,
            ..Default::default()
        };
        assert_eq!(config.control_socket(), "127.0.0.1:4040");
    }
}
