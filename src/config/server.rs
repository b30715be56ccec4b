//! Server configuration types
//!
//! Defines the main configuration structures for the SOCKS5 server.

use super::TcpConfig;
use crate::socks::DEFAULT_SOCKS_PORT;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Default listen address: SOCKS port on all interfaces
fn default_listen_addr() -> String {
    format!("0.0.0.0:{}", DEFAULT_SOCKS_PORT)
}

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// SOCKS5 server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:1080")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Maximum number of concurrently served connections (unbounded if unset)
    #[serde(default)]
    pub max_connections: Option<usize>,

    /// Outbound connect timeout in seconds (no timeout if unset)
    #[serde(default)]
    pub connect_timeout: Option<u64>,

    /// TCP socket options
    #[serde(default)]
    pub tcp: TcpConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_connections: None,
            connect_timeout: None,
            tcp: TcpConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Outbound connect timeout as a duration
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(format!("Invalid listen address: {}", self.listen_addr));
        }
        if self.max_connections == Some(0) {
            return Err("max_connections must be greater than zero".to_string());
        }
        if self.connect_timeout == Some(0) {
            return Err("connect_timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
