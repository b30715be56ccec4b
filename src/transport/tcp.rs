//! Outbound TCP connector
//!
//! Dials CONNECT targets. Domain names are handed to the platform resolver
//! as part of the connect call rather than resolved up front.

use super::SocketOpts;
use crate::error::Socks5Error;
use crate::socks::TargetAddr;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// Opens outbound connections to request targets
#[async_trait]
pub trait Connector: Debug + Send + Sync + 'static {
    /// Connect to the target, failing with [`Socks5Error::Dial`]
    async fn connect(&self, target: &TargetAddr) -> Result<TcpStream, Socks5Error>;
}

/// Plain TCP connector
#[derive(Debug, Clone)]
pub struct TcpConnector {
    /// Socket options to apply to connections
    socket_opts: SocketOpts,
    /// Connection timeout; `None` waits as long as the OS does
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    /// Create a new TCP connector with default options and no timeout
    pub fn with_defaults() -> Self {
        TcpConnector {
            socket_opts: SocketOpts::default(),
            connect_timeout: None,
        }
    }

    /// Set socket options
    pub fn with_socket_opts(mut self, opts: SocketOpts) -> Self {
        self.socket_opts = opts;
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    async fn dial(&self, target: &TargetAddr) -> io::Result<TcpStream> {
        let host = target.host();
        if host.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty domain name",
            ));
        }

        let connect = TcpStream::connect((host.as_str(), target.port()));

        match self.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connection timed out"))?,
            None => connect.await,
        }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, target: &TargetAddr) -> Result<TcpStream, Socks5Error> {
        let stream = self.dial(target).await.map_err(|source| Socks5Error::Dial {
            target: target.clone(),
            source,
        })?;

        if let Err(e) = self.socket_opts.apply(&stream) {
            tracing::warn!("Failed to apply socket options: {}", e);
        }

        tracing::debug!("TCP connection established to {}", target);

        Ok(stream)
    }
}
