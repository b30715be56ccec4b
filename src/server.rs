//! SOCKS5 accept loop
//!
//! Accepts client connections and hands each one to its own task. A failing
//! connection is logged and never affects the listener or other connections.

use crate::config::ServerConfig;
use crate::error::ErrorKind;
use crate::socks::handle_socks5_on_stream;
use crate::transport::{SocketOpts, TcpConnector};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, info, warn};

/// SOCKS5 server bound to a listening socket
pub struct Server {
    /// Server configuration
    config: ServerConfig,
    /// Listening socket
    listener: TcpListener,
    /// Outbound connector shared by all connection tasks
    connector: Arc<TcpConnector>,
    /// Bound on concurrent connections, if configured
    limiter: Option<Arc<Semaphore>>,
    /// Socket options for accepted client connections
    client_opts: SocketOpts,
}

impl Server {
    /// Validate the configuration and bind the listening socket
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

        let socket_opts = SocketOpts::from_tcp_config(&config.tcp);
        let connector = TcpConnector::with_defaults()
            .with_socket_opts(socket_opts.clone())
            .with_connect_timeout(config.connect_timeout());
        let limiter = config
            .max_connections
            .map(|max| Arc::new(Semaphore::new(max)));

        Ok(Server {
            config,
            listener,
            connector: Arc::new(connector),
            limiter,
            client_opts: socket_opts,
        })
    }

    /// Address the server is actually listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .with_context(|| "Failed to read listener address")
    }

    /// Accept connections until a shutdown signal arrives
    ///
    /// Connections already being served keep running after shutdown and end
    /// on their own.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<bool>) -> Result<()> {
        info!("SOCKS5 server listening on {}", self.local_addr()?);
        if let Some(max) = self.config.max_connections {
            info!("Serving at most {} concurrent connections", max);
        }

        loop {
            tokio::select! {
                accepted = self.next_connection() => {
                    match accepted {
                        Ok((stream, peer, permit)) => self.spawn_connection(stream, peer, permit),
                        Err(e) => warn!("Accept failed: {:#}", e),
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        info!("Server stopped");
        Ok(())
    }

    /// Wait for a connection slot, then for a client
    async fn next_connection(
        &self,
    ) -> Result<(TcpStream, SocketAddr, Option<OwnedSemaphorePermit>)> {
        let permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| anyhow::anyhow!("Semaphore closed"))?,
            ),
            None => None,
        };

        let (stream, peer) = self.listener.accept().await?;
        Ok((stream, peer, permit))
    }

    fn spawn_connection(
        &self,
        stream: TcpStream,
        peer: SocketAddr,
        permit: Option<OwnedSemaphorePermit>,
    ) {
        debug!("Accepted connection from {}", peer);

        if let Err(e) = self.client_opts.apply(&stream) {
            warn!("Failed to apply socket options for {}: {}", peer, e);
        }

        let connector = self.connector.clone();
        tokio::spawn(async move {
            let _permit = permit;
            match handle_socks5_on_stream(stream, connector.as_ref()).await {
                Ok(()) => debug!("Connection from {} closed", peer),
                Err(e) if e.kind() == ErrorKind::Io => {
                    debug!("Connection from {} aborted: {}", peer, e)
                }
                Err(e) => warn!("Connection from {} failed: {}", peer, e),
            }
        });
    }
}

/// Bind and run a server with the given configuration
pub async fn run_server(config: ServerConfig, shutdown_rx: broadcast::Receiver<bool>) -> Result<()> {
    let server = Server::bind(config).await?;
    if let Err(e) = server.run(shutdown_rx).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }
    Ok(())
}
