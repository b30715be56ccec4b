//! Test utilities for Minisocks
//!
//! This module provides common helpers used across integration tests.

#![allow(dead_code)]

use minisocks::config::ServerConfig;
use minisocks::server::Server;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Create a test TCP listener on an available port
pub async fn create_test_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Spawn an echo server that serves any number of connections
pub async fn spawn_echo_server() -> SocketAddr {
    let (listener, addr) = create_test_listener().await;
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let (mut reader, mut writer) = socket.split();
                let _ = tokio::io::copy(&mut reader, &mut writer).await;
            });
        }
    });
    addr
}

/// Handle to a running proxy
pub struct TestProxy {
    /// Address the proxy listens on
    pub addr: SocketAddr,
    /// Shutdown sender
    pub shutdown_tx: broadcast::Sender<bool>,
    /// Accept loop task
    pub handle: JoinHandle<anyhow::Result<()>>,
}

/// Start a proxy on an ephemeral loopback port
pub async fn spawn_proxy() -> TestProxy {
    spawn_proxy_with(ServerConfig::default()).await
}

/// Start a proxy with custom settings on an ephemeral loopback port
pub async fn spawn_proxy_with(config: ServerConfig) -> TestProxy {
    let config = ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..config
    };
    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let handle = tokio::spawn(server.run(shutdown_rx));

    TestProxy {
        addr,
        shutdown_tx,
        handle,
    }
}

/// Connect to the proxy and complete the greeting
pub async fn connect_and_greet(proxy: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(proxy).await.unwrap();
    stream
        .write_all(&socks5_mock::create_greeting_no_auth())
        .await
        .unwrap();
    let mut reply = [0u8; 2];
    stream.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [0x05, 0x00]);
    stream
}

/// Read until the proxy closes the connection
///
/// The proxy may close with bytes of a rejected frame still unread, in
/// which case the kernel sends a reset instead of FIN. Both count as closed.
pub async fn read_until_closed(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut buf))
        .await
        .expect("connection not closed");
    match read {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::ConnectionReset => {}
        Err(e) => panic!("Unexpected read error: {}", e),
    }
    buf
}

/// Complete greeting and CONNECT through the proxy to `target`
pub async fn connect_through(proxy: SocketAddr, target: SocketAddr) -> TcpStream {
    let mut stream = connect_and_greet(proxy).await;

    let ip = match target.ip() {
        std::net::IpAddr::V4(ip) => ip.octets(),
        std::net::IpAddr::V6(_) => panic!("IPv4 target required"),
    };
    stream
        .write_all(&socks5_mock::create_connect_ipv4(ip, target.port()))
        .await
        .unwrap();

    let mut reply = [0u8; 10];
    stream.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [0x05, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0]);
    stream
}

/// Mock SOCKS5 frames
pub mod socks5_mock {
    use minisocks::socks::*;

    /// Create a greeting offering only "no authentication"
    pub fn create_greeting_no_auth() -> Vec<u8> {
        vec![SOCKS5_VERSION, 1, SOCKS5_AUTH_METHOD_NONE]
    }

    /// Create a connect command to IPv4 address
    pub fn create_connect_ipv4(ip: [u8; 4], port: u16) -> Vec<u8> {
        let mut cmd = vec![
            SOCKS5_VERSION,
            SOCKS5_CMD_TCP_CONNECT,
            SOCKS5_RESERVED,
            SOCKS5_ADDR_TYPE_IPV4,
        ];
        cmd.extend_from_slice(&ip);
        cmd.extend_from_slice(&port.to_be_bytes());
        cmd
    }

    /// Create a connect command to domain
    pub fn create_connect_domain(domain: &str, port: u16) -> Vec<u8> {
        let mut cmd = vec![
            SOCKS5_VERSION,
            SOCKS5_CMD_TCP_CONNECT,
            SOCKS5_RESERVED,
            SOCKS5_ADDR_TYPE_DOMAIN,
            domain.len() as u8,
        ];
        cmd.extend_from_slice(domain.as_bytes());
        cmd.extend_from_slice(&port.to_be_bytes());
        cmd
    }
}
