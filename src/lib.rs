//! # Minisocks - Minimal SOCKS5 Proxy Server
//!
//! Minisocks accepts TCP connections, negotiates SOCKS5 (RFC 1928), dials
//! the requested destination and relays bytes in both directions until
//! either side closes.
//!
//! ## Features
//!
//! - **No authentication**: the "no authentication required" method is always selected
//! - **CONNECT only**: BIND and UDP ASSOCIATE are rejected
//! - **IPv4 and domain targets**: domain names are resolved when dialed
//! - **Task per connection**: failures are isolated to the connection that caused them
//!
//! ## Usage
//!
//! ```rust,ignore
//! use minisocks::config::ServerConfig;
//! use minisocks::server::run_server;
//! use tokio::sync::broadcast;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
//!
//!     run_server(ServerConfig::default(), shutdown_rx).await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! greeting -> request -> dial -> reply -> relay
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod server;
pub mod socks;
pub mod transport;

// Re-export commonly used items
pub use config::{load_config, Config, ServerConfig};
pub use error::{ErrorKind, Socks5Error};
pub use server::{run_server, Server};

/// Version of the Minisocks library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the application
pub const NAME: &str = env!("CARGO_PKG_NAME");
