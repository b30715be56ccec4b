//! SOCKS5 module for Minisocks
//!
//! This module implements the server side of RFC 1928, restricted to the
//! "no authentication" method, the CONNECT command, and IPv4 or domain-name
//! targets.

mod command;
mod consts;
mod frame;
mod greeting;
mod handler;
mod tcp_relay;
mod types;

pub use command::{build_reply, parse_request, send_dial_failure, send_success};
pub use consts::*;
pub use frame::{read_array, read_vec, write_frame};
pub use greeting::handle_greeting;
pub use handler::handle_socks5_on_stream;
pub use tcp_relay::{relay_tcp, Direction, RelayOutcome};
pub use types::{SocksCommand, TargetAddr};
