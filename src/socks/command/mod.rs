//! SOCKS5 request handling module
//!
//! Handles parsing the CONNECT request and building replies.

mod parser;
mod reply;

pub use parser::parse_request;
pub use reply::{build_reply, send_dial_failure, send_success};
