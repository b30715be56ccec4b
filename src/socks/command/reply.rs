//! SOCKS5 reply builder
//!
//! Every reply the server writes uses the IPv4 bind-address form with an
//! all-zero address and port; the server does not report its local binding.

use crate::error::{Socks5Error, Socks5ReplyCode};
use crate::socks::consts::*;
use crate::socks::frame::write_frame;
use tokio::io::AsyncWrite;

/// Build reply bytes for the given status code
///
/// # SOCKS5 Reply Format
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | REP |  RSV  | ATYP | BND.ADDR | BND.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
pub fn build_reply(reply_code: Socks5ReplyCode) -> [u8; SOCKS5_REPLY_LEN] {
    [
        SOCKS5_VERSION,
        reply_code.into(),
        SOCKS5_RESERVED,
        SOCKS5_ADDR_TYPE_IPV4,
        0,
        0,
        0,
        0,
        0,
        0,
    ]
}

/// Send the success reply after the outbound connection is up
pub async fn send_success<S>(stream: &mut S) -> Result<(), Socks5Error>
where
    S: AsyncWrite + Unpin,
{
    write_frame(
        stream,
        &build_reply(Socks5ReplyCode::Succeeded),
        "writing success reply",
    )
    .await
}

/// Send a failure reply derived from a dial error
pub async fn send_dial_failure<S>(stream: &mut S, error: &std::io::Error) -> Result<(), Socks5Error>
where
    S: AsyncWrite + Unpin,
{
    write_frame(
        stream,
        &build_reply(Socks5ReplyCode::from(error)),
        "writing failure reply",
    )
    .await
}
