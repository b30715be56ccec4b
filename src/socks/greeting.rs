//! SOCKS5 greeting (method negotiation)
//!
//! The server only speaks the "no authentication" method, so the offered
//! method list is consumed and ignored.

use super::consts::*;
use super::frame::{read_array, read_vec, write_frame};
use crate::error::Socks5Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

/// Handle the client greeting
///
/// # SOCKS5 Greeting Format
///
/// ```text
/// +----+----------+----------+
/// |VER | NMETHODS | METHODS  |
/// +----+----------+----------+
/// | 1  |    1     | 1 to 255 |
/// +----+----------+----------+
/// ```
///
/// Replies `[0x05, 0x00]` regardless of the methods offered. A version
/// other than 5 fails before anything is written.
pub async fn handle_greeting<S>(stream: &mut S) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let [version, num_methods] = read_array::<_, 2>(stream, "reading greeting header").await?;

    if version != SOCKS5_VERSION {
        return Err(Socks5Error::UnsupportedVersion(version));
    }

    let methods = read_vec(stream, num_methods as usize, "reading greeting methods").await?;
    debug!("Client offered {} auth method(s): {:?}", methods.len(), methods);

    write_frame(
        stream,
        &[SOCKS5_VERSION, SOCKS5_AUTH_METHOD_NONE],
        "writing greeting reply",
    )
    .await
}
