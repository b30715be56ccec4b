//! Fixed and length-prefixed frame IO
//!
//! Every read either yields the exact number of bytes requested or fails
//! with [`Socks5Error::Io`]; a peer closing mid-frame surfaces as an
//! `UnexpectedEof` source.

use crate::error::Socks5Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read exactly `N` bytes
pub async fn read_array<S, const N: usize>(
    stream: &mut S,
    context: &'static str,
) -> Result<[u8; N], Socks5Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; N];
    stream
        .read_exact(&mut buf)
        .await
        .map_err(|e| Socks5Error::io(context, e))?;
    Ok(buf)
}

/// Read exactly `len` bytes into a freshly allocated buffer
pub async fn read_vec<S>(
    stream: &mut S,
    len: usize,
    context: &'static str,
) -> Result<Vec<u8>, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; len];
    stream
        .read_exact(&mut buf)
        .await
        .map_err(|e| Socks5Error::io(context, e))?;
    Ok(buf)
}

/// Write a whole frame and flush it
pub async fn write_frame<S>(
    stream: &mut S,
    frame: &[u8],
    context: &'static str,
) -> Result<(), Socks5Error>
where
    S: AsyncWrite + Unpin,
{
    stream
        .write_all(frame)
        .await
        .map_err(|e| Socks5Error::io(context, e))?;
    stream
        .flush()
        .await
        .map_err(|e| Socks5Error::io(context, e))
}
