//! SOCKS5 request parser
//!
//! Parses the CONNECT request that follows the greeting.

use crate::error::Socks5Error;
use crate::socks::consts::*;
use crate::socks::frame::{read_array, read_vec};
use crate::socks::types::{SocksCommand, TargetAddr};
use std::net::Ipv4Addr;
use tokio::io::AsyncRead;

/// Parse a SOCKS5 request from the stream
///
/// # SOCKS5 Request Format
///
/// ```text
/// +----+-----+-------+------+----------+----------+
/// |VER | CMD |  RSV  | ATYP | DST.ADDR | DST.PORT |
/// +----+-----+-------+------+----------+----------+
/// | 1  |  1  | X'00' |  1   | Variable |    2     |
/// +----+-----+-------+------+----------+----------+
/// ```
///
/// Only CONNECT is accepted. BIND and UDP ASSOCIATE are rejected right
/// after the header, before any address bytes are consumed. Domain names
/// are returned unresolved.
pub async fn parse_request<S>(stream: &mut S) -> Result<TargetAddr, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    // Read: VER CMD RSV ATYP
    let [version, cmd_byte, _reserved, addr_type] =
        read_array::<_, 4>(stream, "reading request header").await?;

    if version != SOCKS5_VERSION {
        return Err(Socks5Error::UnsupportedVersion(version));
    }

    match SocksCommand::from_byte(cmd_byte) {
        Some(SocksCommand::Connect) => {}
        Some(other) => {
            tracing::debug!("Rejecting {} request", other);
            return Err(Socks5Error::CommandNotSupported(cmd_byte));
        }
        None => return Err(Socks5Error::CommandNotSupported(cmd_byte)),
    }

    let target = parse_address(stream, addr_type).await?;

    tracing::debug!("Parsed SOCKS5 CONNECT request to {}", target);

    Ok(target)
}

/// Parse the address and port portion of a SOCKS5 request
async fn parse_address<S>(stream: &mut S, addr_type: u8) -> Result<TargetAddr, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    match addr_type {
        SOCKS5_ADDR_TYPE_IPV4 => {
            let addr = read_array::<_, 4>(stream, "reading IPv4 address").await?;
            let port = read_port(stream).await?;
            Ok(TargetAddr::ipv4(Ipv4Addr::from(addr), port))
        }

        SOCKS5_ADDR_TYPE_DOMAIN => {
            let [domain_len] = read_array::<_, 1>(stream, "reading domain length").await?;

            // A zero-length name is passed through; the dial rejects it
            let domain_buf = read_vec(stream, domain_len as usize, "reading domain name").await?;
            let domain = String::from_utf8(domain_buf).map_err(|e| {
                Socks5Error::InvalidDomain(String::from_utf8_lossy(e.as_bytes()).into_owned())
            })?;

            let port = read_port(stream).await?;
            Ok(TargetAddr::domain(domain, port))
        }

        SOCKS5_ADDR_TYPE_IPV6 => Err(Socks5Error::UnsupportedFeature("IPv6 address type")),

        _ => Err(Socks5Error::InvalidAddressType(addr_type)),
    }
}

async fn read_port<S>(stream: &mut S) -> Result<u16, Socks5Error>
where
    S: AsyncRead + Unpin,
{
    let port_buf = read_array::<_, 2>(stream, "reading port").await?;
    Ok(u16::from_be_bytes(port_buf))
}
