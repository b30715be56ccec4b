//! Main SOCKS5 handler
//!
//! This module provides the per-connection entry point. It runs the
//! greeting, request, dial, reply and relay stages in order; any stage
//! failing aborts the connection.

use crate::error::Socks5Error;
use crate::socks::command::{parse_request, send_dial_failure, send_success};
use crate::socks::greeting::handle_greeting;
use crate::socks::tcp_relay::relay_tcp;
use crate::transport::Connector;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

/// Handle SOCKS5 protocol on a client stream
///
/// # Protocol Flow
///
/// 1. Greeting ("no authentication" is always selected)
/// 2. CONNECT request parsing
/// 3. Outbound dial through `connector`
/// 4. Success reply
/// 5. Bidirectional relay until either side closes
///
/// On a dial failure a failure reply is attempted before returning. Every
/// other error returns without writing anything further. The client stream
/// is dropped, and therefore closed, when this function returns.
pub async fn handle_socks5_on_stream<S, C>(mut stream: S, connector: &C) -> Result<(), Socks5Error>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    C: Connector + ?Sized,
{
    handle_greeting(&mut stream).await?;

    let target = parse_request(&mut stream).await?;

    info!("SOCKS5 CONNECT request to {}", target);

    let outbound = match connector.connect(&target).await {
        Ok(outbound) => outbound,
        Err(e) => {
            if let Socks5Error::Dial { source, .. } = &e {
                if let Err(reply_err) = send_dial_failure(&mut stream, source).await {
                    debug!("Failed to send failure reply: {}", reply_err);
                }
            }
            return Err(e);
        }
    };

    if let Err(e) = send_success(&mut stream).await {
        drop(outbound);
        return Err(e);
    }

    info!("SOCKS5 relay established to {}", target);

    let outcome = relay_tcp(stream, outbound).await;
    debug!("Relay to {} ended on {}", target, outcome.finished);

    Ok(())
}
