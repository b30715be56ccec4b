//! TCP relay for SOCKS5 CONNECT command
//!
//! Copies bytes between the client and the outbound connection until either
//! direction ends, then closes both streams.

use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Relay direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client to outbound target
    ClientToTarget,
    /// Outbound target to client
    TargetToClient,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ClientToTarget => write!(f, "client->target"),
            Direction::TargetToClient => write!(f, "target->client"),
        }
    }
}

/// How a relay ended
#[derive(Debug)]
pub struct RelayOutcome {
    /// Direction that finished first
    pub finished: Direction,
    /// Bytes copied in that direction, or the error that stopped it
    pub result: std::io::Result<u64>,
}

/// Relay data bidirectionally between the client and target streams
///
/// Both directions are copied concurrently. When one of them hits EOF or
/// an error the other copy is dropped and both streams are shut down and
/// closed, so a peer blocked on the other stream observes EOF promptly.
pub async fn relay_tcp<A, B>(client: A, target: B) -> RelayOutcome
where
    A: AsyncRead + AsyncWrite + Unpin,
    B: AsyncRead + AsyncWrite + Unpin,
{
    let (mut client_read, mut client_write) = tokio::io::split(client);
    let (mut target_read, mut target_write) = tokio::io::split(target);

    let client_to_target = tokio::io::copy(&mut client_read, &mut target_write);
    let target_to_client = tokio::io::copy(&mut target_read, &mut client_write);

    let outcome = tokio::select! {
        result = client_to_target => RelayOutcome {
            finished: Direction::ClientToTarget,
            result,
        },
        result = target_to_client => RelayOutcome {
            finished: Direction::TargetToClient,
            result,
        },
    };

    match &outcome.result {
        Ok(bytes) => debug!("{} finished: {} bytes", outcome.finished, bytes),
        Err(e) => debug!("{} error: {}", outcome.finished, e),
    }

    // Errors here mean the peer is already gone
    let _ = target_write.shutdown().await;
    let _ = client_write.shutdown().await;

    outcome
}
