//! Error types for Minisocks
//!
//! This module defines the error types produced while negotiating and
//! serving a SOCKS5 connection.

use crate::socks::{
    TargetAddr, SOCKS5_REPLY_CONNECTION_NOT_ALLOWED, SOCKS5_REPLY_CONNECTION_REFUSED,
    SOCKS5_REPLY_GENERAL_FAILURE, SOCKS5_REPLY_HOST_UNREACHABLE, SOCKS5_REPLY_SUCCEEDED,
};
use std::io;
use thiserror::Error;

/// Coarse classification of a [`Socks5Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unsupported version, command, or address type
    Protocol,
    /// Short read/write or transport-level failure
    Io,
    /// Recognised but deliberately unimplemented protocol feature
    UnsupportedFeature,
    /// Outbound connection failed
    Dial,
}

/// SOCKS5 specific errors
#[derive(Error, Debug)]
pub enum Socks5Error {
    /// Unsupported SOCKS version
    #[error("Unsupported SOCKS version: {0}")]
    UnsupportedVersion(u8),

    /// Command not supported
    #[error("Command not supported: {0}")]
    CommandNotSupported(u8),

    /// Address type outside the RFC 1928 set
    #[error("Invalid address type: {0}")]
    InvalidAddressType(u8),

    /// Invalid domain name
    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    /// IO error while reading or writing a frame
    #[error("IO error while {context}: {source}")]
    Io {
        /// What the server was doing when the error occurred
        context: &'static str,
        /// Underlying transport error
        #[source]
        source: io::Error,
    },

    /// Protocol feature that is recognised but not implemented
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    /// Outbound connection failed
    #[error("Failed to connect to {target}: {source}")]
    Dial {
        /// Endpoint that was dialed
        target: TargetAddr,
        /// Underlying connect/resolve error
        #[source]
        source: io::Error,
    },
}

impl Socks5Error {
    /// Wrap an IO error with a description of the failed operation
    pub fn io(context: &'static str, source: io::Error) -> Self {
        Socks5Error::Io { context, source }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Socks5Error::UnsupportedVersion(_)
            | Socks5Error::CommandNotSupported(_)
            | Socks5Error::InvalidAddressType(_)
            | Socks5Error::InvalidDomain(_) => ErrorKind::Protocol,
            Socks5Error::Io { .. } => ErrorKind::Io,
            Socks5Error::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
            Socks5Error::Dial { .. } => ErrorKind::Dial,
        }
    }
}

/// Reply codes for SOCKS5 protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Socks5ReplyCode {
    /// Command succeeded
    Succeeded = SOCKS5_REPLY_SUCCEEDED,
    /// General SOCKS server failure
    GeneralFailure = SOCKS5_REPLY_GENERAL_FAILURE,
    /// Connection not allowed by ruleset
    ConnectionNotAllowed = SOCKS5_REPLY_CONNECTION_NOT_ALLOWED,
    /// Host unreachable
    HostUnreachable = SOCKS5_REPLY_HOST_UNREACHABLE,
    /// Connection refused
    ConnectionRefused = SOCKS5_REPLY_CONNECTION_REFUSED,
}

impl From<Socks5ReplyCode> for u8 {
    fn from(code: Socks5ReplyCode) -> Self {
        code as u8
    }
}

impl From<&io::Error> for Socks5ReplyCode {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Socks5ReplyCode::ConnectionRefused,
            io::ErrorKind::TimedOut => Socks5ReplyCode::HostUnreachable,
            io::ErrorKind::AddrNotAvailable => Socks5ReplyCode::HostUnreachable,
            io::ErrorKind::PermissionDenied => Socks5ReplyCode::ConnectionNotAllowed,
            _ => Socks5ReplyCode::GeneralFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_socks5_reply_code_to_u8() {
        assert_eq!(u8::from(Socks5ReplyCode::Succeeded), 0x00);
        assert_eq!(u8::from(Socks5ReplyCode::GeneralFailure), 0x01);
        assert_eq!(u8::from(Socks5ReplyCode::ConnectionNotAllowed), 0x02);
        assert_eq!(u8::from(Socks5ReplyCode::HostUnreachable), 0x04);
        assert_eq!(u8::from(Socks5ReplyCode::ConnectionRefused), 0x05);

        assert_eq!(u8::from(Socks5ReplyCode::Succeeded), SOCKS5_REPLY_SUCCEEDED);
        assert_eq!(
            u8::from(Socks5ReplyCode::ConnectionRefused),
            SOCKS5_REPLY_CONNECTION_REFUSED
        );
    }

    #[test]
    fn test_socks5_reply_code_from_io_error() {
        let cases = [
            (io::ErrorKind::ConnectionRefused, Socks5ReplyCode::ConnectionRefused),
            (io::ErrorKind::TimedOut, Socks5ReplyCode::HostUnreachable),
            (io::ErrorKind::AddrNotAvailable, Socks5ReplyCode::HostUnreachable),
            (io::ErrorKind::PermissionDenied, Socks5ReplyCode::ConnectionNotAllowed),
            (io::ErrorKind::NotFound, Socks5ReplyCode::GeneralFailure),
            (io::ErrorKind::Other, Socks5ReplyCode::GeneralFailure),
        ];

        for (kind, expected) in cases {
            let err = io::Error::new(kind, "test error");
            assert_eq!(Socks5ReplyCode::from(&err), expected);
        }
    }

    #[test]
    fn test_socks5_error_kind() {
        assert_eq!(Socks5Error::UnsupportedVersion(4).kind(), ErrorKind::Protocol);
        assert_eq!(Socks5Error::CommandNotSupported(2).kind(), ErrorKind::Protocol);
        assert_eq!(Socks5Error::InvalidAddressType(9).kind(), ErrorKind::Protocol);
        assert_eq!(
            Socks5Error::InvalidDomain("\u{fffd}".to_string()).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            Socks5Error::io("reading", io::ErrorKind::UnexpectedEof.into()).kind(),
            ErrorKind::Io
        );
        assert_eq!(
            Socks5Error::UnsupportedFeature("IPv6").kind(),
            ErrorKind::UnsupportedFeature
        );

        let dial = Socks5Error::Dial {
            target: TargetAddr::ipv4(Ipv4Addr::LOCALHOST, 9),
            source: io::ErrorKind::ConnectionRefused.into(),
        };
        assert_eq!(dial.kind(), ErrorKind::Dial);
    }

    #[test]
    fn test_socks5_error_display() {
        let err = Socks5Error::UnsupportedVersion(4);
        assert_eq!(format!("{}", err), "Unsupported SOCKS version: 4");

        let err = Socks5Error::CommandNotSupported(0xFF);
        assert_eq!(format!("{}", err), "Command not supported: 255");

        let err = Socks5Error::InvalidAddressType(0x99);
        assert_eq!(format!("{}", err), "Invalid address type: 153");

        let err = Socks5Error::UnsupportedFeature("IPv6 address type");
        assert_eq!(format!("{}", err), "Unsupported feature: IPv6 address type");

        let err = Socks5Error::Dial {
            target: TargetAddr::domain("example.com".to_string(), 80),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(
            format!("{}", err),
            "Failed to connect to example.com:80: refused"
        );
    }

    #[test]
    fn test_socks5_reply_code_debug() {
        let code = Socks5ReplyCode::Succeeded;
        assert_eq!(format!("{:?}", code), "Succeeded");
    }
}
