// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for the fake NTP server.
//!
//! Public APIs return `io::Result<T>`. Internally, errors are constructed as
//! `FakeNtpError` variants and converted to `io::Error` automatically via
//! `From<FakeNtpError> for io::Error`.
//!
//! Callers who want programmatic error matching can downcast via
//! `io::Error::get_ref()`:
//!
//! ```no_run
//! use fakentp_server::error::{ConfigError, FakeNtpError};
//!
//! # fn example(result: std::io::Result<()>) {
//! match result {
//!     Ok(()) => println!("server running"),
//!     Err(e) => {
//!         if let Some(srv_err) = e.get_ref()
//!             .and_then(|inner| inner.downcast_ref::<FakeNtpError>())
//!         {
//!             match srv_err {
//!                 FakeNtpError::Config(ConfigError::InvalidTickInterval) => {
//!                     eprintln!("tick interval must be non-zero")
//!                 }
//!                 _ => eprintln!("server error: {srv_err}"),
//!             }
//!         }
//!     }
//! }
//! # }
//! ```

pub use fakentp_proto::error::ParseError;

use std::fmt;
use std::io;

/// Errors that can occur during fake NTP server operations.
#[derive(Debug)]
pub enum FakeNtpError {
    /// A client request failed validation.
    Protocol(ProtocolError),
    /// Invalid configuration (bad address, zero tick interval).
    Config(ConfigError),
    /// Underlying I/O error (socket bind, send/recv, etc.).
    Io(io::Error),
}

/// Reasons a client request is rejected.
///
/// Mode is checked before version, so a packet that is wrong on both counts
/// reports [`ProtocolError::NotAClientRequest`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// The mode field is not 3 (client).
    NotAClientRequest {
        /// The mode value received.
        mode: u8,
    },
    /// The version field is not 4.
    UnsupportedVersion {
        /// The version value received.
        version: u8,
    },
}

/// Server configuration errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Invalid listen address.
    InvalidListenAddress {
        /// The address that was invalid.
        address: String,
        /// Detail about why it is invalid.
        detail: String,
    },
    /// The ticker cadence was zero.
    InvalidTickInterval,
}

impl ProtocolError {
    /// Stable, machine-readable tag for the rejection reason.
    pub fn reason(&self) -> &'static str {
        match self {
            ProtocolError::NotAClientRequest { .. } => "not-a-client-request",
            ProtocolError::UnsupportedVersion { .. } => "unsupported-version",
        }
    }
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for FakeNtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FakeNtpError::Protocol(e) => write!(f, "NTP protocol error: {e}"),
            FakeNtpError::Config(e) => write!(f, "server config error: {e}"),
            FakeNtpError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::NotAClientRequest { mode } => {
                write!(f, "not a client request (mode {mode})")
            }
            ProtocolError::UnsupportedVersion { version } => {
                write!(f, "unsupported NTP version: {version}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidListenAddress { address, detail } => {
                write!(f, "invalid listen address '{address}': {detail}")
            }
            ConfigError::InvalidTickInterval => {
                write!(f, "tick interval must be greater than zero")
            }
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for FakeNtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FakeNtpError::Io(e) => Some(e),
            FakeNtpError::Protocol(e) => Some(e),
            FakeNtpError::Config(e) => Some(e),
        }
    }
}

impl std::error::Error for ProtocolError {}
impl std::error::Error for ConfigError {}

// ── From conversions ────────────────────────────────────────────────

impl From<FakeNtpError> for io::Error {
    fn from(err: FakeNtpError) -> io::Error {
        let kind = match &err {
            FakeNtpError::Protocol(_) => io::ErrorKind::InvalidData,
            FakeNtpError::Config(_) => io::ErrorKind::InvalidInput,
            FakeNtpError::Io(e) => e.kind(),
        };
        // Preserve the original io::Error directly for the Io variant.
        if let FakeNtpError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for FakeNtpError {
    fn from(err: io::Error) -> FakeNtpError {
        FakeNtpError::Io(err)
    }
}

impl From<ProtocolError> for FakeNtpError {
    fn from(err: ProtocolError) -> FakeNtpError {
        FakeNtpError::Protocol(err)
    }
}

impl From<ConfigError> for FakeNtpError {
    fn from(err: ConfigError) -> FakeNtpError {
        FakeNtpError::Config(err)
    }
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> io::Error {
        FakeNtpError::Config(err).into()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
