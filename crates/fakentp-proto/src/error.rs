// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for buffer-based NTP packet parsing and serialization.
//!
//! Every bit pattern of the 48-byte NTPv4 header decodes to some header value,
//! so the only way a decode or encode can fail is a buffer that is too short.
//! [`ParseError`] allocates nothing and is usable without `std`; with the `std`
//! feature it implements [`std::error::Error`] and converts to
//! [`std::io::Error`].

use core::fmt;

/// Errors that can occur during buffer-based NTP packet parsing or serialization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
}

impl ParseError {
    /// Check that `buf_len` can hold `needed` bytes.
    pub(crate) fn check_len(needed: usize, buf_len: usize) -> Result<(), ParseError> {
        if buf_len < needed {
            return Err(ParseError::BufferTooShort {
                needed,
                available: buf_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
