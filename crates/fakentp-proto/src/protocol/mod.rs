//! Types and constants for the NTPv4 packet header.
//!
//! Provides slice-based [`FromBytes`] / [`ToBytes`] implementations that work without `std`,
//! and (with the `std` feature) `ReadBytes` and `WriteBytes` implementations which extend the
//! byteorder crate `ReadBytesExt` and `WriteBytesExt` traits with the ability to read and write
//! the header types.
//!
//! Field documentation is largely derived from IETF RFC 5905.

/// Well-known NTP UDP port.
pub const PORT: u16 = 123;

/// Byte offsets of each header field within the 48-byte NTPv4 packet.
///
/// ```ignore
/// offset  size  field
///      0     1  LI (2 bits) | VN (3 bits) | Mode (3 bits)
///      1     1  stratum
///      2     1  poll exponent
///      3     1  precision exponent (signed)
///      4     4  root delay
///      8     4  root dispersion
///     12     4  reference ID
///     16     8  reference timestamp
///     24     8  origin timestamp
///     32     8  receive timestamp
///     40     8  transmit timestamp
/// ```
pub mod offset {
    /// Packed leap indicator, version and mode.
    pub const LI_VN_MODE: usize = 0;
    /// Stratum.
    pub const STRATUM: usize = 1;
    /// Poll exponent.
    pub const POLL: usize = 2;
    /// Precision exponent.
    pub const PRECISION: usize = 3;
    /// Root delay.
    pub const ROOT_DELAY: usize = 4;
    /// Root dispersion.
    pub const ROOT_DISPERSION: usize = 8;
    /// Reference identifier.
    pub const REFERENCE_ID: usize = 12;
    /// Reference timestamp.
    pub const REFERENCE_TIMESTAMP: usize = 16;
    /// Origin timestamp (T1).
    pub const ORIGIN_TIMESTAMP: usize = 24;
    /// Receive timestamp (T2).
    pub const RECEIVE_TIMESTAMP: usize = 32;
    /// Transmit timestamp (T3).
    pub const TRANSMIT_TIMESTAMP: usize = 40;
}

mod bytes;
#[cfg(feature = "std")]
mod io;
mod traits;
mod types;

pub use self::traits::*;
pub use self::types::*;
