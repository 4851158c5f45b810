#[cfg(feature = "std")]
use byteorder::{ReadBytesExt, WriteBytesExt};
#[cfg(feature = "std")]
use std::io;

use crate::error::ParseError;

/// A trait for writing header types to network-endian bytes.
///
/// A blanket implementation is provided for all types that implement `byteorder::WriteBytesExt`.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteBytes {
    /// Writes a header type to this writer in network byte order.
    fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()>;
}

/// A trait for reading header types from network-endian bytes.
///
/// A blanket implementation is provided for all types that implement `byteorder::ReadBytesExt`.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait ReadBytes {
    /// Reads a header type from this reader in network byte order.
    fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P>;
}

/// Header types that may be written to network endian bytes.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteToBytes {
    /// Write the value to `writer`.
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()>;
}

/// Header types that may be read from network endian bytes.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait ReadFromBytes: Sized {
    /// Read the value from `reader`.
    fn read_from_bytes<R: ReadBytesExt>(reader: R) -> io::Result<Self>;
}

/// Types that have a constant size when written to or read from bytes.
pub trait ConstPackedSizeBytes {
    /// The constant size in bytes when this type is packed for network transmission.
    const PACKED_SIZE_BYTES: usize;
}

/// Parse a type from a byte slice, returning the parsed value and the number
/// of bytes consumed.
///
/// Unlike [`ReadFromBytes`], this trait needs neither `std::io` nor `byteorder`.
pub trait FromBytes: Sized {
    /// Parse from the front of `buf`. Returns the value and the number of bytes consumed.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError>;
}

/// Serialize a type into a byte slice, returning the number of bytes written.
///
/// Unlike [`WriteToBytes`], this trait needs neither `std::io` nor `byteorder`.
pub trait ToBytes {
    /// Write this value into the front of `buf`. Returns the number of bytes
    /// written. Fails with [`ParseError::BufferTooShort`] if `buf` is too short.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError>;
}
