// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Bit-level packet dumps.
//!
//! Each row covers four bytes and is prefixed with the offset of its first
//! byte. Every byte is printed as eight binary digits (`1` for a set bit, `.`
//! for a clear one) followed by its decimal value:
//!
//! ```text
//! TRACE-->[client sent]:
//! [00]  ..1...11 [  35]  ........ [   0]  ........ [   0]  ........ [   0]
//! ...
//! <--TRACE
//! ```

use std::fmt;

/// Lazily formatted dump of a packet buffer, for use in log macros.
#[derive(Clone, Copy, Debug)]
pub struct PacketDump<'a> {
    buf: &'a [u8],
    title: &'a str,
}

impl<'a> PacketDump<'a> {
    /// Wrap `buf` for dumping under `title`.
    pub fn new(buf: &'a [u8], title: &'a str) -> Self {
        PacketDump { buf, title }
    }
}

impl fmt::Display for PacketDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TRACE-->[{}]:", self.title)?;
        for (row, chunk) in self.buf.chunks(4).enumerate() {
            write!(f, "[{:02}]", row * 4)?;
            for &byte in chunk {
                f.write_str("  ")?;
                for bit in (0..8).rev() {
                    f.write_str(if byte & (1 << bit) != 0 { "1" } else { "." })?;
                }
                write!(f, " [{byte:4}]")?;
            }
            f.write_str("\n")?;
        }
        f.write_str("<--TRACE")
    }
}

/// Render `buf` as a titled bit dump.
pub fn dump_packet(buf: &[u8], title: &str) -> String {
    PacketDump::new(buf, title).to_string()
}
