use core::fmt;

use super::ConstPackedSizeBytes;

/// **NTP Short Format** - Used in the root delay and root dispersion header fields. It includes a
/// 16-bit unsigned seconds field and a 16-bit fraction field.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Seconds              |           Fraction            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Seconds component (16-bit unsigned).
    pub seconds: u16,
    /// Fractional seconds component (16-bit unsigned).
    pub fraction: u16,
}

/// **NTP Timestamp Format** - A 32-bit unsigned seconds field spanning 136 years and a 32-bit
/// fraction field resolving 232 picoseconds.
///
/// The prime epoch is 0 h 1 January 1900 UTC, when all bits are zero.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Seconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Fraction                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Seconds since 1900-01-01 00:00:00 UTC (32-bit unsigned).
    pub seconds: u32,
    /// Fractional seconds (32-bit unsigned, resolution of ~232 picoseconds).
    pub fraction: u32,
}

impl TimestampFormat {
    /// A timestamp with whole seconds and a zero fraction.
    pub const fn from_seconds(seconds: u32) -> Self {
        TimestampFormat {
            seconds,
            fraction: 0,
        }
    }

    /// Pack the timestamp into a single 64-bit word, seconds in the high half.
    ///
    /// This is the same value the timestamp has on the wire when read as a
    /// big-endian `u64`.
    pub const fn to_bits(self) -> u64 {
        ((self.seconds as u64) << 32) | self.fraction as u64
    }

    /// Unpack a timestamp from the 64-bit word produced by [`to_bits`](Self::to_bits).
    pub const fn from_bits(bits: u64) -> Self {
        TimestampFormat {
            seconds: (bits >> 32) as u32,
            fraction: bits as u32,
        }
    }
}

/// A 2-bit integer warning of an impending leap second to be inserted or deleted in the last
/// minute of the current month.
///
/// ```ignore
/// +-------+----------------------------------------+
/// | Value | Meaning                                |
/// +-------+----------------------------------------+
/// | 0     | no warning                             |
/// | 1     | last minute of the day has 61 seconds  |
/// | 2     | last minute of the day has 59 seconds  |
/// | 3     | unknown (clock unsynchronized)         |
/// +-------+----------------------------------------+
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddOne = 1,
    /// Last minute of the day has 59 seconds.
    SubOne = 2,
    /// Clock unsynchronized.
    Unknown = 3,
}

impl LeapIndicator {
    /// Decode the two low bits of `bits`. Every 2-bit value is a valid indicator.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::AddOne,
            2 => LeapIndicator::SubOne,
            _ => LeapIndicator::Unknown,
        }
    }
}

/// A 3-bit integer representing the NTP version number, currently 4.
///
/// Note that while this struct is 8-bits, this field is packed to 3 in the actual header. Values
/// decoded off the wire are always within `0..=7`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub(super) u8);

impl Version {
    /// NTP version 3.
    pub const V3: Self = Version(3);
    /// NTP version 4 (current standard).
    pub const V4: Self = Version(4);

    /// Decode the three low bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        Version(bits & 0b111)
    }

    /// Returns the raw version number as a `u8`.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// A 3-bit integer representing the association mode.
///
/// Note that while this enum is 8-bits, this field is packed to 3 in the actual header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved mode (value 0).
    Reserved = 0,
    /// Symmetric active mode (value 1).
    SymmetricActive = 1,
    /// Symmetric passive mode (value 2).
    SymmetricPassive = 2,
    /// Client mode (value 3).
    #[default]
    Client = 3,
    /// Server mode (value 4).
    Server = 4,
    /// Broadcast mode (value 5).
    Broadcast = 5,
    /// NTP control message mode (value 6).
    NtpControlMessage = 6,
    /// Reserved for private use (value 7).
    ReservedForPrivateUse = 7,
}

impl Mode {
    /// Decode the three low bits of `bits`. Every 3-bit value is a valid mode.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Mode::Reserved,
            1 => Mode::SymmetricActive,
            2 => Mode::SymmetricPassive,
            3 => Mode::Client,
            4 => Mode::Server,
            5 => Mode::Broadcast,
            6 => Mode::NtpControlMessage,
            _ => Mode::ReservedForPrivateUse,
        }
    }
}

/// An 8-bit integer representing the stratum.
///
/// ```ignore
/// +--------+-----------------------------------------------------+
/// | Value  | Meaning                                             |
/// +--------+-----------------------------------------------------+
/// | 0      | unspecified or invalid                              |
/// | 1      | primary server (e.g., equipped with a GPS receiver) |
/// | 2-15   | secondary server (via NTP)                          |
/// | 16     | unsynchronized                                      |
/// | 17-255 | reserved                                            |
/// +--------+-----------------------------------------------------+
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

impl Stratum {
    /// Unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// The primary server (e.g. equipped with a GPS receiver).
    pub const PRIMARY: Self = Stratum(1);
}

/// A 32-bit code identifying the particular server or reference clock.
///
/// For stratum 1 servers this is a four-octet, left-justified, zero-padded ASCII string assigned
/// to the reference clock. A server without any reference uses `LOCL`, the undisciplined local
/// clock. The identifier is kept as raw bytes: nothing in this crate interprets it beyond
/// copying it onto the wire.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceIdentifier(pub [u8; 4]);

impl ReferenceIdentifier {
    /// Undisciplined local clock.
    pub const LOCL: Self = ReferenceIdentifier(*b"LOCL");

    /// Returns the raw 4-byte representation of the reference identifier.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }
}

/// **Packet Header** - the 48-byte NTPv4 header (RFC 5905 Figure 8), without extension fields
/// or MAC.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |    Stratum     |     Poll      |  Precision   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Delay                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Dispersion                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Reference ID                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// +                     Reference Timestamp (64)                  +
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// +                      Origin Timestamp (64)                    +
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// +                      Receive Timestamp (64)                   +
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// +                      Transmit Timestamp (64)                  +
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Field offsets are listed in [`super::offset`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Leap indicator warning of impending leap second.
    pub leap_indicator: LeapIndicator,
    /// NTP protocol version number.
    pub version: Version,
    /// Association mode (client, server, broadcast, etc.).
    pub mode: Mode,
    /// Stratum level of the time source.
    pub stratum: Stratum,
    /// Maximum interval between successive messages, in log2 seconds.
    pub poll: i8,
    /// Precision of the system clock, in log2 seconds. For instance, -6 corresponds to about
    /// 15.6 milliseconds.
    pub precision: i8,
    /// Total round-trip delay to the reference clock, in NTP short format.
    pub root_delay: ShortFormat,
    /// Total dispersion to the reference clock, in NTP short format.
    pub root_dispersion: ShortFormat,
    /// Reference identifier (clock source or server address).
    pub reference_id: ReferenceIdentifier,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: TimestampFormat,
    /// Time at the client when the request departed for the server.
    pub origin_timestamp: TimestampFormat,
    /// Time at the server when the request arrived from the client.
    pub receive_timestamp: TimestampFormat,
    /// Time at the server when the response left for the client.
    pub transmit_timestamp: TimestampFormat,
}

/// The consecutive types within the first packed byte in the NTP packet.
pub type PacketByte1 = (LeapIndicator, Version, Mode);

/// Pack leap indicator, version and mode into header byte 0.
pub(crate) fn pack_byte1((li, vn, mode): PacketByte1) -> u8 {
    ((li as u8) << 6) | ((vn.0 & 0b111) << 3) | mode as u8
}

/// Split header byte 0 into leap indicator, version and mode.
pub(crate) fn unpack_byte1(byte: u8) -> PacketByte1 {
    (
        LeapIndicator::from_bits(byte >> 6),
        Version::from_bits(byte >> 3),
        Mode::from_bits(byte),
    )
}

// Size implementations.

impl ConstPackedSizeBytes for ShortFormat {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Stratum {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for ReferenceIdentifier {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for PacketByte1 {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for Packet {
    const PACKED_SIZE_BYTES: usize = PacketByte1::PACKED_SIZE_BYTES
        + Stratum::PACKED_SIZE_BYTES
        + 2
        + ShortFormat::PACKED_SIZE_BYTES * 2
        + ReferenceIdentifier::PACKED_SIZE_BYTES
        + TimestampFormat::PACKED_SIZE_BYTES * 4;
}

// Default implementations.

impl Default for Version {
    /// Defaults to NTPv4, the current standard (RFC 5905).
    fn default() -> Self {
        Version::V4
    }
}

impl Default for Packet {
    /// Defaults to an NTPv4 client request template with every other field zeroed.
    fn default() -> Self {
        Packet {
            leap_indicator: LeapIndicator::default(),
            version: Version::default(),
            mode: Mode::default(),
            stratum: Stratum::default(),
            poll: 0,
            precision: 0,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat::default(),
        }
    }
}

// Display implementations.

impl fmt::Display for ReferenceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in &self.0 {
            if b == 0 {
                break;
            }
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "?")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:08x}", self.seconds, self.fraction)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn packet_is_48_bytes() {
        assert_eq!(Packet::PACKED_SIZE_BYTES, 48);
    }

    #[test]
    fn timestamp_bits_roundtrip() {
        let ts = TimestampFormat {
            seconds: 0xDEAD_BEEF,
            fraction: 0x0123_4567,
        };
        assert_eq!(ts.to_bits(), 0xDEAD_BEEF_0123_4567);
        assert_eq!(TimestampFormat::from_bits(ts.to_bits()), ts);
    }

    #[test]
    fn byte1_packing() {
        assert_eq!(
            pack_byte1((LeapIndicator::NoWarning, Version::V4, Mode::Client)),
            0x23
        );
        assert_eq!(
            pack_byte1((LeapIndicator::NoWarning, Version::V4, Mode::Server)),
            0x24
        );
        assert_eq!(
            unpack_byte1(0x1B),
            (LeapIndicator::NoWarning, Version::V3, Mode::Client)
        );
        assert_eq!(
            unpack_byte1(0xE3),
            (LeapIndicator::Unknown, Version::V4, Mode::Client)
        );
    }

    #[test]
    fn every_byte1_unpacks_and_repacks() {
        for b in 0..=u8::MAX {
            assert_eq!(pack_byte1(unpack_byte1(b)), b);
        }
    }

    #[test]
    fn reference_id_display() {
        assert_eq!(ReferenceIdentifier::LOCL.to_string(), "LOCL");
        assert_eq!(ReferenceIdentifier(*b"GPS\0").to_string(), "GPS");
        assert_eq!(ReferenceIdentifier([0x01, b'A', 0, 0]).to_string(), "?A");
    }

    #[test]
    fn timestamp_display() {
        let ts = TimestampFormat {
            seconds: 1000,
            fraction: 0x8000_0000,
        };
        assert_eq!(ts.to_string(), "1000.80000000");
    }
}
