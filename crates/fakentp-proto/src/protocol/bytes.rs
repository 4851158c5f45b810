use crate::error::ParseError;

use super::types::{pack_byte1, unpack_byte1};
use super::{
    ConstPackedSizeBytes, FromBytes, Packet, PacketByte1, ReferenceIdentifier, ShortFormat,
    Stratum, TimestampFormat, ToBytes, offset,
};

// Buffer-based reader implementations (io-independent).

impl FromBytes for ShortFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        let seconds = u16::from_be_bytes([buf[0], buf[1]]);
        let fraction = u16::from_be_bytes([buf[2], buf[3]]);
        Ok((ShortFormat { seconds, fraction }, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        let seconds = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let fraction = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok((
            TimestampFormat { seconds, fraction },
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for ReferenceIdentifier {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        Ok((
            ReferenceIdentifier([buf[0], buf[1], buf[2], buf[3]]),
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for PacketByte1 {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        Ok((unpack_byte1(buf[0]), Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for Packet {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        let mut header = [0u8; Packet::PACKED_SIZE_BYTES];
        header.copy_from_slice(&buf[..Self::PACKED_SIZE_BYTES]);
        Ok((Packet::from_array(&header), Self::PACKED_SIZE_BYTES))
    }
}

fn short_at(buf: &[u8; Packet::PACKED_SIZE_BYTES], at: usize) -> ShortFormat {
    ShortFormat {
        seconds: u16::from_be_bytes([buf[at], buf[at + 1]]),
        fraction: u16::from_be_bytes([buf[at + 2], buf[at + 3]]),
    }
}

fn timestamp_at(buf: &[u8; Packet::PACKED_SIZE_BYTES], at: usize) -> TimestampFormat {
    TimestampFormat::from_bits(u64::from_be_bytes([
        buf[at],
        buf[at + 1],
        buf[at + 2],
        buf[at + 3],
        buf[at + 4],
        buf[at + 5],
        buf[at + 6],
        buf[at + 7],
    ]))
}

impl Packet {
    /// Decode a header from exactly 48 bytes.
    ///
    /// Every bit pattern is a valid header, so this cannot fail.
    pub fn from_array(buf: &[u8; Packet::PACKED_SIZE_BYTES]) -> Packet {
        let (leap_indicator, version, mode) = unpack_byte1(buf[offset::LI_VN_MODE]);
        let at = offset::REFERENCE_ID;
        Packet {
            leap_indicator,
            version,
            mode,
            stratum: Stratum(buf[offset::STRATUM]),
            poll: buf[offset::POLL] as i8,
            precision: buf[offset::PRECISION] as i8,
            root_delay: short_at(buf, offset::ROOT_DELAY),
            root_dispersion: short_at(buf, offset::ROOT_DISPERSION),
            reference_id: ReferenceIdentifier([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]),
            reference_timestamp: timestamp_at(buf, offset::REFERENCE_TIMESTAMP),
            origin_timestamp: timestamp_at(buf, offset::ORIGIN_TIMESTAMP),
            receive_timestamp: timestamp_at(buf, offset::RECEIVE_TIMESTAMP),
            transmit_timestamp: timestamp_at(buf, offset::TRANSMIT_TIMESTAMP),
        }
    }

    /// Encode the header into a fresh 48-byte array, all fields in network byte order.
    pub fn to_array(&self) -> [u8; Packet::PACKED_SIZE_BYTES] {
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        buf[offset::LI_VN_MODE] = pack_byte1((self.leap_indicator, self.version, self.mode));
        buf[offset::STRATUM] = self.stratum.0;
        buf[offset::POLL] = self.poll as u8;
        buf[offset::PRECISION] = self.precision as u8;
        put_short(&mut buf, offset::ROOT_DELAY, self.root_delay);
        put_short(&mut buf, offset::ROOT_DISPERSION, self.root_dispersion);
        buf[offset::REFERENCE_ID..offset::REFERENCE_ID + 4].copy_from_slice(&self.reference_id.0);
        put_timestamp(&mut buf, offset::REFERENCE_TIMESTAMP, self.reference_timestamp);
        put_timestamp(&mut buf, offset::ORIGIN_TIMESTAMP, self.origin_timestamp);
        put_timestamp(&mut buf, offset::RECEIVE_TIMESTAMP, self.receive_timestamp);
        put_timestamp(&mut buf, offset::TRANSMIT_TIMESTAMP, self.transmit_timestamp);
        buf
    }
}

fn put_short(buf: &mut [u8; Packet::PACKED_SIZE_BYTES], at: usize, value: ShortFormat) {
    buf[at..at + 2].copy_from_slice(&value.seconds.to_be_bytes());
    buf[at + 2..at + 4].copy_from_slice(&value.fraction.to_be_bytes());
}

fn put_timestamp(buf: &mut [u8; Packet::PACKED_SIZE_BYTES], at: usize, value: TimestampFormat) {
    buf[at..at + 8].copy_from_slice(&value.to_bits().to_be_bytes());
}

// Buffer-based writer implementations (io-independent).

impl ToBytes for ShortFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        buf[..2].copy_from_slice(&self.seconds.to_be_bytes());
        buf[2..4].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        buf[..4].copy_from_slice(&self.seconds.to_be_bytes());
        buf[4..8].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for ReferenceIdentifier {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        buf[..4].copy_from_slice(&self.0);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for PacketByte1 {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        buf[0] = pack_byte1(*self);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        ParseError::check_len(Self::PACKED_SIZE_BYTES, buf.len())?;
        buf[..Self::PACKED_SIZE_BYTES].copy_from_slice(&self.to_array());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}
