use crate::error::ProtocolError;
use crate::protocol::{self, ConstPackedSizeBytes};

/// Validate an incoming NTP client request datagram.
///
/// Only byte 0 is checked, mode first and then version:
/// - Mode must be Client (3), else [`ProtocolError::NotAClientRequest`]
/// - Version must be 4, else [`ProtocolError::UnsupportedVersion`]
///
/// Datagrams shorter than 48 bytes are zero-padded; bytes past 48 are
/// ignored. Returns the decoded request header on success.
pub fn validate_client_request(datagram: &[u8]) -> Result<protocol::Packet, ProtocolError> {
    let request = protocol::Packet::from_array(&pad_request(datagram));

    if request.mode != protocol::Mode::Client {
        return Err(ProtocolError::NotAClientRequest {
            mode: request.mode as u8,
        });
    }

    if request.version != protocol::Version::V4 {
        return Err(ProtocolError::UnsupportedVersion {
            version: request.version.value(),
        });
    }

    Ok(request)
}

/// Copy a datagram into a 48-byte header, zero-padding or truncating it.
pub fn pad_request(datagram: &[u8]) -> [u8; protocol::Packet::PACKED_SIZE_BYTES] {
    let mut header = [0u8; protocol::Packet::PACKED_SIZE_BYTES];
    let len = datagram.len().min(header.len());
    header[..len].copy_from_slice(&datagram[..len]);
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        LeapIndicator, Mode, Packet, ShortFormat, Stratum, TimestampFormat, ToBytes, Version,
    };

    fn make_valid_client_buf() -> [u8; Packet::PACKED_SIZE_BYTES] {
        let pkt = Packet {
            leap_indicator: LeapIndicator::NoWarning,
            version: Version::V4,
            mode: Mode::Client,
            stratum: Stratum::UNSPECIFIED,
            poll: 6,
            precision: -20,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: protocol::ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat {
                seconds: 1000,
                fraction: 0,
            },
        };
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        pkt.to_bytes(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_valid_client_request() {
        let buf = make_valid_client_buf();
        let request = validate_client_request(&buf).unwrap();
        assert_eq!(request.mode, Mode::Client);
        assert_eq!(request.version, Version::V4);
        assert_eq!(request.poll, 6);
        assert_eq!(request.transmit_timestamp.seconds, 1000);
    }

    #[test]
    fn test_byte0_examples() {
        let mut buf = [0u8; 48];

        buf[0] = 0x00;
        assert_eq!(
            validate_client_request(&buf),
            Err(ProtocolError::NotAClientRequest { mode: 0 })
        );

        buf[0] = 0x23;
        assert!(validate_client_request(&buf).is_ok());

        buf[0] = 0x1B;
        assert_eq!(
            validate_client_request(&buf),
            Err(ProtocolError::UnsupportedVersion { version: 3 })
        );
    }

    #[test]
    fn test_mode_checked_before_version() {
        // Version 3, mode 4 (server): both wrong, mode wins.
        let mut buf = make_valid_client_buf();
        buf[0] = (3 << 3) | 4;
        let err = validate_client_request(&buf).unwrap_err();
        assert_eq!(err.reason(), "not-a-client-request");
    }

    #[test]
    fn test_leap_bits_ignored() {
        let mut buf = make_valid_client_buf();
        buf[0] |= 0xC0;
        let request = validate_client_request(&buf).unwrap();
        assert_eq!(request.leap_indicator, LeapIndicator::Unknown);
    }

    #[test]
    fn test_version_5_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] = (5 << 3) | 3;
        assert_eq!(
            validate_client_request(&buf),
            Err(ProtocolError::UnsupportedVersion { version: 5 })
        );
    }

    #[test]
    fn test_short_datagram_is_zero_padded() {
        let request = validate_client_request(&[0x23, 0, 6]).unwrap();
        assert_eq!(request.poll, 6);
        assert_eq!(request.transmit_timestamp, TimestampFormat::default());
    }

    #[test]
    fn test_empty_datagram_is_not_a_client_request() {
        assert_eq!(
            validate_client_request(&[]),
            Err(ProtocolError::NotAClientRequest { mode: 0 })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut buf = [0u8; 68];
        buf[..48].copy_from_slice(&make_valid_client_buf());
        buf[48..].fill(0xFF);
        let request = validate_client_request(&buf).unwrap();
        assert_eq!(request.transmit_timestamp.seconds, 1000);
    }
}
