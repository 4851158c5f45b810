use crate::protocol;

/// Stratum advertised in every reply (primary reference).
pub const REPLY_STRATUM: protocol::Stratum = protocol::Stratum::PRIMARY;

/// Precision advertised in every reply: 2^-6 s, about 15.6 ms.
pub const REPLY_PRECISION: i8 = -6;

/// Reference identifier advertised in every reply.
pub const REFERENCE_ID: protocol::ReferenceIdentifier = protocol::ReferenceIdentifier::LOCL;

/// How far the reference timestamp lags the receive timestamp, in seconds.
pub const REFERENCE_AGE_SECS: u32 = 60;

/// Build the reply header for a validated client request.
///
/// - `leap_indicator` is 0, `version` echoes the client's, `mode` is `Server`
/// - `poll` is echoed from the request
/// - `root_delay` and `root_dispersion` are zero
/// - `reference_timestamp` is `receive` minus [`REFERENCE_AGE_SECS`], fraction 0
/// - `origin_timestamp` is the client's `transmit_timestamp`, verbatim
/// - `receive_timestamp` and `transmit_timestamp` are the two clock reads
pub fn build_reply_packet(
    request: &protocol::Packet,
    receive: protocol::TimestampFormat,
    transmit: protocol::TimestampFormat,
) -> protocol::Packet {
    protocol::Packet {
        leap_indicator: protocol::LeapIndicator::NoWarning,
        version: request.version,
        mode: protocol::Mode::Server,
        stratum: REPLY_STRATUM,
        poll: request.poll,
        precision: REPLY_PRECISION,
        root_delay: protocol::ShortFormat::default(),
        root_dispersion: protocol::ShortFormat::default(),
        reference_id: REFERENCE_ID,
        reference_timestamp: protocol::TimestampFormat::from_seconds(
            receive.seconds.wrapping_sub(REFERENCE_AGE_SECS),
        ),
        origin_timestamp: request.transmit_timestamp,
        receive_timestamp: receive,
        transmit_timestamp: transmit,
    }
}

/// Build and serialize the 48-byte reply for a validated client request.
///
/// Deterministic: the same inputs always produce the same bytes.
pub fn build_reply(
    request: &protocol::Packet,
    receive: protocol::TimestampFormat,
    transmit: protocol::TimestampFormat,
) -> [u8; 48] {
    build_reply_packet(request, receive, transmit).to_array()
}
