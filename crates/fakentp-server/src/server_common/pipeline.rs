use crate::clock::SimulatedClock;
use crate::error::ProtocolError;
use crate::protocol::{self, ConstPackedSizeBytes};

use super::{build_reply, validate_client_request};

/// Payload sent back for a rejected request under [`RejectPolicy::ErrorPayload`].
pub const REJECT_PAYLOAD: &[u8] = b"ERR";

/// What to send back when a request fails validation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RejectPolicy {
    /// Answer with the 3-byte ASCII [`REJECT_PAYLOAD`].
    #[default]
    ErrorPayload,
    /// Send nothing, as RFC 5905 expects of a server.
    Drop,
}

/// The complete result of handling a client datagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandleResult {
    /// Send this reply to the client.
    Reply([u8; protocol::Packet::PACKED_SIZE_BYTES]),
    /// Send `payload` to the client in place of a reply.
    Reject {
        /// Why the request was rejected.
        error: ProtocolError,
        /// Bytes to send back.
        payload: &'static [u8],
    },
    /// Send nothing.
    Drop {
        /// Why the request was rejected.
        error: ProtocolError,
    },
}

/// Handle a single incoming datagram (pure logic, no I/O).
///
/// The clock is read twice: once for the receive timestamp once the request
/// has been validated, and again for the transmit timestamp while building
/// the reply. A tick landing between the two reads makes them differ.
pub fn handle_request(
    datagram: &[u8],
    clock: &SimulatedClock,
    reject_policy: RejectPolicy,
) -> HandleResult {
    // 1. Validate the request.
    let request = match validate_client_request(datagram) {
        Ok(req) => req,
        Err(error) => {
            return match reject_policy {
                RejectPolicy::ErrorPayload => HandleResult::Reject {
                    error,
                    payload: REJECT_PAYLOAD,
                },
                RejectPolicy::Drop => HandleResult::Drop { error },
            };
        }
    };

    // 2. Record the receive timestamp.
    let receive = clock.read();

    // 3. Record the transmit timestamp and serialize.
    let transmit = clock.read();
    HandleResult::Reply(build_reply(&request, receive, transmit))
}
