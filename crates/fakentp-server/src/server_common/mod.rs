// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared types and logic for the fake NTP server, used by the tokio
//! transport loop in [`crate::server`].
//!
//! Provides request validation, reply building, the per-request pipeline and
//! server metrics. All of it is pure: the clock is passed in and the result is
//! a byte buffer (or a rejection) for the caller to send.

mod metrics;
mod pipeline;
mod response;
mod validation;

pub use self::metrics::{MetricsSnapshot, ServerMetrics};
pub use self::pipeline::{HandleResult, REJECT_PAYLOAD, RejectPolicy, handle_request};
pub use self::response::{
    REFERENCE_AGE_SECS, REFERENCE_ID, REPLY_PRECISION, REPLY_STRATUM, build_reply,
    build_reply_packet,
};
pub use self::validation::{pad_request, validate_client_request};
