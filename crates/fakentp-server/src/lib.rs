// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTPv4 server that answers client time queries from a simulated clock.
//!
//! The simulated clock starts at the real wall-clock time and then jumps
//! forward by a fixed step on a fixed real-time cadence (10 seconds every
//! 500 ms by default, 30 seconds in fast mode). Clients querying the server
//! therefore observe a clock that runs far ahead of real time, which is
//! useful for exercising drift and skew handling in time-sensitive software
//! without touching the host clock.
//!
//! # Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`clock`] | [`SimulatedClock`](clock::SimulatedClock) and its background ticker. |
//! | [`server_common`] | Request validation, reply building and the per-request pipeline (no I/O). |
//! | [`server`] | The tokio UDP transport loop and its builder. |
//! | [`trace`] | Bit-level packet dumps for debug logging. |
//! | [`error`] | Error types, convertible to `io::Error`. |
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use fakentp_server::clock::Speed;
//! use fakentp_server::server::FakeNtpServer;
//!
//! let server = FakeNtpServer::builder()
//!     .listen("127.0.0.1:1123")
//!     .speed(Speed::Fast)
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

#![warn(missing_docs)]

// Re-export protocol types from fakentp_proto for convenience.
pub use fakentp_proto::{protocol, unix_time};

/// Default listen address for the given port (IPv4 wildcard).
pub(crate) fn default_listen_addr(port: u16) -> String {
    format!("0.0.0.0:{port}")
}

/// Simulated clock state and the background task that advances it.
pub mod clock;

/// Error types for the server.
pub mod error;

/// Shared request handling logic.
///
/// Provides request validation, reply building and server metrics. Nothing in
/// here touches a socket, so every piece is testable in isolation.
pub mod server_common;

/// NTP server using the Tokio runtime.
pub mod server;

/// Bit-level packet dumps for debug logging.
pub mod trace;
