// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Lock-free server metrics using atomic counters.
//!
//! All counters use relaxed ordering. Values read while the server is running
//! are approximate with respect to each other.

use std::sync::atomic::{AtomicU64, Ordering};

/// Runtime server metrics, updated atomically on every request.
///
/// Create an instance with [`ServerMetrics::new()`], wrap in `Arc`, and pass
/// to [`FakeNtpServerBuilder::metrics()`](crate::server::FakeNtpServerBuilder::metrics).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> std::io::Result<()> {
/// use std::sync::Arc;
/// use fakentp_server::server::FakeNtpServer;
/// use fakentp_server::server_common::ServerMetrics;
///
/// let metrics = Arc::new(ServerMetrics::new());
/// let server = FakeNtpServer::builder()
///     .listen("127.0.0.1:1123")
///     .metrics(metrics.clone())
///     .build()
///     .await?;
///
/// // Read metrics from another task
/// let snap = metrics.snapshot();
/// println!("requests: {}", snap.requests_received);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ServerMetrics {
    /// Total datagrams received (valid + invalid).
    pub requests_received: AtomicU64,
    /// Replies successfully sent.
    pub replies_sent: AtomicU64,
    /// Requests that failed validation (answered with `ERR` or dropped).
    pub requests_rejected: AtomicU64,
    /// Replies or rejections that could not be sent.
    pub send_failures: AtomicU64,
}

impl ServerMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a point-in-time snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn inc_requests_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_replies_sent(&self) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_send_failures(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of server metrics (non-atomic, copyable).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsSnapshot {
    /// Total datagrams received (valid + invalid).
    pub requests_received: u64,
    /// Replies successfully sent.
    pub replies_sent: u64,
    /// Requests that failed validation.
    pub requests_rejected: u64,
    /// Replies or rejections that could not be sent.
    pub send_failures: u64,
}
