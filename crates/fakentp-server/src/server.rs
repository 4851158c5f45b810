// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Fake NTP server using the Tokio runtime.
//!
//! Answers NTPv4 client requests with timestamps read from a
//! [`SimulatedClock`] instead of the host clock.
//!
//! # Architecture
//!
//! The server uses a builder pattern for configuration and processes incoming
//! UDP datagrams one at a time on a single async task. A second task, spawned
//! by [`FakeNtpServer::run`], advances the clock on its own cadence.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use fakentp_server::clock::Speed;
//! use fakentp_server::server::FakeNtpServer;
//!
//! let server = FakeNtpServer::builder()
//!     .listen("0.0.0.0:123")
//!     .speed(Speed::Fast)
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

use std::io;
use std::net::{AddrParseError, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::{self, ClockConfig, SimulatedClock, Speed};
use crate::error::ConfigError;
use crate::server_common::{
    HandleResult, RejectPolicy, ServerMetrics, handle_request, pad_request,
};
use crate::trace::PacketDump;

// Larger than a header so oversized datagrams are read whole and truncated by validation.
const RECV_BUF_SIZE: usize = 1024;

/// Builder for configuring and creating a [`FakeNtpServer`].
pub struct FakeNtpServerBuilder {
    listen_addr: String,
    speed: Speed,
    tick_interval: Duration,
    clock: Option<Arc<SimulatedClock>>,
    reject_policy: RejectPolicy,
    trace_packets: bool,
    metrics: Option<Arc<ServerMetrics>>,
}

impl FakeNtpServerBuilder {
    fn new() -> Self {
        FakeNtpServerBuilder {
            listen_addr: crate::default_listen_addr(crate::protocol::PORT),
            speed: Speed::default(),
            tick_interval: clock::DEFAULT_TICK_INTERVAL,
            clock: None,
            reject_policy: RejectPolicy::default(),
            trace_packets: false,
            metrics: None,
        }
    }

    /// Set the listen address (default: `"0.0.0.0:123"`).
    pub fn listen(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set how fast the simulated clock runs (default: [`Speed::Normal`]).
    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the real time between clock ticks (default: 500 ms).
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Serve from an existing clock instead of one started at the current time.
    pub fn clock(mut self, clock: Arc<SimulatedClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set what is sent back for invalid requests (default: [`RejectPolicy::ErrorPayload`]).
    pub fn reject_policy(mut self, policy: RejectPolicy) -> Self {
        self.reject_policy = policy;
        self
    }

    /// Log a bit dump of every request and reply at `debug` level.
    pub fn trace_packets(mut self, enabled: bool) -> Self {
        self.trace_packets = enabled;
        self
    }

    /// Attach a metrics instance for runtime monitoring.
    pub fn metrics(mut self, metrics: Arc<ServerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the server. Binds to the configured listen address.
    pub async fn build(self) -> io::Result<FakeNtpServer> {
        let clock_config = ClockConfig {
            tick_interval: self.tick_interval,
            step_seconds: self.speed.step_seconds(),
        };
        clock_config.validate()?;

        let addr: SocketAddrV4 = self.listen_addr.parse().map_err(|e: AddrParseError| {
            ConfigError::InvalidListenAddress {
                address: self.listen_addr.clone(),
                detail: e.to_string(),
            }
        })?;

        let sock = UdpSocket::bind(addr).await?;
        debug!("fake NTP server listening on {}", sock.local_addr()?);

        Ok(FakeNtpServer {
            sock,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SimulatedClock::from_system_time())),
            clock_config,
            reject_policy: self.reject_policy,
            trace_packets: self.trace_packets,
            metrics: self.metrics,
        })
    }
}

/// A fake NTP server that answers client requests from a simulated clock.
///
/// Created via [`FakeNtpServer::builder()`]. Call [`run()`](FakeNtpServer::run) to start
/// serving requests.
pub struct FakeNtpServer {
    sock: UdpSocket,
    clock: Arc<SimulatedClock>,
    clock_config: ClockConfig,
    reject_policy: RejectPolicy,
    trace_packets: bool,
    metrics: Option<Arc<ServerMetrics>>,
}

/// Aborts the ticker when the server future is dropped.
struct TickerGuard(JoinHandle<()>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl FakeNtpServer {
    /// Create a builder for configuring the server.
    pub fn builder() -> FakeNtpServerBuilder {
        FakeNtpServerBuilder::new()
    }

    /// The clock replies are read from.
    pub fn clock(&self) -> &Arc<SimulatedClock> {
        &self.clock
    }

    /// The ticker cadence applied once the server runs.
    pub fn clock_config(&self) -> ClockConfig {
        self.clock_config
    }

    /// Get the attached metrics instance, if any.
    pub fn metrics(&self) -> Option<&Arc<ServerMetrics>> {
        self.metrics.as_ref()
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }

    /// Start the clock ticker and process incoming requests indefinitely.
    ///
    /// Receive and send failures are logged and do not stop the loop, so this
    /// future only completes when dropped. Use `tokio::select!` or a shutdown
    /// signal to stop the server; the ticker stops with it.
    pub async fn run(self) -> io::Result<()> {
        let _ticker = TickerGuard(clock::spawn_ticker(self.clock.clone(), self.clock_config));
        let mut recv_buf = [0u8; RECV_BUF_SIZE];

        loop {
            let (recv_len, src_addr) = match self.sock.recv_from(&mut recv_buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!("receive failed: {}", e);
                    continue;
                }
            };
            let datagram = &recv_buf[..recv_len];

            if let Some(m) = &self.metrics {
                m.inc_requests_received();
            }
            self.log_request(src_addr);

            let result = handle_request(datagram, &self.clock, self.reject_policy);
            if self.trace_packets {
                if let Some(dump) = exchange_dump(datagram, &result) {
                    debug!("{}", dump);
                }
            }
            let payload: &[u8] = match &result {
                HandleResult::Reply(buf) => buf,
                HandleResult::Reject { error, payload } => {
                    debug!(reason = error.reason(), "rejecting request from {}: {}", src_addr, error);
                    if let Some(m) = &self.metrics {
                        m.inc_requests_rejected();
                    }
                    *payload
                }
                HandleResult::Drop { error } => {
                    debug!(reason = error.reason(), "dropping request from {}: {}", src_addr, error);
                    if let Some(m) = &self.metrics {
                        m.inc_requests_rejected();
                    }
                    continue;
                }
            };

            let sent = self.send(payload, src_addr).await;
            if let Some(m) = &self.metrics {
                match (sent, &result) {
                    (true, HandleResult::Reply(_)) => m.inc_replies_sent(),
                    (false, _) => m.inc_send_failures(),
                    _ => {}
                }
            }
        }
    }

    async fn send(&self, payload: &[u8], dest: SocketAddr) -> bool {
        match self.sock.send_to(payload, dest).await {
            Ok(sent) if sent == payload.len() => true,
            Ok(sent) => {
                warn!("short send to {}: {} of {} bytes", dest, sent, payload.len());
                false
            }
            Err(e) => {
                warn!("send to {} failed: {}", dest, e);
                false
            }
        }
    }

    fn log_request(&self, src_addr: SocketAddr) {
        let real_time = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let fake_time = DateTime::<Utc>::from_timestamp(self.clock.unix_seconds(), 0)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "out of range".to_string());
        info!(
            client_ip = %src_addr.ip(),
            client_port = src_addr.port(),
            real_time = %real_time,
            fake_time = %fake_time,
            "connection from {}",
            src_addr
        );
    }
}

/// Render the request header and the reply of an answered exchange.
///
/// Rejected and dropped requests produce no dump.
fn exchange_dump(datagram: &[u8], result: &HandleResult) -> Option<String> {
    match result {
        HandleResult::Reply(reply) => Some(format!(
            "{}\n{}",
            PacketDump::new(&pad_request(datagram), "client sent"),
            PacketDump::new(reply, "server sent")
        )),
        HandleResult::Reject { .. } | HandleResult::Drop { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FakeNtpError;
    use crate::protocol::TimestampFormat;

    #[test]
    fn test_builder_defaults() {
        let builder = FakeNtpServer::builder();
        assert_eq!(builder.listen_addr, "0.0.0.0:123");
        assert_eq!(builder.speed, Speed::Normal);
        assert_eq!(builder.tick_interval, Duration::from_millis(500));
        assert_eq!(builder.reject_policy, RejectPolicy::ErrorPayload);
        assert!(builder.clock.is_none());
        assert!(!builder.trace_packets);
        assert!(builder.metrics.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = FakeNtpServer::builder()
            .listen("127.0.0.1:8123")
            .speed(Speed::Fast)
            .tick_interval(Duration::from_millis(100))
            .reject_policy(RejectPolicy::Drop)
            .trace_packets(true);

        assert_eq!(builder.listen_addr, "127.0.0.1:8123");
        assert_eq!(builder.speed, Speed::Fast);
        assert_eq!(builder.tick_interval, Duration::from_millis(100));
        assert_eq!(builder.reject_policy, RejectPolicy::Drop);
        assert!(builder.trace_packets);
    }

    #[tokio::test]
    async fn test_builder_build_binds_socket() {
        let server = FakeNtpServer::builder()
            .listen("127.0.0.1:0")
            .build()
            .await
            .expect("should bind to ephemeral port");

        let addr = server.local_addr().unwrap();
        assert!(addr.port() > 0);
        assert!(server.metrics().is_none());
        assert_eq!(server.clock_config(), ClockConfig::for_speed(Speed::Normal));
    }

    #[tokio::test]
    async fn test_builder_build_with_clock_and_metrics() {
        let clock = Arc::new(SimulatedClock::starting_at(TimestampFormat::from_seconds(
            1000,
        )));
        let metrics = Arc::new(ServerMetrics::new());
        let server = FakeNtpServer::builder()
            .listen("127.0.0.1:0")
            .speed(Speed::Fast)
            .clock(clock.clone())
            .metrics(metrics)
            .build()
            .await
            .unwrap();

        assert!(Arc::ptr_eq(server.clock(), &clock));
        assert!(server.metrics().is_some());
        assert_eq!(server.clock_config().step_seconds, 30);
    }

    #[tokio::test]
    async fn test_build_rejects_zero_tick_interval() {
        let err = FakeNtpServer::builder()
            .listen("127.0.0.1:0")
            .tick_interval(Duration::ZERO)
            .build()
            .await
            .err()
            .unwrap();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let inner = err.get_ref().unwrap().downcast_ref::<FakeNtpError>();
        assert!(matches!(
            inner,
            Some(FakeNtpError::Config(ConfigError::InvalidTickInterval))
        ));
    }

    #[tokio::test]
    async fn test_build_rejects_bad_listen_address() {
        let err = FakeNtpServer::builder()
            .listen("not-an-address")
            .build()
            .await
            .err()
            .unwrap();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let inner = err.get_ref().unwrap().downcast_ref::<FakeNtpError>();
        assert!(matches!(
            inner,
            Some(FakeNtpError::Config(ConfigError::InvalidListenAddress { address, .. }))
                if address == "not-an-address"
        ));
    }

    #[test]
    fn test_exchange_dump_only_for_replies() {
        let clock = SimulatedClock::starting_at(TimestampFormat::from_seconds(1000));

        let result = handle_request(&[0x23], &clock, RejectPolicy::default());
        let dump = exchange_dump(&[0x23], &result).expect("reply should be dumped");
        assert!(dump.starts_with("TRACE-->[client sent]:"));
        assert!(dump.contains("TRACE-->[server sent]:"));
        // The request is dumped as the padded 48-byte header.
        let request_part = dump.split("<--TRACE").next().unwrap_or_default();
        assert!(request_part.contains("[44]"));

        let result = handle_request(&[0x1B], &clock, RejectPolicy::ErrorPayload);
        assert!(exchange_dump(&[0x1B], &result).is_none());

        let result = handle_request(&[0x1B], &clock, RejectPolicy::Drop);
        assert!(exchange_dump(&[0x1B], &result).is_none());
    }
}
