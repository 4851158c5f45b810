// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the fake NTP server over real UDP sockets.

mod common;

use std::sync::Arc;
use std::time::Duration;

use fakentp_server::clock::{SimulatedClock, Speed};
use fakentp_server::protocol::{Mode, Stratum, TimestampFormat, Version};
use fakentp_server::server::FakeNtpServer;
use fakentp_server::server_common::{RejectPolicy, ServerMetrics};
use fakentp_server::unix_time;

use common::{
    build_client_packet, build_client_packet_version, parse_response, send_receive_raw,
    spawn_test_server,
};

const TIMEOUT: Duration = Duration::from_secs(2);

// Long enough that no tick lands during a test.
const FROZEN: Duration = Duration::from_secs(3600);

fn frozen_clock(seconds: u32) -> Arc<SimulatedClock> {
    Arc::new(SimulatedClock::starting_at(TimestampFormat::from_seconds(
        seconds,
    )))
}

#[tokio::test]
async fn test_reply_from_fixed_clock() {
    let addr = spawn_test_server(
        FakeNtpServer::builder()
            .clock(frozen_clock(1000))
            .tick_interval(FROZEN),
    )
    .await;

    let mut request = [0u8; 48];
    request[0] = 0x23;
    request[40..48].copy_from_slice(&[0, 0, 0, 0x64, 0, 0, 0, 0]);

    let resp = send_receive_raw(addr, &request, TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(resp.len(), 48);
    assert_eq!(resp[0], 0x24);

    let pkt = parse_response(&resp);
    assert_eq!(pkt.mode, Mode::Server);
    assert_eq!(pkt.version, Version::V4);
    assert_eq!(pkt.stratum, Stratum(1));
    assert_eq!(pkt.precision, -6);
    assert_eq!(pkt.reference_id.as_bytes(), *b"LOCL");
    assert_eq!(pkt.origin_timestamp, TimestampFormat::from_seconds(100));
    assert_eq!(pkt.reference_timestamp, TimestampFormat::from_seconds(940));
    assert_eq!(pkt.receive_timestamp, TimestampFormat::from_seconds(1000));
    assert_eq!(pkt.transmit_timestamp, TimestampFormat::from_seconds(1000));
}

#[tokio::test]
async fn test_default_clock_starts_at_wall_time() {
    let addr = spawn_test_server(FakeNtpServer::builder().tick_interval(FROZEN)).await;

    let resp = send_receive_raw(addr, &build_client_packet(), TIMEOUT)
        .await
        .expect("no response");
    let pkt = parse_response(&resp);

    let now: TimestampFormat = unix_time::Instant::now().into();
    let drift = now.seconds as i64 - pkt.receive_timestamp.seconds as i64;
    assert!(drift.abs() <= 5, "server clock off by {drift}s");
    assert_eq!(pkt.receive_timestamp.fraction, 0);
}

#[tokio::test]
async fn test_origin_echoes_client_transmit() {
    let addr = spawn_test_server(FakeNtpServer::builder().tick_interval(FROZEN)).await;

    let request = build_client_packet();
    let resp = send_receive_raw(addr, &request, TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(&resp[24..32], &request[40..48]);
    assert_eq!(resp[2], 6);
}

#[tokio::test]
async fn test_clock_runs_fast() {
    let clock = frozen_clock(1_000_000);
    let addr = spawn_test_server(
        FakeNtpServer::builder()
            .clock(clock.clone())
            .speed(Speed::Fast)
            .tick_interval(Duration::from_millis(50)),
    )
    .await;

    let first = parse_response(
        &send_receive_raw(addr, &build_client_packet(), TIMEOUT)
            .await
            .expect("no response"),
    );
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = parse_response(
        &send_receive_raw(addr, &build_client_packet(), TIMEOUT)
            .await
            .expect("no response"),
    );

    let advanced = second.receive_timestamp.seconds - first.receive_timestamp.seconds;
    assert!(advanced >= 30, "clock advanced only {advanced}s");
    assert_eq!(advanced % 30, 0);
    assert_eq!((clock.read().seconds - 1_000_000) % 30, 0);
}

#[tokio::test]
async fn test_non_client_mode_gets_err() {
    let addr = spawn_test_server(FakeNtpServer::builder().tick_interval(FROZEN)).await;

    let mut request = build_client_packet();
    request[0] = 0x00;
    let resp = send_receive_raw(addr, &request, TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(resp, b"ERR");
}

#[tokio::test]
async fn test_unsupported_version_gets_err() {
    let addr = spawn_test_server(FakeNtpServer::builder().tick_interval(FROZEN)).await;

    let request = build_client_packet_version(Version::V3);
    assert_eq!(request[0], 0x1B);
    let resp = send_receive_raw(addr, &request, TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(resp, b"ERR");
}

#[tokio::test]
async fn test_drop_policy_sends_nothing() {
    let addr = spawn_test_server(
        FakeNtpServer::builder()
            .tick_interval(FROZEN)
            .reject_policy(RejectPolicy::Drop),
    )
    .await;

    let request = build_client_packet_version(Version::V3);
    let resp = send_receive_raw(addr, &request, Duration::from_millis(200)).await;
    assert!(resp.is_none(), "expected no response, got {resp:?}");

    // The server keeps serving after a drop.
    let resp = send_receive_raw(addr, &build_client_packet(), TIMEOUT).await;
    assert!(resp.is_some());
}

#[tokio::test]
async fn test_short_datagram_is_padded() {
    let addr = spawn_test_server(
        FakeNtpServer::builder()
            .clock(frozen_clock(5000))
            .tick_interval(FROZEN),
    )
    .await;

    let resp = send_receive_raw(addr, &[0x23], TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(resp.len(), 48);
    let pkt = parse_response(&resp);
    assert_eq!(pkt.origin_timestamp, TimestampFormat::default());
    assert_eq!(pkt.receive_timestamp.seconds, 5000);
}

#[tokio::test]
async fn test_oversized_datagram_gets_48_byte_reply() {
    let addr = spawn_test_server(FakeNtpServer::builder().tick_interval(FROZEN)).await;

    let mut request = vec![0xAAu8; 100];
    request[..48].copy_from_slice(&build_client_packet());
    let resp = send_receive_raw(addr, &request, TIMEOUT)
        .await
        .expect("no response");
    assert_eq!(resp.len(), 48);
    assert_eq!(&resp[24..32], &request[40..48]);
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let metrics = Arc::new(ServerMetrics::new());
    let addr = spawn_test_server(
        FakeNtpServer::builder()
            .tick_interval(FROZEN)
            .trace_packets(true)
            .metrics(metrics.clone()),
    )
    .await;

    send_receive_raw(addr, &build_client_packet(), TIMEOUT)
        .await
        .expect("no response");
    send_receive_raw(addr, &[0u8; 48], TIMEOUT)
        .await
        .expect("no response");
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snap = metrics.snapshot();
    assert_eq!(snap.requests_received, 2);
    assert_eq!(snap.replies_sent, 1);
    assert_eq!(snap.requests_rejected, 1);
    assert_eq!(snap.send_failures, 0);
}
