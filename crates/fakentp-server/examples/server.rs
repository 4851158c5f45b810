// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Example fake NTP server on an unprivileged port, running at fast speed.
//!
//! Run with: `cargo run --example server`
//! Query it with any SNTP client pointed at UDP port 1123.

use std::sync::Arc;

use fakentp_server::clock::Speed;
use fakentp_server::server::FakeNtpServer;
use fakentp_server::server_common::ServerMetrics;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let metrics = Arc::new(ServerMetrics::new());
    let server = FakeNtpServer::builder()
        .listen("127.0.0.1:1123")
        .speed(Speed::Fast)
        .metrics(metrics.clone())
        .build()
        .await?;

    println!("fake NTP server listening on {}", server.local_addr()?);

    tokio::select! {
        res = server.run() => res,
        _ = tokio::signal::ctrl_c() => {
            println!("served {:?}", metrics.snapshot());
            Ok(())
        }
    }
}
