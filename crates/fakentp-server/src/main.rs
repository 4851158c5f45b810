// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! `fakentpd`: serve a fast-running simulated clock over NTP.
//!
//! Run with: `fakentpd -p 1123 -x`

mod cli;

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fakentp_server::server::FakeNtpServer;

#[tokio::main]
async fn main() {
    let matches = cli::build_cli().get_matches();
    let opts = cli::Options::from_matches(&matches);

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = opts.log_directives(rust_log.as_deref());
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&directives)
                .unwrap_or_else(|_| EnvFilter::new(opts.log_directives(None))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = match FakeNtpServer::builder()
        .listen(opts.listen_addr.as_str())
        .speed(opts.speed)
        .tick_interval(opts.tick_interval)
        .reject_policy(opts.reject_policy)
        .trace_packets(opts.debug)
        .build()
        .await
    {
        Ok(server) => server,
        Err(e) => {
            error!("failed to start server on {}: {}", opts.listen_addr, e);
            process::exit(1);
        }
    };

    match server.local_addr() {
        Ok(addr) => info!(
            speed = ?opts.speed,
            tick_interval_ms = opts.tick_interval.as_millis() as u64,
            "serving simulated time on {}",
            addr
        ),
        Err(e) => error!("failed to read local address: {}", e),
    }

    if let Err(e) = server.run().await {
        error!("server stopped: {}", e);
        process::exit(1);
    }
}
