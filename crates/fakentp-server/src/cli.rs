// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use clap::{Arg, ArgMatches, Command};

use fakentp_server::clock::Speed;
use fakentp_server::server_common::RejectPolicy;

pub fn build_cli() -> Command {
    Command::new("fakentpd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("NTPv4 server that answers with a fast-running simulated clock")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Log a bit dump of every request and reply (implies debug logging)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fast")
                .short('x')
                .long("fast")
                .help("Advance the clock 30 seconds per tick instead of 10")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("listen")
                .short('l')
                .long("listen")
                .value_name("ADDR")
                .help("IPv4 address to bind")
                .default_value("0.0.0.0"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("UDP port to bind")
                .value_parser(clap::value_parser!(u16))
                .default_value("123"),
        )
        .arg(
            Arg::new("tick-interval-ms")
                .long("tick-interval-ms")
                .value_name("MILLISECONDS")
                .help("Real time between clock ticks")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("500"),
        )
        .arg(
            Arg::new("drop-invalid")
                .long("drop-invalid")
                .help("Silently drop invalid requests instead of answering \"ERR\"")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Daemon settings resolved from the command line.
#[derive(Debug, PartialEq)]
pub struct Options {
    pub debug: bool,
    pub speed: Speed,
    pub listen_addr: String,
    pub tick_interval: Duration,
    pub reject_policy: RejectPolicy,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let ip = matches
            .get_one::<String>("listen")
            .map(String::as_str)
            .unwrap_or("0.0.0.0");
        let port = matches.get_one::<u16>("port").copied().unwrap_or(123);
        let tick_ms = matches
            .get_one::<u64>("tick-interval-ms")
            .copied()
            .unwrap_or(500);

        Options {
            debug: matches.get_flag("debug"),
            speed: if matches.get_flag("fast") {
                Speed::Fast
            } else {
                Speed::Normal
            },
            listen_addr: format!("{ip}:{port}"),
            tick_interval: Duration::from_millis(tick_ms),
            reject_policy: if matches.get_flag("drop-invalid") {
                RejectPolicy::Drop
            } else {
                RejectPolicy::ErrorPayload
            },
        }
    }

    /// Log filter directives: `RUST_LOG` (or `info`) as the base, with the
    /// server library raised to `debug` when `-d` is given.
    pub fn log_directives(&self, rust_log: Option<&str>) -> String {
        let base = match rust_log.map(str::trim) {
            Some(env) if !env.is_empty() => env,
            _ => "info",
        };
        if self.debug {
            format!("{base},fakentp_server=debug,fakentpd=debug")
        } else {
            base.to_string()
        }
    }
}
