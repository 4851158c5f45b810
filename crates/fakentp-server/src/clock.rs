// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The simulated clock served to clients.
//!
//! [`SimulatedClock`] stores the fabricated current time as a single 64-bit
//! NTP timestamp word (`seconds << 32 | fraction`) in an [`AtomicU64`]. One
//! writer (the ticker spawned by [`spawn_ticker`]) advances it with
//! `fetch_add`; any number of readers load it without locking and never see a
//! torn value.
//!
//! The clock starts at the real wall-clock time and then advances only in
//! whole-second jumps, so the fraction stays at zero.
//!
//! # Examples
//!
//! ```
//! use fakentp_server::clock::SimulatedClock;
//! use fakentp_server::protocol::TimestampFormat;
//!
//! let clock = SimulatedClock::starting_at(TimestampFormat::from_seconds(1000));
//! assert_eq!(clock.tick(10).seconds, 1010);
//! assert_eq!(clock.read().seconds, 1010);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

use crate::error::ConfigError;
use crate::protocol::TimestampFormat;
use crate::unix_time;

/// Seconds the clock jumps per tick at [`Speed::Normal`].
pub const BASE_STEP_SECS: u32 = 10;

/// Real time between two ticks unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// How fast the simulated clock runs relative to [`BASE_STEP_SECS`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Speed {
    /// 10 seconds per tick.
    #[default]
    Normal,
    /// 30 seconds per tick.
    Fast,
}

impl Speed {
    /// Multiplier applied to [`BASE_STEP_SECS`].
    pub fn multiplier(self) -> u32 {
        match self {
            Speed::Normal => 1,
            Speed::Fast => 3,
        }
    }

    /// Seconds added to the clock on every tick.
    pub fn step_seconds(self) -> u32 {
        BASE_STEP_SECS * self.multiplier()
    }
}

/// Ticker cadence: the clock jumps `step_seconds` every `tick_interval` of real time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockConfig {
    /// Real time between ticks.
    pub tick_interval: Duration,
    /// Seconds added per tick.
    pub step_seconds: u32,
}

impl ClockConfig {
    /// Default cadence with the step for `speed`.
    pub fn for_speed(speed: Speed) -> Self {
        ClockConfig {
            tick_interval: DEFAULT_TICK_INTERVAL,
            step_seconds: speed.step_seconds(),
        }
    }

    /// Check that the configuration can drive a ticker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig::for_speed(Speed::Normal)
    }
}

/// A lock-free, shareable simulated NTP clock.
#[derive(Debug)]
pub struct SimulatedClock {
    bits: AtomicU64,
}

impl SimulatedClock {
    /// Start the clock at the current real time (Unix now + NTP epoch offset), fraction zero.
    pub fn from_system_time() -> Self {
        let now: TimestampFormat = unix_time::Instant::now().into();
        Self::starting_at(TimestampFormat::from_seconds(now.seconds))
    }

    /// Start the clock at the whole second of `start`.
    ///
    /// The clock only counts whole seconds, so any fraction is discarded.
    pub fn starting_at(start: TimestampFormat) -> Self {
        SimulatedClock {
            bits: AtomicU64::new(TimestampFormat::from_seconds(start.seconds).to_bits()),
        }
    }

    /// The current simulated time. The fraction is always zero.
    pub fn read(&self) -> TimestampFormat {
        TimestampFormat::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Advance the clock by `step_seconds` and return the new time.
    ///
    /// Seconds wrap at the NTP era boundary.
    pub fn tick(&self, step_seconds: u32) -> TimestampFormat {
        let delta = (step_seconds as u64) << 32;
        let prev = self.bits.fetch_add(delta, Ordering::AcqRel);
        TimestampFormat::from_bits(prev.wrapping_add(delta))
    }

    /// The simulated time in seconds since the Unix epoch.
    ///
    /// The era is resolved against the real wall clock.
    pub fn unix_seconds(&self) -> i64 {
        unix_time::timestamp_to_instant(self.read(), &unix_time::Instant::now()).secs()
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        SimulatedClock::from_system_time()
    }
}

/// Spawn a tokio task that advances `clock` forever on the configured cadence.
///
/// The first tick happens one `tick_interval` after the call. Ticks missed
/// while the runtime was busy are delayed, not bunched.
pub fn spawn_ticker(clock: Arc<SimulatedClock>, config: ClockConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(
            time::Instant::now() + config.tick_interval,
            config.tick_interval,
        );
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let now = clock.tick(config.step_seconds);
            trace!(seconds = now.seconds, "simulated clock tick");
        }
    })
}
