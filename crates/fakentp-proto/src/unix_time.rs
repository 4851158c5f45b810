use crate::protocol;
#[cfg(feature = "std")]
use std::time;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// The number of seconds in one NTP era (2^32 seconds, approximately 136 years).
pub const ERA_SECONDS: i64 = 1 << 32;

// The NTP fractional scale (32-bit).
const NTP_SCALE: f64 = u32::MAX as f64;

/// An instant relative to the Unix epoch, in seconds with the fractional part in nanoseconds.
///
/// If the **Instant** describes some moment prior to the Unix epoch, both the `secs` and
/// `subsec_nanos` components are negative.
///
/// This type exists for reading the real wall clock and for converting between Unix time and
/// NTP timestamps. For human-readable rendering, hand `secs()` to the chrono crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// Both components must carry the same sign. Violating this results in a **panic!**.
    pub fn new(secs: i64, subsec_nanos: i32) -> Instant {
        if secs > 0 && subsec_nanos < 0 {
            panic!("invalid instant: secs was positive but subsec_nanos was negative");
        }
        if secs < 0 && subsec_nanos > 0 {
            panic!("invalid instant: secs was negative but subsec_nanos was positive");
        }
        Instant { secs, subsec_nanos }
    }

    /// The current real wall-clock time, from `std::time::SystemTime`.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => Instant::new(duration.as_secs() as i64, duration.subsec_nanos() as i32),
            Err(sys_time_err) => {
                let before = sys_time_err.duration();
                Instant::new(-(before.as_secs() as i64), -(before.subsec_nanos() as i32))
            }
        }
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }
}

/// Convert a [`protocol::TimestampFormat`] to an [`Instant`] using `pivot` to pick the era.
///
/// The 32-bit seconds field repeats every ~136 years. The era chosen is the one that places
/// the timestamp within half an era (~68 years) of the pivot.
pub fn timestamp_to_instant(ts: protocol::TimestampFormat, pivot: &Instant) -> Instant {
    let pivot_ntp = pivot.secs + EPOCH_DELTA;
    let candidate = pivot_ntp.div_euclid(ERA_SECONDS) * ERA_SECONDS + ts.seconds as i64;
    let diff = candidate - pivot_ntp;
    let ntp_secs = if diff > ERA_SECONDS / 2 {
        candidate - ERA_SECONDS
    } else if diff < -(ERA_SECONDS / 2) {
        candidate + ERA_SECONDS
    } else {
        candidate
    };
    let secs = ntp_secs - EPOCH_DELTA;
    let subsec_nanos = (ts.fraction as f64 / NTP_SCALE * 1e9) as i32;
    if secs < 0 && subsec_nanos > 0 {
        // Pre-1970: both components must be negative.
        Instant::new(secs + 1, subsec_nanos - 1_000_000_000)
    } else {
        Instant::new(secs, subsec_nanos)
    }
}

impl From<Instant> for protocol::TimestampFormat {
    /// Converts a Unix [`Instant`] to a 32-bit NTP timestamp.
    ///
    /// This truncates to 32 bits and loses the era; receivers recover it with a pivot (see
    /// [`timestamp_to_instant`]).
    fn from(t: Instant) -> Self {
        let sec = t.secs() + EPOCH_DELTA;
        let frac = t.subsec_nanos() as f64 * NTP_SCALE / 1e9;
        protocol::TimestampFormat {
            seconds: sec as u32,
            fraction: frac as u32,
        }
    }
}
