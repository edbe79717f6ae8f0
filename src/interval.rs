//! Time interval arithmetic.
//!
//! Wall-clock samples are seconds plus nanoseconds. Subtraction keeps the
//! nanosecond component canonical (always in `[0, 10^9)`) by borrowing a
//! whole second when needed; the seconds component carries the sign.

use std::fmt;

use crate::error::{HarnessError, Result};

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// An absolute or relative point in time: whole seconds plus nanoseconds.
///
/// The nanosecond component is canonical (`0 <= nsec < 10^9`) in every
/// value handed out by this module; the seconds component may be negative
/// for relative intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSpec {
    /// Whole seconds.
    pub sec: i64,
    /// Nanoseconds, canonical range `[0, 10^9)`.
    pub nsec: i64,
}

impl TimeSpec {
    /// Create a timespec. `nsec` must already be canonical.
    pub fn new(sec: i64, nsec: i64) -> Self {
        debug_assert!((0..NANOS_PER_SEC).contains(&nsec));
        Self { sec, nsec }
    }

    /// True for the zero interval.
    pub fn is_zero(&self) -> bool {
        self.sec == 0 && self.nsec == 0
    }
}

impl fmt::Display for TimeSpec {
    /// Renders as `<sec>.<nsec>` with the nanoseconds zero-padded to nine
    /// digits, so `1.000000005` cannot be misread as 1.5 seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.sec, self.nsec)
    }
}

/// Compute `x - y`.
///
/// Returns the difference and a borrow flag. The flag is `true` exactly
/// when the true difference is negative (seconds compared first,
/// nanoseconds only when the seconds are equal). Even then the result's
/// nanosecond component stays canonical; only the seconds go negative.
pub fn subtract(x: TimeSpec, y: TimeSpec) -> (TimeSpec, bool) {
    let borrowed = x < y;

    let (mut sec, mut nsec) = (x.sec, x.nsec);
    if nsec < y.nsec {
        sec -= 1;
        nsec += NANOS_PER_SEC;
    }

    (
        TimeSpec {
            sec: sec - y.sec,
            nsec: nsec - y.nsec,
        },
        borrowed,
    )
}

/// Compute `x - y - z`, failing on any negative intermediate result.
///
/// Used for `end - start - overhead`: a borrow in either step means the
/// clock went backwards or the overhead estimate exceeds the measured
/// interval, and a negative elapsed time is never a valid measurement.
pub fn subtract3(x: TimeSpec, y: TimeSpec, z: TimeSpec) -> Result<TimeSpec> {
    let (d, borrowed) = subtract(x, y);
    if borrowed {
        return Err(HarnessError::ClockAnomaly { x, y });
    }
    let (d, borrowed) = subtract(d, z);
    if borrowed {
        return Err(HarnessError::ClockAnomaly { x: d, y: z });
    }
    Ok(d)
}
