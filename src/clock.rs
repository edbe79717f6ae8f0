//! Wall-clock sampling and measurement-overhead estimation.

use nix::time::{clock_gettime, ClockId};

use crate::error::{HarnessError, Result};
use crate::interval::{subtract, TimeSpec};

/// Sample `CLOCK_REALTIME`.
pub fn sample() -> Result<TimeSpec> {
    let ts = clock_gettime(ClockId::CLOCK_REALTIME).map_err(HarnessError::Clock)?;
    Ok(TimeSpec::new(ts.tv_sec() as i64, ts.tv_nsec() as i64))
}

/// The estimated fixed cost of one timing measurement.
///
/// Every measured interval is bracketed by two clock samples, so the
/// dominant fixed cost is the pair of samples itself. Each wrapper
/// process estimates this once at startup, before any timed work, and
/// subtracts it from every interval it reports. The estimate is never
/// shared across processes.
#[derive(Debug, Clone, Copy)]
pub struct Overhead(TimeSpec);

impl Overhead {
    /// Sample the clock twice back-to-back and take the difference.
    ///
    /// A negative difference means the clock stepped backwards between
    /// the two samples; that is a fatal anomaly, never clamped to zero.
    pub fn estimate() -> Result<Self> {
        let first = sample()?;
        let second = sample()?;

        let (overhead, borrowed) = subtract(second, first);
        if borrowed {
            return Err(HarnessError::ClockAnomaly {
                x: second,
                y: first,
            });
        }
        Ok(Self(overhead))
    }

    /// The estimate as a plain interval.
    pub fn interval(&self) -> TimeSpec {
        self.0
    }
}
