//! Error types for the timing harness.
//!
//! Every variant is fatal to the wrapper process that hits it: a wrapper
//! that cannot measure or log reliably exits non-zero instead of writing
//! an incomplete record.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::interval::TimeSpec;

/// Errors that abort a wrapper process.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required environment variable is not set.
    #[error("required environment variable {0} is not set")]
    Config(&'static str),

    /// Sampling the wall clock failed.
    #[error("clock_gettime failed: {0}")]
    Clock(#[source] nix::errno::Errno),

    /// A measured interval came out negative.
    ///
    /// Carries both raw operands so a clock anomaly can be diagnosed
    /// from the error message alone.
    #[error("negative time interval: {x} - {y}")]
    ClockAnomaly {
        /// Minuend of the failed subtraction.
        x: TimeSpec,
        /// Subtrahend of the failed subtraction.
        y: TimeSpec,
    },

    /// A file operation on the log or counter file failed.
    #[error("{op} {}: {source}", .path.display())]
    Resource {
        /// What was being attempted (open, write, flush, ...).
        op: &'static str,
        /// The file involved.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The counter file did not hold a single decimal line.
    #[error("counter file {} does not contain a number: {line:?}", .path.display())]
    Counter {
        /// The counter file.
        path: PathBuf,
        /// The offending line.
        line: String,
    },

    /// Spawning the child process failed.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on the child process failed.
    #[error("wait on child failed: {0}")]
    Wait(#[source] io::Error),

    /// The child was killed by a signal instead of exiting.
    ///
    /// A timing record for a run that never finished cleanly is
    /// misleading, so the end record is never written in this case.
    #[error("child terminated by signal {0}")]
    Signaled(i32),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
