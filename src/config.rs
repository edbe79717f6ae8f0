//! Per-tier configuration, read from the inherited environment.
//!
//! Environment variables are the configuration channel between wrapper
//! processes: whatever the parent exports, the child reads at startup.
//! Each tier validates every key it needs eagerly, before any timed
//! work, so a misconfigured wrapper dies before it writes anything.

use std::env;
use std::path::PathBuf;

use crate::error::{HarnessError, Result};

/// Path to the shared log file. Required by every tier.
pub const OUTPUTFILE: &str = "OUTPUTFILE";
/// Degree of parallelism forwarded to make. Required by the top and
/// recursive tiers.
pub const MAKEJ: &str = "MAKEJ";
/// Path to the sequence-counter file. Required by the leaf tier.
pub const SCNUM: &str = "SCNUM";
/// The counter value claimed by the nearest ancestor leaf invocation.
pub const CURSCNUM: &str = "CURSCNUM";
/// The working directory, used verbatim in log records.
pub const PWD: &str = "PWD";

fn require(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| HarnessError::Config(name))
}

/// Configuration for the top wrapper.
#[derive(Debug, Clone)]
pub struct TopConfig {
    /// Shared log file.
    pub output: PathBuf,
    /// `-j` value forwarded to make, verbatim.
    pub jobs: String,
    /// Working directory as the environment reports it.
    pub cwd: String,
    /// Counter file to seed before the build starts, when configured.
    pub counter: Option<PathBuf>,
}

impl TopConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            output: PathBuf::from(require(OUTPUTFILE)?),
            jobs: require(MAKEJ)?,
            cwd: require(PWD)?,
            counter: env::var(SCNUM).ok().map(PathBuf::from),
        })
    }
}

/// Configuration for the recursive wrapper.
///
/// `CURSCNUM` is required here: make reaches every recursive invocation
/// through a shell command, so a leaf claim has always exported it by
/// the time this tier starts.
#[derive(Debug, Clone)]
pub struct SubConfig {
    /// Shared log file.
    pub output: PathBuf,
    /// `-j` value forwarded to make, verbatim.
    pub jobs: String,
    /// Working directory as the environment reports it.
    pub cwd: String,
    /// Index claimed by the nearest ancestor shell command.
    pub current_index: String,
}

impl SubConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            output: PathBuf::from(require(OUTPUTFILE)?),
            jobs: require(MAKEJ)?,
            cwd: require(PWD)?,
            current_index: require(CURSCNUM)?,
        })
    }
}

/// Configuration for the leaf wrapper.
#[derive(Debug, Clone)]
pub struct LeafConfig {
    /// Shared log file.
    pub output: PathBuf,
    /// Sequence-counter file.
    pub counter: PathBuf,
    /// Working directory as the environment reports it.
    pub cwd: String,
}

impl LeafConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            output: PathBuf::from(require(OUTPUTFILE)?),
            counter: PathBuf::from(require(SCNUM)?),
            cwd: require(PWD)?,
        })
    }
}
