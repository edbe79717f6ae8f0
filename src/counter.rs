//! The shared sequence counter.
//!
//! A single file holds the index of the next shell command to execute,
//! as one line of ASCII decimal. Every leaf wrapper claims the current
//! value and writes back the successor, so log records across the whole
//! build tree are numbered in execution order.
//!
//! The read-modify-write is deliberately unlocked: concurrent leaf
//! invocations under `make -j` can race on the file. That interleaving
//! matches the observed numbering of the wrapped tool, and a build
//! normally serializes shell invocations per directory subtree, so the
//! race is documented here rather than hidden behind a lock.

use std::env;
use std::fs;
use std::path::Path;

use crate::config;
use crate::error::{HarnessError, Result};

/// Claim the next command index.
///
/// Reads the current value from `path`, writes back `value + 1`
/// (truncating, not appending), publishes the claimed value to
/// descendant processes via `CURSCNUM`, and returns it.
///
/// Any failure is fatal to the caller: silently corrupting the shared
/// counter is worse than crashing the wrapper.
pub fn claim_next(path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::Resource {
        op: "read",
        path: path.to_path_buf(),
        source,
    })?;

    let line = content.lines().next().unwrap_or("");
    let value: u64 = line
        .trim()
        .parse()
        .map_err(|_| HarnessError::Counter {
            path: path.to_path_buf(),
            line: line.to_string(),
        })?;

    fs::write(path, format!("{}\n", value + 1)).map_err(|source| HarnessError::Resource {
        op: "write",
        path: path.to_path_buf(),
        source,
    })?;

    env::set_var(config::CURSCNUM, value.to_string());
    Ok(value)
}

/// Seed the counter file with `0` if it does not exist yet.
///
/// An existing file is left untouched so a caller-initialized counter
/// keeps its starting value.
pub fn seed(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, "0\n").map_err(|source| HarnessError::Resource {
        op: "create",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn counter_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("scnum");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_claim_reads_value_and_increments_file() {
        let dir = TempDir::new().unwrap();
        let path = counter_file(&dir, "5\n");

        let claimed = claim_next(&path).unwrap();

        assert_eq!(claimed, 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "6\n");
    }

    #[test]
    #[serial]
    fn test_sequential_claims_are_consecutive() {
        let dir = TempDir::new().unwrap();
        let path = counter_file(&dir, "17\n");

        let claimed: Vec<u64> = (0..4).map(|_| claim_next(&path).unwrap()).collect();

        assert_eq!(claimed, vec![17, 18, 19, 20]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "21\n");
    }

    #[test]
    #[serial]
    fn test_claim_publishes_curscnum_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = counter_file(&dir, "9\n");

        claim_next(&path).unwrap();

        // The published value is bare decimal text, no trailing newline.
        assert_eq!(env::var(config::CURSCNUM).unwrap(), "9");
    }

    #[test]
    #[serial]
    fn test_claim_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = counter_file(&dir, "not-a-number\n");

        let err = claim_next(&path).unwrap_err();

        assert!(matches!(err, HarnessError::Counter { .. }));
        // A failed parse must not touch the file.
        assert_eq!(fs::read_to_string(&path).unwrap(), "not-a-number\n");
    }

    #[test]
    #[serial]
    fn test_claim_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");

        let err = claim_next(&path).unwrap_err();
        assert!(matches!(err, HarnessError::Resource { op: "read", .. }));
    }

    #[test]
    #[serial]
    fn test_seed_creates_zero_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scnum");

        seed(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0\n");

        // Seeding again must not reset an advanced counter.
        fs::write(&path, "12\n").unwrap();
        seed(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "12\n");
    }
}
