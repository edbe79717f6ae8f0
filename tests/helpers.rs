//! Shared test utilities for maketrace tests.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Test environment with a temporary log file and seeded counter file.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Shared log file
    pub log: PathBuf,
    /// Sequence counter file, seeded with "0\n"
    pub counter: PathBuf,
    /// Directory reported as PWD to the wrappers
    pub cwd: PathBuf,
}

impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let log = base.join("build.log");
        let counter = base.join("scnum");
        let cwd = base.to_path_buf();
        fs::write(&counter, "0\n").expect("Failed to seed counter");

        Self {
            _temp_dir: temp_dir,
            log,
            counter,
            cwd,
        }
    }

    /// A command for the leaf wrapper binary with a clean environment
    /// carrying only this fixture's configuration.
    pub fn leaf_command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_maketrace-sh"));
        cmd.env_clear()
            .env("OUTPUTFILE", &self.log)
            .env("SCNUM", &self.counter)
            .env("PWD", &self.cwd)
            .current_dir(&self.cwd);
        cmd
    }

    /// A command for the recursive wrapper binary, configured the way
    /// an ancestor wrapper would have configured it.
    pub fn sub_command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_maketrace-sub"));
        cmd.env_clear()
            .env("OUTPUTFILE", &self.log)
            .env("MAKEJ", "1")
            .env("CURSCNUM", "0")
            .env("PWD", &self.cwd)
            .current_dir(&self.cwd);
        cmd
    }

    /// Contents of the shared log, empty string if never written.
    pub fn log_contents(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }

    /// Contents of the counter file.
    pub fn counter_contents(&self) -> String {
        fs::read_to_string(&self.counter).expect("counter file should exist")
    }
}
