//! The wrapper state machine shared by all three tiers.
//!
//! Every wrapper does the same dance: estimate its own measurement
//! overhead, write a begin record, spawn exactly one child with its
//! output routed into the shared log, block until the child terminates,
//! compute elapsed time net of overhead, write the end record, and hand
//! the child's exit code back. Any failure along the way aborts the
//! wrapper with a non-zero exit instead of leaving a half-written or
//! misleading record.

use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::Command;

use crate::clock::{sample, Overhead};
use crate::error::{HarnessError, Result};
use crate::interval::subtract3;
use crate::record::RecordLog;

/// Builder for one timed child invocation.
pub struct TimedCmd {
    kind: &'static str,
    program: PathBuf,
    args: Vec<String>,
    display_argv: Vec<String>,
    index: Option<String>,
    cwd: String,
    log: RecordLog,
    redirect_to_log: bool,
}

impl TimedCmd {
    /// Create a wrapper invocation of `program`, recorded under `kind`.
    pub fn new(
        kind: &'static str,
        program: impl Into<PathBuf>,
        log: RecordLog,
        cwd: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            program: program.into(),
            args: Vec::new(),
            display_argv: Vec::new(),
            index: None,
            cwd: cwd.into(),
            log,
            redirect_to_log: false,
        }
    }

    /// Arguments passed to the child.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The argument vector shown in begin/end records.
    ///
    /// This is the wrapper's own received argv, not the rewritten child
    /// argv, so the log reads as what was asked for rather than how it
    /// was rerouted.
    pub fn display_argv(mut self, argv: Vec<String>) -> Self {
        self.display_argv = argv;
        self
    }

    /// Counter index included in this invocation's records.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Redirect the child's stdout and stderr into the shared log.
    ///
    /// Used by the make-spawning tiers so the tool's own console output
    /// interleaves into the record stream. The leaf tier skips this:
    /// its streams already point at the log through an ancestor's
    /// redirection.
    pub fn redirect_to_log(mut self) -> Self {
        self.redirect_to_log = true;
        self
    }

    /// Run the full protocol and return the child's exit code.
    ///
    /// A signal-killed child is fatal and leaves only the begin record:
    /// a timing record for a run that never finished cleanly would be
    /// misleading.
    pub fn run(self) -> Result<i32> {
        let overhead = Overhead::estimate()?;

        let argv = if self.display_argv.is_empty() {
            let mut v = vec![self.program.to_string_lossy().into_owned()];
            v.extend(self.args.iter().cloned());
            v
        } else {
            self.display_argv
        };

        self.log
            .append_begin(self.kind, self.index.as_deref(), &argv, &self.cwd)?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if self.redirect_to_log {
            let stdout = self.log.open_for_child()?;
            let stderr = stdout
                .try_clone()
                .map_err(|source| HarnessError::Resource {
                    op: "duplicate handle for",
                    path: self.log.path().to_path_buf(),
                    source,
                })?;
            cmd.stdout(stdout);
            cmd.stderr(stderr);
        }

        let start = sample()?;
        let mut child = cmd.spawn().map_err(|source| HarnessError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;
        log::debug!("spawned {} as pid {}", self.program.display(), child.id());

        let status = child.wait().map_err(HarnessError::Wait)?;
        let end = sample()?;

        if let Some(signal) = status.signal() {
            return Err(HarnessError::Signaled(signal));
        }

        let elapsed = subtract3(end, start, overhead.interval())?;

        self.log
            .append_end(self.kind, self.index.as_deref(), &argv, elapsed, &self.cwd)?;

        Ok(status.code().unwrap_or(0))
    }
}
