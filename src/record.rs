//! The shared append-only record log.
//!
//! Every wrapper appends one begin line before its child runs and one
//! end block after it terminates. The file is opened in append mode per
//! record and flushed before the wrapper proceeds, so each record is
//! durable on its own; a held handle is never required. Lines from
//! concurrent wrappers may interleave — the log is a merge of
//! independent streams, keyed by command text and counter index, not a
//! strictly nested structure.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};
use crate::interval::TimeSpec;

/// Join an argument vector the way it appears in records.
fn join_argv(argv: &[String]) -> String {
    argv.join(" ")
}

/// The begin line: `executing <kind>: [<index> ]<argv> ; in directory <cwd>`.
pub fn format_begin(kind: &str, index: Option<&str>, argv: &[String], cwd: &str) -> String {
    let index = index.map(|i| format!("{i} ")).unwrap_or_default();
    format!(
        "executing {kind}: {index}{} ; in directory {cwd}\n",
        join_argv(argv)
    )
}

/// The end block:
///
/// ```text
/// <kind>-argv= <argv>
/// elapsed= <sec>.<nsec>
///  finishing <kind>: [<index> : ]<argv> ; in directory <cwd>
/// ```
pub fn format_end(
    kind: &str,
    index: Option<&str>,
    argv: &[String],
    elapsed: TimeSpec,
    cwd: &str,
) -> String {
    let args = join_argv(argv);
    let index = index.map(|i| format!("{i} : ")).unwrap_or_default();
    format!(
        "{kind}-argv= {args}\nelapsed= {elapsed}\n finishing {kind}: {index}{args} ; in directory {cwd}\n"
    )
}

/// Handle on the shared log file.
///
/// Holds only the path; every append opens the file fresh in append
/// mode, writes one whole record, and flushes before returning.
#[derive(Debug, Clone)]
pub struct RecordLog {
    path: PathBuf,
}

impl RecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a begin record.
    pub fn append_begin(
        &self,
        kind: &str,
        index: Option<&str>,
        argv: &[String],
        cwd: &str,
    ) -> Result<()> {
        self.append(&format_begin(kind, index, argv, cwd))
    }

    /// Append an end record.
    pub fn append_end(
        &self,
        kind: &str,
        index: Option<&str>,
        argv: &[String],
        elapsed: TimeSpec,
        cwd: &str,
    ) -> Result<()> {
        self.append(&format_end(kind, index, argv, elapsed, cwd))
    }

    /// Open an append-mode handle for redirecting a child's stdout and
    /// stderr into the log.
    pub fn open_for_child(&self) -> Result<File> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| HarnessError::Resource {
                op: "open",
                path: self.path.clone(),
                source,
            })
    }

    fn append(&self, text: &str) -> Result<()> {
        let resource = |op: &'static str| {
            let path = self.path.clone();
            move |source| HarnessError::Resource { op, path, source }
        };

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(resource("open"))?;
        file.write_all(text.as_bytes())
            .map_err(resource("write"))?;
        file.flush().map_err(resource("flush"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_begin_record_without_index() {
        let line = format_begin("top-make", None, &argv(&["make", "all"]), "/src/proj");
        assert_eq!(line, "executing top-make: make all ; in directory /src/proj\n");
    }

    #[test]
    fn test_begin_record_with_index() {
        let line = format_begin(
            "shell-command",
            Some("5"),
            &argv(&["/bin/bash", "-c", "gcc -c foo.c"]),
            "/src/proj",
        );
        assert_eq!(
            line,
            "executing shell-command: 5 /bin/bash -c gcc -c foo.c ; in directory /src/proj\n"
        );
    }

    #[test]
    fn test_end_record_shape() {
        let text = format_end(
            "sub-make",
            Some("3"),
            &argv(&["make", "-C", "lib"]),
            TimeSpec::new(1, 20_000_000),
            "/src/proj/lib",
        );
        let expected = "sub-make-argv= make -C lib\nelapsed= 1.020000000\n finishing sub-make: 3 : make -C lib ; in directory /src/proj/lib\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_end_record_pads_nanoseconds() {
        let text = format_end(
            "top-make",
            None,
            &argv(&["make"]),
            TimeSpec::new(0, 42),
            "/src",
        );
        assert!(text.contains("elapsed= 0.000000042\n"));
    }

    #[test]
    fn test_appends_accumulate() {
        let dir = TempDir::new().unwrap();
        let log = RecordLog::new(dir.path().join("build.log"));
        let args = argv(&["make", "all"]);

        log.append_begin("top-make", None, &args, "/src").unwrap();
        log.append_end("top-make", None, &args, TimeSpec::new(2, 0), "/src")
            .unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "executing top-make: make all ; in directory /src");
        assert_eq!(lines[1], "top-make-argv= make all");
        assert_eq!(lines[2], "elapsed= 2.000000000");
        assert_eq!(lines[3], " finishing top-make: make all ; in directory /src");
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let log = RecordLog::new(dir.path().join("fresh.log"));

        log.append_begin("top-make", None, &argv(&["make"]), "/src")
            .unwrap();

        assert!(log.path().exists());
    }
}
