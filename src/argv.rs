//! Child argument-vector construction.
//!
//! The harness propagates itself through the build tree by rewriting the
//! argument vector it hands to make: `$(MAKE)` is overridden to the
//! recursive wrapper and `$(SHELL)` to the leaf wrapper, so nested make
//! invocations and every recipe line route back through the harness
//! without any makefile knowing about it. Construction is a pure
//! function with a fixed contract: injected arguments first, caller
//! arguments after, caller order untouched.

use std::borrow::Cow;
use std::path::Path;

use shell_escape::escape;

/// The self-propagation overrides injected into every make invocation.
#[derive(Debug, Clone)]
pub struct Overrides {
    /// Path to the recursive wrapper, substituted for `$(MAKE)`.
    pub sub_wrapper: std::path::PathBuf,
    /// Path to the leaf wrapper, substituted as the first word of
    /// `$(SHELL)`.
    pub shell_wrapper: std::path::PathBuf,
    /// The real shell the leaf wrapper forwards to.
    pub shell: std::path::PathBuf,
    /// `-j` value, forwarded verbatim.
    pub jobs: String,
}

fn escaped(path: &Path) -> String {
    escape(Cow::from(path.to_string_lossy().into_owned())).into_owned()
}

/// Build the argument vector for a make child.
///
/// Produces
/// `--debug=v MAKE=<sub> SHELL=<sh> <shell> -j <jobs> <caller args...>`:
/// `--debug=v` makes make echo its decision trace into the shared log,
/// the `MAKE=`/`SHELL=` overrides reroute recursion and recipe execution
/// through the harness, and all caller-supplied arguments follow in
/// their original order.
///
/// The override values are word-split by the shell when `$(MAKE)` or
/// `$(SHELL)` is expanded inside a recipe, so the wrapper paths are
/// shell-escaped here.
pub fn make_args(overrides: &Overrides, caller_args: &[String]) -> Vec<String> {
    let mut args = vec![
        "--debug=v".to_string(),
        format!("MAKE={}", escaped(&overrides.sub_wrapper)),
        format!(
            "SHELL={} {}",
            escaped(&overrides.shell_wrapper),
            escaped(&overrides.shell)
        ),
        "-j".to_string(),
        overrides.jobs.clone(),
    ];
    args.extend(caller_args.iter().cloned());
    args
}

/// Split the words make handed to the leaf wrapper into the shell to
/// run and its arguments.
///
/// make invokes `$(SHELL)` as `<shell-wrapper> <shell> -c <command>`,
/// so the first forwarded word is the real shell and the rest is its
/// argument list, passed through exec-style — each word stays one
/// argv entry, so boundaries survive exactly as received.
pub fn shell_invocation(words: &[String]) -> Option<(&String, &[String])> {
    words.split_first()
}
