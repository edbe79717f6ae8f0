//! Locating make, the shell, and the sibling wrapper binaries.

use std::env;
use std::path::PathBuf;

/// Fallback make path when PATH lookup fails.
pub const DEFAULT_MAKE: &str = "/usr/bin/make";
/// The shell the leaf wrapper forwards recipe lines to.
pub const DEFAULT_SHELL: &str = "/bin/bash";
/// Binary name of the recursive wrapper.
pub const SUB_WRAPPER: &str = "maketrace-sub";
/// Binary name of the leaf wrapper.
pub const SHELL_WRAPPER: &str = "maketrace-sh";

/// Resolve the make executable: PATH first, standard location second.
pub fn find_make() -> PathBuf {
    which::which("make").unwrap_or_else(|_| PathBuf::from(DEFAULT_MAKE))
}

/// Resolve a sibling wrapper binary.
///
/// Looks next to the currently running executable first, so a plain
/// `cargo build` tree works without installing; then on PATH. If
/// neither finds it, the bare name is returned and the spawn itself
/// reports the failure.
pub fn find_wrapper(name: &str) -> PathBuf {
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    which::which(name).unwrap_or_else(|_| PathBuf::from(name))
}
