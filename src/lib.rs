//! maketrace — timing harness for recursive make builds.
//!
//! Three cooperating wrapper binaries share this library: the top
//! wrapper the user invokes, the recursive wrapper substituted for
//! `$(MAKE)`, and the leaf wrapper substituted for `$(SHELL)`. Together
//! they produce one append-only log in which every build step and every
//! recipe command is individually timed and numbered in the order
//! commands actually executed.

pub mod argv;
pub mod clock;
pub mod config;
pub mod counter;
pub mod error;
pub mod interval;
pub mod paths;
pub mod record;
pub mod wrapper;
