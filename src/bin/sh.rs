//! maketrace-sh — the leaf wrapper.
//!
//! Substituted as the first word of `$(SHELL)`, so make invokes it as
//! `maketrace-sh /bin/bash -c <command>` for every recipe line. It
//! claims the next index from the shared sequence counter, records the
//! command under that index, and forwards the received words to the
//! real shell unchanged — each word stays one argv entry, so boundaries
//! survive exactly as make produced them.

use std::env;
use std::process;

use anyhow::{bail, Result};

use maketrace::argv::shell_invocation;
use maketrace::config::LeafConfig;
use maketrace::counter;
use maketrace::record::RecordLog;
use maketrace::wrapper::TimedCmd;

fn main() {
    env_logger::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("maketrace-sh: {err:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let received: Vec<String> = env::args().collect();
    let cfg = LeafConfig::from_env()?;

    let Some((shell, shell_args)) = shell_invocation(&received[1..]) else {
        bail!("not enough arguments: expected the shell to run");
    };

    let index = counter::claim_next(&cfg.counter)?;

    let code = TimedCmd::new(
        "shell-command",
        shell,
        RecordLog::new(&cfg.output),
        cfg.cwd.as_str(),
    )
    .args(shell_args.iter().cloned())
    .display_argv(received.clone())
    .index(index.to_string())
    .run()?;

    Ok(code)
}
