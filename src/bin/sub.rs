//! maketrace-sub — the recursive wrapper.
//!
//! Substituted for `$(MAKE)`, so make hands it exactly the argument
//! shape it would pass to itself. No option parsing happens here: the
//! received arguments are preserved verbatim and forwarded to the real
//! make with the self-propagation overrides injected in front.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;

use maketrace::argv::{make_args, Overrides};
use maketrace::config::SubConfig;
use maketrace::paths;
use maketrace::record::RecordLog;
use maketrace::wrapper::TimedCmd;

fn main() {
    env_logger::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("maketrace-sub: {err:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let received: Vec<String> = env::args().collect();
    let cfg = SubConfig::from_env()?;

    let overrides = Overrides {
        sub_wrapper: paths::find_wrapper(paths::SUB_WRAPPER),
        shell_wrapper: paths::find_wrapper(paths::SHELL_WRAPPER),
        shell: PathBuf::from(paths::DEFAULT_SHELL),
        jobs: cfg.jobs.clone(),
    };

    let code = TimedCmd::new(
        "sub-make",
        paths::find_make(),
        RecordLog::new(&cfg.output),
        cfg.cwd.as_str(),
    )
    .args(make_args(&overrides, &received[1..]))
    .display_argv(received)
    .index(cfg.current_index)
    .redirect_to_log()
    .run()?;

    Ok(code)
}
