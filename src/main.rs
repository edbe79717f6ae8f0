//! maketrace — the top wrapper.
//!
//! Runs a make build with every step routed through the harness: the
//! whole build, every recursive make, and every recipe command gets a
//! timed, numbered begin/end record in one shared log.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use maketrace::argv::{make_args, Overrides};
use maketrace::config::{self, TopConfig};
use maketrace::counter;
use maketrace::paths;
use maketrace::record::RecordLog;
use maketrace::wrapper::TimedCmd;

#[derive(Parser)]
#[command(name = "maketrace")]
#[command(about = "Time every step of a recursive make build into a shared log")]
#[command(after_help = "ENVIRONMENT:\n  \
    OUTPUTFILE  shared log file (or --output)\n  \
    MAKEJ       parallel jobs forwarded to make (or --jobs)\n  \
    SCNUM       sequence counter file numbering each recipe command (or --counter)")]
struct Cli {
    /// Shared log file (exported as OUTPUTFILE)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Parallel jobs forwarded to make (exported as MAKEJ)
    #[arg(short, long)]
    jobs: Option<String>,

    /// Sequence counter file (exported as SCNUM)
    #[arg(long)]
    counter: Option<PathBuf>,

    /// Arguments forwarded to make
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    make_args: Vec<String>,
}

fn main() {
    env_logger::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("maketrace: {err:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();

    // Flags are exported so every descendant wrapper inherits them
    // through the environment channel.
    if let Some(output) = &cli.output {
        env::set_var(config::OUTPUTFILE, output);
    }
    if let Some(jobs) = &cli.jobs {
        env::set_var(config::MAKEJ, jobs);
    }
    if let Some(counter) = &cli.counter {
        env::set_var(config::SCNUM, counter);
    }

    let cfg = TopConfig::from_env().context("top-level configuration")?;

    if let Some(counter_file) = &cfg.counter {
        counter::seed(counter_file).context("seeding sequence counter")?;
    }

    let overrides = Overrides {
        sub_wrapper: paths::find_wrapper(paths::SUB_WRAPPER),
        shell_wrapper: paths::find_wrapper(paths::SHELL_WRAPPER),
        shell: PathBuf::from(paths::DEFAULT_SHELL),
        jobs: cfg.jobs.clone(),
    };

    let code = TimedCmd::new(
        "top-make",
        paths::find_make(),
        RecordLog::new(&cfg.output),
        cfg.cwd.as_str(),
    )
    .args(make_args(&overrides, &cli.make_args))
    .display_argv(env::args().collect())
    .redirect_to_log()
    .run()?;

    Ok(code)
}
