//! Liftcheck command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Check a run, plain-text verdict
//! liftcheck --requests stdin.txt --output stdout.txt
//!
//! # Pipe the controller output straight in and report metrics as JSON
//! controller < stdin.txt | liftcheck --requests stdin.txt --output - --elapsed 41.2 --json
//! ```
//!
//! Exit status is 0 when the logs conform and 1 when they do not.

mod error;
mod render;

use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use liftcheck_core::{Validator, ValidatorConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    error::CliError,
    render::{Verdict, write_json, write_text},
};

/// Offline conformance checker for multi-elevator controller logs
#[derive(Parser, Debug)]
#[command(name = "liftcheck")]
#[command(about = "Check an elevator controller's output against its input")]
#[command(version)]
struct Args {
    /// Request log fed to the controller (`-` for stdin)
    #[arg(short, long)]
    requests: PathBuf,

    /// Event log printed by the controller (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Measured wall-clock run time in seconds; enables metrics on pass
    #[arg(long)]
    elapsed: Option<f64>,

    /// Require every accept to match an issued request
    #[arg(long)]
    strict_requests: bool,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode, CliError> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    if is_stdin(&args.requests) && is_stdin(&args.output) {
        return Err(CliError::BothStdin);
    }

    let request_log = read_log(&args.requests)?;
    let event_log = read_log(&args.output)?;
    tracing::info!(
        requests = %args.requests.display(),
        output = %args.output.display(),
        strict = args.strict_requests,
        "validating"
    );

    let config = ValidatorConfig { strict_requests: args.strict_requests, ..ValidatorConfig::default() };
    let report = Validator::new(config, &request_log).run(&event_log);
    let verdict = Verdict::new(&report, args.elapsed);

    let mut stdout = io::stdout().lock();
    if args.json {
        write_json(&mut stdout, &verdict)?;
    } else {
        write_text(&mut stdout, &verdict)?;
    }
    stdout.flush()?;

    Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_log(path: &Path) -> Result<String, CliError> {
    let wrap = |source: io::Error| CliError::Read { path: path.to_path_buf(), source };

    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(wrap)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(wrap)
    }
}
