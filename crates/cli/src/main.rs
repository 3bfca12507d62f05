//! `encryptor` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from `ENCRYPTOR_*` environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Parse and validate command-line flags.
//! 4. Read the source, run the transform, write the destination.
//!
//! Every outcome is reported on stdout as one human-readable line; the exit
//! code is non-zero on any failure.

mod args;
mod config;
mod error;
mod fs;
mod run;
mod telemetry;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};
use tracing::{debug, info};

use args::Args;
use config::Config;
use error::CliError;

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => {
            report("Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            // The message itself is reported on stdout below.
            debug!(code = e.code(), error = %e, "operation failed");
            report(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Print a result line on stdout, falling back to stderr if stdout is unusable.
fn report(line: &str) {
    if writeln!(io::stdout(), "{line}").is_err() {
        eprintln!("{line}");
    }
}

/// Returns `Ok(false)` when only help or version output was requested.
fn try_main() -> Result<bool, CliError> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| CliError::Config(format!("{e:#}")))?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level, cfg.log_format)
        .map_err(|e| CliError::Config(format!("{e:#}")))?;
    info!(version = env!("CARGO_PKG_VERSION"), "encryptor starting");

    // -----------------------------------------------------------------------
    // 3. Flags
    // -----------------------------------------------------------------------
    let args = match Args::try_parse_from(args::normalize(std::env::args_os())) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Help and version text go to stdout.
            e.print().map_err(|source| CliError::FileIo {
                action: "writing help to",
                path: "stdout".into(),
                source,
            })?;
            return Ok(false);
        }
        Err(e) => return Err(CliError::Usage(e.render().to_string().trim_end().to_owned())),
    };
    let invocation = args.into_invocation()?;

    // -----------------------------------------------------------------------
    // 4. Transform
    // -----------------------------------------------------------------------
    run::run(&invocation)?;
    Ok(true)
}
