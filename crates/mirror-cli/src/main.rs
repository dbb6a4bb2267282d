//! Folder Mirror CLI
//!
//! Validates the arguments, installs logging and runs the sync schedule.

mod cli;
mod error;
mod logging;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use mirror_core::{Scheduler, SyncConfig, ThreadSleeper, TracingReporter};

use cli::Cli;
use error::Result;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            println!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = SyncConfig::new(
        cli.source,
        cli.replica,
        cli.interval,
        cli.passes,
        cli.log_file,
    )?;
    let subscriber = logging::subscriber(&config.log_file, cli.verbose)?;

    let report = tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(
            paths = %config.paths,
            passes = config.schedule.total(),
            interval = ?config.schedule.interval,
            "starting schedule"
        );
        Scheduler::new(config.paths, config.schedule, &TracingReporter, &ThreadSleeper).run()
    });

    if cli.json {
        let json = serde_json::to_string_pretty(&report)?;
        writeln!(std::io::stdout().lock(), "{json}")?;
    }
    Ok(())
}
