//! Tracing subscriber for a mirror run
//!
//! Every record goes to stderr and is appended to the log file. The file copy
//! never carries ANSI escapes.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{CliError, Result};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Build the subscriber for one run.
///
/// `RUST_LOG` wins over the default level, which is `debug` when verbose and
/// `info` otherwise.
pub fn subscriber(log_file: &Path, verbose: bool) -> Result<impl Subscriber + Send + Sync + 'static> {
    let default = if verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default)?,
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    let file = fmt::layer()
        .with_writer(appender(log_file)?)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_ansi(false)
        .with_target(false);

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file))
}

/// Open `log_file` for appending, creating it and its parent if needed.
fn appender(log_file: &Path) -> Result<RollingFileAppender> {
    let (directory, name) = split(log_file)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(directory)
        .map_err(|e| CliError::LogFile {
            path: log_file.to_path_buf(),
            message: e.to_string(),
        })
}

fn split(log_file: &Path) -> Result<(PathBuf, String)> {
    let name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::LogFile {
            path: log_file.to_path_buf(),
            message: "not a UTF-8 file name".to_string(),
        })?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, name.to_string()))
}
