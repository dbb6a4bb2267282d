//! Error types for mirror-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that stop the CLI before or after the schedule runs
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from mirror-core (configuration validation)
    #[error(transparent)]
    Core(#[from] mirror_core::Error),

    /// Log file could not be opened
    #[error("Cannot open log file {}: {message}", path.display())]
    LogFile {
        path: std::path::PathBuf,
        message: String,
    },

    /// Log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    /// JSON report could not be rendered
    #[error("Failed to render report: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
