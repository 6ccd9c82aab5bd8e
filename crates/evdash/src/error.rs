//! Application-wide error types using thiserror.

use evdash_common::EvDashError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, table, or rendering error.
    #[error(transparent)]
    Dashboard(#[from] EvDashError),

    /// Failure writing the report.
    #[error("Failed to write report to {target}: {source}")]
    Output {
        /// File name or `stdout`.
        target: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl From<evdash_config::ConfigError> for AppError {
    fn from(err: evdash_config::ConfigError) -> Self {
        Self::Dashboard(err.into())
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
