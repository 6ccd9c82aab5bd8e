//! Error types and utilities for the EV dashboard.

use thiserror::Error;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, EvDashError>;

/// Main error type for dashboard operations.
///
/// The aggregation functions themselves never fail; these variants cover the
/// boundary collaborators (configuration, table loading, rendering).
#[derive(Error, Debug)]
pub enum EvDashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source table could not be read or a row could not be decoded
    #[error("Table error{}: {message}", .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    Table {
        message: String,
        row: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Renderer failures
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl EvDashError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new table error
    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table {
            message: msg.into(),
            row: None,
            source: None,
        }
    }

    /// Create a table error pointing at a data row
    pub fn table_at_row(
        msg: impl Into<String>,
        row: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Table {
            message: msg.into(),
            row: Some(row),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Data row the error refers to, if any
    pub fn row(&self) -> Option<u64> {
        match self {
            Self::Table { row, .. } => *row,
            _ => None,
        }
    }

    /// Whether the error came from user-supplied configuration or input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Validation { .. } | Self::Table { .. }
        )
    }
}

impl From<csv::Error> for EvDashError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.line());
        Self::Table {
            message: err.to_string(),
            row,
            source: Some(Box::new(err)),
        }
    }
}
