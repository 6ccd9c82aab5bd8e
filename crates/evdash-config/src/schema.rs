//! Configuration schema definitions using serde.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use evdash_common::{LogFormat, LoggingConfig, Result};

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations.
    pub data: DataConfig,
    /// Chart sizes and thresholds.
    pub charts: ChartsConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Where the table is read from and the report written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the vehicle population CSV.
    pub path: PathBuf,
    /// Report destination; stdout when absent.
    pub output: Option<PathBuf>,
    /// Single-byte field delimiter.
    pub delimiter: char,
}

/// Chart preparation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Counties offered in the selector.
    pub top_counties: usize,
    /// Cities in the drivetrain chart.
    pub top_cities: usize,
    /// Makes in each range chart.
    pub top_makes: usize,
    /// Makes need strictly more vehicles than this to be ranked.
    pub make_count_threshold: usize,
    /// Makes in the unresearched chart.
    pub top_unresearched_makes: usize,
    /// Model years before the reference year shown in the unresearched chart.
    pub recent_year_window: i32,
    /// Last model year of that chart; the current year when absent.
    pub reference_year: Option<i32>,
    /// Electric-range bins of the eligibility chart, in axis order.
    pub range_bins: Vec<RangeBinConfig>,
}

/// One `(above, up_to]` electric-range bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBinConfig {
    /// Axis label.
    pub label: String,
    /// Exclusive lower bound in miles; open when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<u32>,
    /// Inclusive upper bound in miles; open when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u32>,
}

/// Logging configuration as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level or `EnvFilter` directive.
    pub level: String,
    /// `pretty`, `compact` or `json`.
    pub format: String,
    /// Log file; stderr when absent.
    pub file: Option<PathBuf>,
    /// Emit span open/close events.
    pub include_spans: bool,
}

impl LoggingSettings {
    /// Converts to the subscriber configuration.
    pub fn to_logging_config(&self) -> Result<LoggingConfig> {
        Ok(LoggingConfig {
            level: self.level.clone(),
            format: self.format.parse::<LogFormat>()?,
            file_path: self.file.clone(),
            include_spans: self.include_spans,
            ..LoggingConfig::default()
        })
    }
}
