//! Semantic checks the YAML types cannot express.

use crate::loader::ConfigError;
use crate::schema::{ChartsConfig, Config, RangeBinConfig};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.data.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("data.path", "must not be empty"));
        }
        if !config.data.delimiter.is_ascii() {
            return Err(ConfigError::invalid(
                "data.delimiter",
                "must be a single ASCII character",
            ));
        }
        if config.logging.format.parse::<evdash_common::LogFormat>().is_err() {
            return Err(ConfigError::invalid(
                "logging.format",
                "must be one of pretty, compact, json",
            ));
        }

        Self::validate_charts(&config.charts)
    }

    fn validate_charts(charts: &ChartsConfig) -> Result<(), ConfigError> {
        let limits = [
            ("charts.top_counties", charts.top_counties),
            ("charts.top_cities", charts.top_cities),
            ("charts.top_makes", charts.top_makes),
            ("charts.top_unresearched_makes", charts.top_unresearched_makes),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }

        if charts.recent_year_window <= 0 {
            return Err(ConfigError::invalid(
                "charts.recent_year_window",
                "must be greater than zero",
            ));
        }

        if charts.range_bins.is_empty() {
            return Err(ConfigError::invalid(
                "charts.range_bins",
                "at least one bin is required",
            ));
        }
        charts
            .range_bins
            .iter()
            .enumerate()
            .try_for_each(|(i, bin)| validate_bin(i, bin))
    }
}

fn validate_bin(index: usize, bin: &RangeBinConfig) -> Result<(), ConfigError> {
    let field = format!("charts.range_bins[{index}]");
    if bin.label.trim().is_empty() {
        return Err(ConfigError::invalid(field, "label must not be empty"));
    }
    if let (Some(above), Some(up_to)) = (bin.above, bin.up_to) {
        if above >= up_to {
            return Err(ConfigError::invalid(
                field,
                format!("empty interval ({above}, {up_to}]"),
            ));
        }
    }
    Ok(())
}
