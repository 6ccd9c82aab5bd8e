//! Configuration loading from YAML with environment variable overrides.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use evdash_common::{EvDashError, Result as EvDashResult};

use crate::schema::Config;
use crate::validator::ConfigValidator;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "EVDASH_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["evdash.yaml", "evdash.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    ValidationError {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// Parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Creates a validation error for a field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for EvDashError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError { field, message } => Self::validation_field(
                format!("invalid configuration value for '{field}': {message}"),
                field,
            ),
            other => Self::config_with_source(other.to_string(), other),
        }
    }
}

/// Configuration loader for the dashboard
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from the first source found.
    ///
    /// Looks at `EVDASH_CONFIG_PATH`, then `evdash.yaml` and `evdash.yml` in
    /// the working directory, and falls back to the defaults. Environment
    /// overrides apply in every case.
    pub fn load() -> EvDashResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            info!(path = %config_path, "loading configuration from {CONFIG_PATH_VAR}");
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            info!(path = %found.display(), "loading configuration file");
            return Ok(Self::load_config(found)?);
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::load_defaults()?)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EvDashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Defaults with environment overrides applied.
    pub fn load_defaults() -> Result<Config, ConfigError> {
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("EVDASH_DATA_PATH") {
            config.data.path = PathBuf::from(path);
        }

        if let Ok(output) = env::var("EVDASH_OUTPUT_PATH") {
            config.data.output = Some(PathBuf::from(output));
        }

        if let Ok(level) = env::var("EVDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(top_makes) = parse_env("EVDASH_TOP_MAKES")? {
            config.charts.top_makes = top_makes;
        }

        if let Some(threshold) = parse_env("EVDASH_MAKE_MIN_COUNT")? {
            config.charts.make_count_threshold = threshold;
        }

        Ok(())
    }
}

fn parse_env<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests in this module mutate process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 5] = [
        "EVDASH_DATA_PATH",
        "EVDASH_OUTPUT_PATH",
        "EVDASH_LOG_LEVEL",
        "EVDASH_TOP_MAKES",
        "EVDASH_MAKE_MIN_COUNT",
    ];

    fn clear_env() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
        env::remove_var(CONFIG_PATH_VAR);
    }

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let yaml = "data:\n  path: /srv/ev/population.csv\n  output: /srv/ev/report.json\ncharts:\n  top_cities: 8\n  reference_year: 2024\n  range_bins:\n    - label: short\n      up_to: 100\n    - label: long\n      above: 100\nlogging:\n  level: debug\n  format: json\n";
        let file = create_test_config_file(yaml);
        let config = ConfigLoader::load_config(file.path()).expect("Failed to load config");

        assert_eq!(config.data.path, PathBuf::from("/srv/ev/population.csv"));
        assert_eq!(config.data.output, Some(PathBuf::from("/srv/ev/report.json")));
        assert_eq!(config.charts.top_cities, 8);
        assert_eq!(config.charts.reference_year, Some(2024));
        assert_eq!(config.charts.range_bins.len(), 2);
        assert_eq!(config.charts.range_bins[1].above, Some(100));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_minimal_config() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = create_test_config_file("charts:\n  top_makes: 20\n");
        let config = ConfigLoader::load_config(file.path()).expect("Failed to load config");

        assert_eq!(config.charts.top_makes, 20);
        // Everything else falls back to defaults.
        assert_eq!(config.charts.make_count_threshold, 1000);
        assert_eq!(config.charts.range_bins.len(), 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_yaml() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = create_test_config_file("charts:\n  top_makes: [unclosed");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = create_test_config_file("charts:\n  top_cities: 0\n");
        let result = ConfigLoader::load_config(file.path());
        match result {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "charts.top_cities");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_environment_variable_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("EVDASH_DATA_PATH", "/tmp/override.csv");
        env::set_var("EVDASH_LOG_LEVEL", "trace");
        env::set_var("EVDASH_TOP_MAKES", "5");
        env::set_var("EVDASH_MAKE_MIN_COUNT", "250");

        let file = create_test_config_file("data:\n  path: original.csv\ncharts:\n  top_makes: 15\n");
        let config = ConfigLoader::load_config(file.path()).expect("Failed to load config");

        assert_eq!(config.data.path, PathBuf::from("/tmp/override.csv"));
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.charts.top_makes, 5);
        assert_eq!(config.charts.make_count_threshold, 250);

        clear_env();
    }

    #[test]
    fn test_env_parse_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("EVDASH_TOP_MAKES", "fifteen");

        let result = ConfigLoader::load_defaults();
        assert!(matches!(result, Err(ConfigError::EnvParseError { ref var, .. }) if var == "EVDASH_TOP_MAKES"));

        clear_env();
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/evdash.yaml");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn test_load_uses_explicit_path_variable() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let file = create_test_config_file("charts:\n  top_counties: 3\n");
        env::set_var(CONFIG_PATH_VAR, file.path());
        let config = ConfigLoader::load().expect("Failed to load config");
        assert_eq!(config.charts.top_counties, 3);

        clear_env();
    }

    #[test]
    fn test_validation_error_converts_to_common_error() {
        let err: EvDashError = ConfigError::invalid("charts.top_makes", "must be positive").into();
        assert!(matches!(
            err,
            EvDashError::Validation { field: Some(ref f), .. } if f == "charts.top_makes"
        ));
    }
}
