//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use evdash_common::RecordFilter;
use evdash_config::Config;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Vehicle population CSV, overrides `data.path`
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Restrict the charts to one county (`all` for no restriction)
    #[arg(long, default_value = "all")]
    pub county: String,

    /// Write the report here instead of stdout, overrides `data.output`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Log level or filter directive, overrides `logging.level`
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Applies the flags that override configuration values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.path.clone_from(data);
        }
        if let Some(output) = &self.output {
            config.data.output = Some(output.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }

    /// The record filter selected on the command line.
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::county(self.county.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_everything() {
        let args = Args::parse_from(["evdash"]);
        assert_eq!(args.filter(), RecordFilter::All);
        assert!(!args.pretty);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "evdash",
            "--data",
            "ev.csv",
            "--output",
            "report.json",
            "--log-level",
            "debug",
            "--county",
            "King",
        ]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.data.path, PathBuf::from("ev.csv"));
        assert_eq!(config.data.output, Some(PathBuf::from("report.json")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(args.filter(), RecordFilter::County("King".into()));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::parse_from(["evdash", "--county", "ALL"]);
        let mut config = Config::default();
        let before = config.clone();
        args.apply_overrides(&mut config);
        assert_eq!(config, before);
        assert!(args.filter().is_all());
    }
}
