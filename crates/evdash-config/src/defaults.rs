//! Default values matching the published dashboard.

use std::path::PathBuf;

use crate::schema::*;

/// File name of the dataset export.
pub const DEFAULT_DATA_PATH: &str = "Electric_Vehicle_Population_Data.csv";

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            output: None,
            delimiter: ',',
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            top_counties: 5,
            top_cities: 10,
            top_makes: 15,
            make_count_threshold: 1000,
            top_unresearched_makes: 10,
            recent_year_window: 15,
            reference_year: None,
            range_bins: default_range_bins(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
            include_spans: false,
        }
    }
}

/// `<= 50`, four 50-mile steps, then `> 200`.
pub fn default_range_bins() -> Vec<RangeBinConfig> {
    let bin = |label: &str, above: Option<u32>, up_to: Option<u32>| RangeBinConfig {
        label: label.to_string(),
        above,
        up_to,
    };
    vec![
        bin("0-50 miles", None, Some(50)),
        bin("50-100 miles", Some(50), Some(100)),
        bin("100-150 miles", Some(100), Some(150)),
        bin("150-200 miles", Some(150), Some(200)),
        bin("> 200 miles", Some(200), None),
    ]
}
