//! Single-field equality filter applied to the table before aggregation.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::types::VehicleRecord;

/// Narrows the table to records whose field equals a selected value.
///
/// This is the state of the dashboard's county selector made explicit: the
/// caller owns it and passes it alongside the table on every request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum RecordFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep records registered in this county.
    County(String),
    /// Keep records registered in this city.
    City(String),
    /// Keep records of this make.
    Make(String),
}

impl RecordFilter {
    /// Builds a county filter, treating `"all"` (any case) as no filter.
    pub fn county(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::County(name)
        }
    }

    /// Whether the record passes the filter.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match self {
            Self::All => true,
            Self::County(county) => record.county == *county,
            Self::City(city) => record.city == *city,
            Self::Make(make) => record.make == *make,
        }
    }

    /// Applies the filter, borrowing the input untouched when nothing is excluded.
    pub fn apply<'a>(&self, records: &'a [VehicleRecord]) -> Cow<'a, [VehicleRecord]> {
        match self {
            Self::All => Cow::Borrowed(records),
            _ => Cow::Owned(
                records
                    .iter()
                    .filter(|record| self.matches(record))
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// True for the pass-through filter.
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::County(value) | Self::City(value) | Self::Make(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record_fixtures::RecordBuilder;

    fn sample() -> Vec<VehicleRecord> {
        vec![
            RecordBuilder::new().county("King").city("Seattle").make("TESLA").build(),
            RecordBuilder::new().county("Pierce").city("Tacoma").make("NISSAN").build(),
            RecordBuilder::new().county("King").city("Bellevue").make("NISSAN").build(),
        ]
    }

    #[test]
    fn test_all_borrows_input() {
        let records = sample();
        let filtered = RecordFilter::All.apply(&records);
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_county_filter_keeps_order() {
        let records = sample();
        let filtered = RecordFilter::county("King").apply(&records);
        let cities: Vec<_> = filtered.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Seattle", "Bellevue"]);
    }

    #[test]
    fn test_county_all_keyword() {
        assert_eq!(RecordFilter::county("ALL"), RecordFilter::All);
        assert_eq!(RecordFilter::county("all").to_string(), "all");
    }

    #[test]
    fn test_make_and_city_filters() {
        let records = sample();
        assert_eq!(RecordFilter::Make("NISSAN".into()).apply(&records).len(), 2);
        assert_eq!(RecordFilter::City("Tacoma".into()).apply(&records).len(), 1);
        assert!(RecordFilter::City("Spokane".into()).apply(&records).is_empty());
    }

    #[test]
    fn test_filter_serialization_shape() {
        let json = serde_json::to_string(&RecordFilter::County("King".into())).unwrap();
        assert_eq!(json, r#"{"field":"county","value":"King"}"#);
        let all = serde_json::to_string(&RecordFilter::All).unwrap();
        assert_eq!(all, r#"{"field":"all"}"#);
    }
}
