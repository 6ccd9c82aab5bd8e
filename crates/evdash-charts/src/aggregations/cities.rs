//! Top cities with a BEV / PHEV split, a stacked bar chart.

use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::VehicleRecord;

use super::Aggregation;
use crate::counts::TypeCounts;
use crate::group::group_by;
use crate::ranking::{top_n, Limit, SortDirection};
use crate::stack::StackValues;

/// Drivetrain counts for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityTypeRow {
    /// City name.
    pub city: String,
    /// BEV / PHEV counts.
    #[serde(flatten)]
    pub counts: TypeCounts,
    /// All vehicles in the city.
    pub total: usize,
}

impl StackValues for CityTypeRow {
    fn stack_value(&self, key: &str) -> Option<f64> {
        self.counts.stack_value(key)
    }
}

/// Cities with the most vehicles, split by drivetrain.
#[derive(Debug, Clone, Copy)]
pub struct TopCitiesByType {
    /// Cities to keep.
    pub limit: usize,
}

impl Default for TopCitiesByType {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Aggregation for TopCitiesByType {
    type Row = CityTypeRow;

    fn name(&self) -> &'static str {
        "top_cities_by_type"
    }

    fn description(&self) -> &'static str {
        "Cities with the most electric vehicles, by vehicle type"
    }

    #[instrument(skip(self, records), fields(records = records.len(), limit = self.limit))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<CityTypeRow> {
        let rows = group_by(records, |r| r.city.clone(), |members| {
            TypeCounts::tally(members.iter().copied())
        })
        .into_rows(|city, counts| CityTypeRow {
            city,
            counts,
            total: counts.total(),
        });

        let top = top_n(
            rows,
            |r| r.total as f64,
            Limit::Top(self.limit),
            SortDirection::Descending,
        );
        debug!("Aggregated {} top cities", top.len());
        top
    }
}
