//! County counts for the choropleth map and the county selector.

use tracing::{debug, instrument};

use evdash_common::VehicleRecord;

use super::{Aggregation, LabelCount};
use crate::group::count_by;
use crate::ranking::{top_n, Limit, SortDirection};

fn county_counts(records: &[VehicleRecord], limit: Limit) -> Vec<LabelCount> {
    let rows = count_by(records, |r| r.county.clone())
        .into_rows(|label, count| LabelCount { label, count });
    top_n(rows, |r| r.count as f64, limit, SortDirection::Descending)
}

/// Vehicles per county, largest first, for the choropleth.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountyDistribution;

impl Aggregation for CountyDistribution {
    type Row = LabelCount;

    fn name(&self) -> &'static str {
        "county_distribution"
    }

    fn description(&self) -> &'static str {
        "Electric vehicles registered per county"
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<LabelCount> {
        let rows = county_counts(records, Limit::All);
        debug!("Aggregated {} counties", rows.len());
        rows
    }
}

/// The counties offered in the selector: the `limit` with most vehicles.
#[derive(Debug, Clone, Copy)]
pub struct TopCounties {
    /// Counties to offer.
    pub limit: usize,
}

impl Default for TopCounties {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

impl Aggregation for TopCounties {
    type Row = LabelCount;

    fn name(&self) -> &'static str {
        "county_options"
    }

    fn description(&self) -> &'static str {
        "Counties with the most electric vehicles"
    }

    #[instrument(skip(self, records), fields(records = records.len(), limit = self.limit))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<LabelCount> {
        let rows = county_counts(records, Limit::Top(self.limit));
        debug!("Selected {} county options", rows.len());
        rows
    }
}
