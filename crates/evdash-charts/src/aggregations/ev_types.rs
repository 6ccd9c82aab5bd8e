//! Vehicle type share, the overview pie chart.

use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::{ElectricVehicleType, VehicleRecord};

use super::Aggregation;
use crate::group::count_by;
use crate::metrics::percentage;

/// Count and share of one drivetrain type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvTypeShareRow {
    /// Drivetrain type.
    pub ev_type: ElectricVehicleType,
    /// Short label (`BEV` / `PHEV`).
    pub label: &'static str,
    /// Vehicles of this type.
    pub count: usize,
    /// Percent of all vehicles, two decimals.
    pub percentage: f64,
}

/// Share of each drivetrain type, in first-seen order.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvTypeShare;

impl Aggregation for EvTypeShare {
    type Row = EvTypeShareRow;

    fn name(&self) -> &'static str {
        "ev_type_share"
    }

    fn description(&self) -> &'static str {
        "Share of battery electric and plug-in hybrid vehicles"
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<EvTypeShareRow> {
        let total = records.len();
        let rows = count_by(records, |r| r.ev_type).into_rows(|ev_type, count| EvTypeShareRow {
            ev_type,
            label: ev_type.abbreviation(),
            count,
            percentage: percentage(count, total),
        });
        debug!("Aggregated {} vehicle type slices", rows.len());
        rows
    }
}
