//! Vehicles whose electric range has not been researched yet.

use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::VehicleRecord;

use super::Aggregation;
use crate::counts::TypeCounts;
use crate::group::group_by;
use crate::ranking::{top_n, Limit, SortDirection};
use crate::stack::StackValues;

fn unresearched(records: &[VehicleRecord]) -> Vec<&VehicleRecord> {
    records.iter().filter(|r| r.is_unresearched()).collect()
}

/// Unresearched vehicles of one make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresearchedMakeRow {
    /// Manufacturer.
    pub make: String,
    /// BEV / PHEV counts.
    #[serde(flatten)]
    pub counts: TypeCounts,
    /// Unresearched vehicles of the make.
    pub total: usize,
}

impl StackValues for UnresearchedMakeRow {
    fn stack_value(&self, key: &str) -> Option<f64> {
        self.counts.stack_value(key)
    }
}

/// Makes with the most unresearched vehicles.
#[derive(Debug, Clone, Copy)]
pub struct TopUnresearchedMakes {
    /// Makes to keep.
    pub limit: usize,
}

impl Default for TopUnresearchedMakes {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Aggregation for TopUnresearchedMakes {
    type Row = UnresearchedMakeRow;

    fn name(&self) -> &'static str {
        "top_unresearched_makes"
    }

    fn description(&self) -> &'static str {
        "Makes with the most vehicles of unresearched eligibility"
    }

    #[instrument(skip(self, records), fields(records = records.len(), limit = self.limit))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<UnresearchedMakeRow> {
        let pending = unresearched(records);
        let rows = group_by(&pending, |r| r.make.clone(), |members| {
            TypeCounts::tally(members.iter().map(|r| **r))
        })
        .into_rows(|make, counts| UnresearchedMakeRow {
            make,
            counts,
            total: counts.total(),
        });

        let top = top_n(
            rows,
            |r| r.total as f64,
            Limit::Top(self.limit),
            SortDirection::Descending,
        );
        debug!("Aggregated {} unresearched makes", top.len());
        top
    }
}

/// Unresearched vehicles of one model year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTypeRow {
    /// Model year.
    pub year: i32,
    /// BEV / PHEV counts.
    #[serde(flatten)]
    pub counts: TypeCounts,
    /// Unresearched vehicles of the year.
    pub total: usize,
}

impl StackValues for YearTypeRow {
    fn stack_value(&self, key: &str) -> Option<f64> {
        self.counts.stack_value(key)
    }
}

/// Unresearched vehicles per recent model year, oldest first.
///
/// Covers `reference_year - window ..= reference_year`. Years without
/// unresearched vehicles are left out rather than reported as zero.
#[derive(Debug, Clone, Copy)]
pub struct UnresearchedByModelYear {
    /// Last year on the axis, usually the current calendar year.
    pub reference_year: i32,
    /// How many years before `reference_year` to include.
    pub window: i32,
}

impl UnresearchedByModelYear {
    /// Fifteen-year window ending at `reference_year`.
    pub const fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            window: 15,
        }
    }

    /// Whether the year is on the axis.
    pub const fn covers(&self, year: i32) -> bool {
        year >= self.reference_year - self.window && year <= self.reference_year
    }
}

impl Aggregation for UnresearchedByModelYear {
    type Row = YearTypeRow;

    fn name(&self) -> &'static str {
        "unresearched_by_model_year"
    }

    fn description(&self) -> &'static str {
        "Vehicles of unresearched eligibility by recent model year"
    }

    #[instrument(
        skip(self, records),
        fields(records = records.len(), reference_year = self.reference_year)
    )]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<YearTypeRow> {
        let recent: Vec<&VehicleRecord> = unresearched(records)
            .into_iter()
            .filter(|r| self.covers(r.model_year))
            .collect();
        let rows = group_by(&recent, |r| r.model_year, |members| {
            TypeCounts::tally(members.iter().map(|r| **r))
        })
        .into_rows(|year, counts| YearTypeRow {
            year,
            counts,
            total: counts.total(),
        });

        let rows = top_n(
            rows,
            |r| f64::from(r.year),
            Limit::All,
            SortDirection::Ascending,
        );
        debug!("Aggregated {} unresearched model years", rows.len());
        rows
    }
}
