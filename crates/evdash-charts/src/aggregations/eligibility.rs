//! CAFV eligibility broken down by electric range and by model year.

use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::VehicleRecord;

use super::Aggregation;
use crate::binning::{bin_by_range, default_range_bins, EligibilityRow, RangeBin};
use crate::counts::{EligibilityCounts, EligibilityShares};
use crate::group::group_by;
use crate::ranking::{top_n, Limit, SortDirection};
use crate::stack::StackValues;

/// Eligibility per electric-range bin, in bin order.
#[derive(Debug, Clone)]
pub struct EligibilityByRange {
    /// Bins along the x axis.
    pub bins: Vec<RangeBin>,
}

impl Default for EligibilityByRange {
    fn default() -> Self {
        Self {
            bins: default_range_bins(),
        }
    }
}

impl Aggregation for EligibilityByRange {
    type Row = EligibilityRow;

    fn name(&self) -> &'static str {
        "eligibility_by_range"
    }

    fn description(&self) -> &'static str {
        "CAFV eligibility by electric range"
    }

    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<EligibilityRow> {
        bin_by_range(records, &self.bins)
    }
}

/// Eligibility counts for one model year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearEligibilityRow {
    /// Model year.
    pub year: i32,
    /// Eligibility counts.
    #[serde(flatten)]
    pub counts: EligibilityCounts,
    /// Vehicles of the year.
    pub total: usize,
    /// Percentage breakdown of `counts`.
    pub shares: EligibilityShares,
}

impl StackValues for YearEligibilityRow {
    fn stack_value(&self, key: &str) -> Option<f64> {
        self.counts.stack_value(key)
    }
}

/// Eligibility per model year, oldest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct EligibilityByModelYear;

impl Aggregation for EligibilityByModelYear {
    type Row = YearEligibilityRow;

    fn name(&self) -> &'static str {
        "eligibility_by_model_year"
    }

    fn description(&self) -> &'static str {
        "CAFV eligibility by model year"
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<YearEligibilityRow> {
        let rows = group_by(records, |r| r.model_year, |members| {
            EligibilityCounts::tally(members.iter().copied())
        })
        .into_rows(|year, counts| YearEligibilityRow {
            year,
            counts,
            total: counts.total(),
            shares: counts.shares(),
        });

        let rows = top_n(
            rows,
            |r| f64::from(r.year),
            Limit::All,
            SortDirection::Ascending,
        );
        debug!("Aggregated {} model years", rows.len());
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::ELIGIBILITY_STACK_KEYS;
    use crate::stack::stack;
    use evdash_common::test_utils::record_fixtures::sample_table;

    #[test]
    fn test_range_chart_uses_default_bins() {
        let rows = EligibilityByRange::default().aggregate(&sample_table());
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["0-50 miles", "50-100 miles", "100-150 miles", "150-200 miles", "> 200 miles"]
        );
        // Unresearched TESLAs (0) and TOYOTAs (25) land in the first bin.
        assert_eq!(rows[0].counts.unresearched, 2);
        assert_eq!(rows[0].counts.ineligible, 3);
        // NISSAN (84) and CHEVROLET (53).
        assert_eq!(rows[1].counts.eligible, 3);
        assert_eq!(rows[4].counts.eligible, 4);
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), 12);
    }

    #[test]
    fn test_years_ascending() {
        let rows = EligibilityByModelYear.aggregate(&sample_table());
        let years: Vec<_> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2015, 2018, 2019, 2022]);

        let latest = rows.last().unwrap();
        assert_eq!(latest.counts.eligible, 4);
        assert_eq!(latest.counts.unresearched, 2);
        assert_eq!(latest.shares.eligible, 66.67);
    }

    #[test]
    fn test_year_rows_stack() {
        let rows = EligibilityByModelYear.aggregate(&sample_table());
        let series = stack(&rows, &ELIGIBILITY_STACK_KEYS);
        assert_eq!(series.len(), 3);
        let top = series[2].points.last().unwrap().top;
        assert_eq!(top, 6.0);
    }

    #[test]
    fn test_empty_table() {
        assert!(EligibilityByModelYear.aggregate(&[]).is_empty());
        let rows = EligibilityByRange::default().aggregate(&[]);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.total == 0));
    }
}
