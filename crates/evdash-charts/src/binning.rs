//! Electric-range bins with an eligibility breakdown per bin.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use evdash_common::VehicleRecord;
use evdash_config::RangeBinConfig;

use crate::counts::{EligibilityCounts, EligibilityShares};
use crate::stack::StackValues;

/// A labelled electric-range interval `(above, up_to]`.
///
/// A missing bound is open. The zero-range sentinel is treated as a real
/// zero, so unresearched vehicles fall into whichever bin contains 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBin {
    /// Axis label.
    pub label: String,
    /// Exclusive lower bound in miles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<u32>,
    /// Inclusive upper bound in miles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u32>,
}

impl RangeBin {
    /// Creates a bin.
    pub fn new(label: impl Into<String>, above: Option<u32>, up_to: Option<u32>) -> Self {
        Self {
            label: label.into(),
            above,
            up_to,
        }
    }

    /// Whether a range in miles falls in this bin.
    pub fn contains(&self, miles: u32) -> bool {
        self.above.map_or(true, |lo| miles > lo) && self.up_to.map_or(true, |hi| miles <= hi)
    }

    /// Whether the record's range falls in this bin.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.contains(record.electric_range)
    }
}

impl From<&RangeBinConfig> for RangeBin {
    fn from(config: &RangeBinConfig) -> Self {
        Self::new(config.label.clone(), config.above, config.up_to)
    }
}

/// The dashboard's five 50-mile buckets: `<= 50`, ..., `> 200`.
pub fn default_range_bins() -> Vec<RangeBin> {
    vec![
        RangeBin::new("0-50 miles", None, Some(50)),
        RangeBin::new("50-100 miles", Some(50), Some(100)),
        RangeBin::new("100-150 miles", Some(100), Some(150)),
        RangeBin::new("150-200 miles", Some(150), Some(200)),
        RangeBin::new("> 200 miles", Some(200), None),
    ]
}

/// One bin of the eligibility-by-range chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityRow {
    /// Bin label.
    pub label: String,
    /// Eligibility counts inside the bin.
    #[serde(flatten)]
    pub counts: EligibilityCounts,
    /// Records in the bin.
    pub total: usize,
    /// Percentage breakdown of `counts`.
    pub shares: EligibilityShares,
}

impl EligibilityRow {
    /// Builds a row from its counts.
    pub fn new(label: impl Into<String>, counts: EligibilityCounts) -> Self {
        Self {
            label: label.into(),
            counts,
            total: counts.total(),
            shares: counts.shares(),
        }
    }
}

impl StackValues for EligibilityRow {
    fn stack_value(&self, key: &str) -> Option<f64> {
        self.counts.stack_value(key)
    }
}

/// Counts eligibility per bin, in bin order.
///
/// Each record is tested against every bin on its own, so overlapping bins
/// count a record more than once and gaps drop it. With no records every bin
/// reports zeros; with no bins the result is empty.
#[instrument(skip(records, bins), fields(records = records.len(), bins = bins.len()))]
pub fn bin_by_range(records: &[VehicleRecord], bins: &[RangeBin]) -> Vec<EligibilityRow> {
    let rows: Vec<EligibilityRow> = bins
        .iter()
        .map(|bin| {
            let counts = EligibilityCounts::tally(records.iter().filter(|r| bin.matches(r)));
            EligibilityRow::new(bin.label.clone(), counts)
        })
        .collect();

    debug!("Binned records into {} range bins", rows.len());
    rows
}
