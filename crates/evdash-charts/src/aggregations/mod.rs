//! Named chart preparations, one per dashboard chart.
//!
//! Each takes the (already filtered) table and returns the summary rows its
//! chart consumes. None of them fail: empty input gives empty output.

use serde::Serialize;

use evdash_common::VehicleRecord;

pub mod cities;
pub mod counties;
pub mod eligibility;
pub mod ev_types;
pub mod makes;
pub mod unresearched;

pub use cities::*;
pub use counties::*;
pub use eligibility::*;
pub use ev_types::*;
pub use makes::*;
pub use unresearched::*;

/// A pure `records -> rows` preparation for one chart.
pub trait Aggregation {
    /// Summary row type.
    type Row: Serialize;

    /// Stable identifier used as the report key.
    fn name(&self) -> &'static str;

    /// Human readable description.
    fn description(&self) -> &'static str;

    /// Computes the rows. Calling twice on the same input gives equal rows.
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<Self::Row>;
}

/// A label with a record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    /// Category label.
    pub label: String,
    /// Records in the category.
    pub count: usize,
}
