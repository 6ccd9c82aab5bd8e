//! Average electric range per make, ranked by volume or by range.

use serde::Serialize;
use tracing::{debug, instrument};

use evdash_common::VehicleRecord;

use super::Aggregation;
use crate::counts::TypeCounts;
use crate::group::group_by;
use crate::metrics::{mean_electric_range, percentage};
use crate::ranking::{top_n_where, Limit, SortDirection};

/// Per-make summary shown on the range bars and their tooltips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MakeRangeRow {
    /// Manufacturer.
    pub make: String,
    /// Mean electric range in miles, unresearched vehicles counted as zero.
    pub avg_range: f64,
    /// BEV / PHEV counts.
    #[serde(flatten)]
    pub types: TypeCounts,
    /// Vehicles whose range has not been researched.
    pub unresearched: usize,
    /// All vehicles of the make.
    pub total: usize,
    /// Percentage breakdown for the tooltip.
    pub shares: MakeShares,
}

/// Tooltip percentages of a [`MakeRangeRow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MakeShares {
    /// Percent BEV.
    pub bev: f64,
    /// Percent PHEV.
    pub phev: f64,
    /// Percent with unresearched range.
    pub unresearched: f64,
}

/// One summary row per make, in first-seen order.
pub fn make_range_summary(records: &[VehicleRecord]) -> Vec<MakeRangeRow> {
    group_by(records, |r| r.make.clone(), |members| {
        let types = TypeCounts::tally(members.iter().copied());
        let unresearched = members.iter().filter(|r| r.is_unresearched()).count();
        let total = members.len();
        (
            mean_electric_range(members.iter().copied()),
            types,
            unresearched,
            total,
        )
    })
    .into_rows(|make, (avg_range, types, unresearched, total)| MakeRangeRow {
        make,
        avg_range,
        types,
        unresearched,
        total,
        shares: MakeShares {
            bev: percentage(types.bev, total),
            phev: percentage(types.phev, total),
            unresearched: percentage(unresearched, total),
        },
    })
}

/// How the make chart is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeRanking {
    /// Most vehicles first.
    ByCount,
    /// Highest average range first.
    ByAverageRange,
}

/// Makes with more than `more_than` vehicles, top `limit` by the ranking.
#[derive(Debug, Clone, Copy)]
pub struct MakeRangeChart {
    /// Ordering of the chart.
    pub ranking: MakeRanking,
    /// Makes need strictly more vehicles than this to appear.
    pub more_than: usize,
    /// Makes to keep.
    pub limit: usize,
}

impl MakeRangeChart {
    /// Volume-ranked chart with the dashboard defaults.
    pub const fn by_count() -> Self {
        Self {
            ranking: MakeRanking::ByCount,
            more_than: 1000,
            limit: 15,
        }
    }

    /// Range-ranked chart with the dashboard defaults.
    pub const fn by_average_range() -> Self {
        Self {
            ranking: MakeRanking::ByAverageRange,
            more_than: 1000,
            limit: 15,
        }
    }

    /// Overrides threshold and limit.
    #[must_use]
    pub const fn with_limits(mut self, more_than: usize, limit: usize) -> Self {
        self.more_than = more_than;
        self.limit = limit;
        self
    }
}

impl Aggregation for MakeRangeChart {
    type Row = MakeRangeRow;

    fn name(&self) -> &'static str {
        match self.ranking {
            MakeRanking::ByCount => "makes_by_count",
            MakeRanking::ByAverageRange => "makes_by_avg_range",
        }
    }

    fn description(&self) -> &'static str {
        match self.ranking {
            MakeRanking::ByCount => "Average electric range of the most common makes",
            MakeRanking::ByAverageRange => "Makes with the highest average electric range",
        }
    }

    #[instrument(
        skip(self, records),
        fields(records = records.len(), ranking = ?self.ranking, more_than = self.more_than)
    )]
    fn aggregate(&self, records: &[VehicleRecord]) -> Vec<MakeRangeRow> {
        let more_than = self.more_than;
        let keep = |row: &MakeRangeRow| row.total > more_than;
        let rows = make_range_summary(records);

        let top = match self.ranking {
            MakeRanking::ByCount => top_n_where(
                rows,
                keep,
                |r| r.total as f64,
                Limit::Top(self.limit),
                SortDirection::Descending,
            ),
            MakeRanking::ByAverageRange => top_n_where(
                rows,
                keep,
                |r| r.avg_range,
                Limit::Top(self.limit),
                SortDirection::Descending,
            ),
        };
        debug!("Aggregated {} makes", top.len());
        top
    }
}
