//! # EvDash Charts
//!
//! Aggregation core of the EV population dashboard.
//!
//! Every chart on the dashboard is a pure function from a slice of
//! [`VehicleRecord`](evdash_common::VehicleRecord)s to a vector of summary
//! rows. They are assembled from four primitives:
//!
//! - [`group_by`] / [`count_by`]: partition records by a key and reduce each group
//! - [`bin_by_range`]: eligibility counts per electric-range interval
//! - [`top_n`] / [`top_n_where`]: stable ranking with an optional pre-filter
//! - [`mean_electric_range`], [`percentage`], [`stack`]: derived metrics
//!
//! [`DashboardBuilder`] runs all chart preparations for one filter selection
//! and a [`DashboardRenderer`] hands the result to the drawing layer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregations;
pub mod binning;
pub mod counts;
pub mod dashboard;
pub mod group;
pub mod metrics;
pub mod ranking;
pub mod renderer;
pub mod stack;

pub use aggregations::*;
pub use binning::{bin_by_range, default_range_bins, EligibilityRow, RangeBin};
pub use counts::{
    EligibilityCounts, EligibilityShares, TypeCounts, ELIGIBILITY_STACK_KEYS, TYPE_STACK_KEYS,
};
pub use dashboard::{current_year, DashboardBuilder, DashboardReport, StackedChart};
pub use group::{count_by, group_by, Groups};
pub use metrics::{mean, mean_electric_range, percentage, round_to};
pub use ranking::{top_n, top_n_where, Limit, SortDirection};
pub use renderer::{DashboardRenderer, JsonRenderer};
pub use stack::{stack, StackPoint, StackValues, StackedSeries};
