//! Runs every chart preparation over one filtered view of the table.

use chrono::Datelike;
use serde::Serialize;
use tracing::{info, instrument, warn};

use evdash_common::{RecordFilter, VehicleRecord};
use evdash_config::ChartsConfig;

use crate::aggregations::{
    Aggregation, CityTypeRow, CountyDistribution, EligibilityByModelYear, EligibilityByRange,
    EvTypeShare, EvTypeShareRow, LabelCount, MakeRangeChart, MakeRangeRow, TopCitiesByType,
    TopCounties, TopUnresearchedMakes, UnresearchedByModelYear, UnresearchedMakeRow,
    YearEligibilityRow, YearTypeRow,
};
use crate::binning::{EligibilityRow, RangeBin};
use crate::counts::{ELIGIBILITY_STACK_KEYS, TYPE_STACK_KEYS};
use crate::stack::{stack, StackValues, StackedSeries};

/// Calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Rows of a stacked bar chart together with their stacked series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedChart<R> {
    /// Stack keys, bottom to top.
    pub keys: Vec<String>,
    /// One row per bar.
    pub rows: Vec<R>,
    /// One series per key.
    pub series: Vec<StackedSeries>,
}

impl<R: StackValues> StackedChart<R> {
    /// Stacks `rows` on `keys`.
    pub fn new(rows: Vec<R>, keys: &[&str]) -> Self {
        let series = stack(&rows, keys);
        Self {
            keys: keys.iter().map(ToString::to_string).collect(),
            rows,
            series,
        }
    }
}

/// Everything the dashboard page draws, for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// The selection the report was computed for.
    pub filter: RecordFilter,
    /// Records left after filtering.
    pub record_count: usize,
    /// Last model year of the unresearched-by-year chart.
    pub reference_year: i32,
    /// Vehicle type pie.
    pub ev_type_share: Vec<EvTypeShareRow>,
    /// County selector entries, always over the full table.
    pub county_options: Vec<LabelCount>,
    /// Choropleth values.
    pub county_distribution: Vec<LabelCount>,
    /// Cities stacked by drivetrain.
    pub top_cities: StackedChart<CityTypeRow>,
    /// Most common makes with their average range.
    pub makes_by_count: Vec<MakeRangeRow>,
    /// Longest-range makes.
    pub makes_by_avg_range: Vec<MakeRangeRow>,
    /// Eligibility stacked per range bin.
    pub eligibility_by_range: StackedChart<EligibilityRow>,
    /// Eligibility stacked per model year.
    pub eligibility_by_model_year: StackedChart<YearEligibilityRow>,
    /// Makes with the most unresearched vehicles.
    pub top_unresearched_makes: StackedChart<UnresearchedMakeRow>,
    /// Unresearched vehicles stacked per recent model year.
    pub unresearched_by_model_year: StackedChart<YearTypeRow>,
}

/// Holds the configured chart preparations and runs them together.
#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    ev_types: EvTypeShare,
    county_options: TopCounties,
    county_distribution: CountyDistribution,
    cities: TopCitiesByType,
    makes_by_count: MakeRangeChart,
    makes_by_avg_range: MakeRangeChart,
    eligibility_by_range: EligibilityByRange,
    eligibility_by_model_year: EligibilityByModelYear,
    unresearched_makes: TopUnresearchedMakes,
    unresearched_by_model_year: UnresearchedByModelYear,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new(current_year())
    }
}

impl DashboardBuilder {
    /// Dashboard defaults with an explicit reference year.
    pub fn new(reference_year: i32) -> Self {
        Self {
            ev_types: EvTypeShare,
            county_options: TopCounties::default(),
            county_distribution: CountyDistribution,
            cities: TopCitiesByType::default(),
            makes_by_count: MakeRangeChart::by_count(),
            makes_by_avg_range: MakeRangeChart::by_average_range(),
            eligibility_by_range: EligibilityByRange::default(),
            eligibility_by_model_year: EligibilityByModelYear,
            unresearched_makes: TopUnresearchedMakes::default(),
            unresearched_by_model_year: UnresearchedByModelYear::new(reference_year),
        }
    }

    /// Builder matching the chart configuration.
    ///
    /// Without a configured reference year the current calendar year is used.
    pub fn from_config(charts: &ChartsConfig) -> Self {
        let reference_year = charts.reference_year.unwrap_or_else(current_year);
        Self {
            ev_types: EvTypeShare,
            county_options: TopCounties {
                limit: charts.top_counties,
            },
            county_distribution: CountyDistribution,
            cities: TopCitiesByType {
                limit: charts.top_cities,
            },
            makes_by_count: MakeRangeChart::by_count()
                .with_limits(charts.make_count_threshold, charts.top_makes),
            makes_by_avg_range: MakeRangeChart::by_average_range()
                .with_limits(charts.make_count_threshold, charts.top_makes),
            eligibility_by_range: EligibilityByRange {
                bins: charts.range_bins.iter().map(RangeBin::from).collect(),
            },
            eligibility_by_model_year: EligibilityByModelYear,
            unresearched_makes: TopUnresearchedMakes {
                limit: charts.top_unresearched_makes,
            },
            unresearched_by_model_year: UnresearchedByModelYear {
                reference_year,
                window: charts.recent_year_window,
            },
        }
    }

    /// Reference year of the unresearched-by-year chart.
    pub const fn reference_year(&self) -> i32 {
        self.unresearched_by_model_year.reference_year
    }

    /// Names of the charts in report order.
    pub fn chart_names(&self) -> [&'static str; 10] {
        [
            self.ev_types.name(),
            self.county_options.name(),
            self.county_distribution.name(),
            self.cities.name(),
            self.makes_by_count.name(),
            self.makes_by_avg_range.name(),
            self.eligibility_by_range.name(),
            self.eligibility_by_model_year.name(),
            self.unresearched_makes.name(),
            self.unresearched_by_model_year.name(),
        ]
    }

    /// Computes the full report.
    ///
    /// County options are ranked over all of `records`; every other chart
    /// sees only the records matching `filter`. Building twice from the same
    /// input gives equal reports.
    #[instrument(skip(self, records), fields(records = records.len(), filter = %filter))]
    pub fn build(&self, records: &[VehicleRecord], filter: &RecordFilter) -> DashboardReport {
        let selected = filter.apply(records);
        if selected.is_empty() && !records.is_empty() {
            warn!("no records match the selection, charts will be empty");
        }

        let report = DashboardReport {
            filter: filter.clone(),
            record_count: selected.len(),
            reference_year: self.reference_year(),
            ev_type_share: self.ev_types.aggregate(&selected),
            county_options: self.county_options.aggregate(records),
            county_distribution: self.county_distribution.aggregate(&selected),
            top_cities: StackedChart::new(self.cities.aggregate(&selected), &TYPE_STACK_KEYS),
            makes_by_count: self.makes_by_count.aggregate(&selected),
            makes_by_avg_range: self.makes_by_avg_range.aggregate(&selected),
            eligibility_by_range: StackedChart::new(
                self.eligibility_by_range.aggregate(&selected),
                &ELIGIBILITY_STACK_KEYS,
            ),
            eligibility_by_model_year: StackedChart::new(
                self.eligibility_by_model_year.aggregate(&selected),
                &ELIGIBILITY_STACK_KEYS,
            ),
            top_unresearched_makes: StackedChart::new(
                self.unresearched_makes.aggregate(&selected),
                &TYPE_STACK_KEYS,
            ),
            unresearched_by_model_year: StackedChart::new(
                self.unresearched_by_model_year.aggregate(&selected),
                &TYPE_STACK_KEYS,
            ),
        };

        info!(records = report.record_count, "built dashboard report");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdash_common::test_utils::record_fixtures::sample_table;

    #[test]
    fn test_county_options_ignore_filter() {
        let records = sample_table();
        let report = DashboardBuilder::new(2024).build(&records, &RecordFilter::county("Pierce"));

        assert_eq!(report.record_count, 3);
        let options: Vec<_> = report.county_options.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(options, vec!["King", "Pierce"]);
        assert_eq!(report.county_distribution.len(), 1);
        assert_eq!(report.county_distribution[0].count, 3);
    }

    #[test]
    fn test_builder_from_config() {
        let mut charts = ChartsConfig::default();
        charts.reference_year = Some(2020);
        charts.top_cities = 1;
        let builder = DashboardBuilder::from_config(&charts);
        assert_eq!(builder.reference_year(), 2020);

        let report = builder.build(&sample_table(), &RecordFilter::All);
        assert_eq!(report.top_cities.rows.len(), 1);
        assert_eq!(report.eligibility_by_range.rows.len(), charts.range_bins.len());
    }

    #[test]
    fn test_stacked_chart_keeps_keys() {
        let report = DashboardBuilder::new(2024).build(&sample_table(), &RecordFilter::All);
        assert_eq!(report.top_cities.keys, vec!["bev", "phev"]);
        assert_eq!(report.top_cities.series.len(), 2);
        assert_eq!(
            report.eligibility_by_model_year.keys,
            vec!["eligible", "ineligible", "unresearched"]
        );
    }

    #[test]
    fn test_chart_names_are_unique() {
        let names = DashboardBuilder::new(2024).chart_names();
        let mut sorted = names.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }
}
