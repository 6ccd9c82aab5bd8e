//! Test utilities and shared fixtures for the EV dashboard workspace.
//!
//! Available to this crate's unit tests and, through the `testing` feature,
//! to the unit and integration tests of the other crates.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary file for tests that automatically cleans up.
pub fn create_temp_file() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().expect("Failed to create temporary file")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builders for vehicle records.
pub mod record_fixtures {
    use crate::types::{CafvEligibility, ElectricVehicleType, VehicleRecord};

    /// Fluent builder with dashboard-typical defaults (a researched BEV in King county).
    #[derive(Debug, Clone)]
    pub struct RecordBuilder {
        record: VehicleRecord,
    }

    impl RecordBuilder {
        /// Starts from the default record.
        pub fn new() -> Self {
            Self {
                record: VehicleRecord {
                    county: "King".to_string(),
                    city: "Seattle".to_string(),
                    make: "TESLA".to_string(),
                    model_year: 2022,
                    ev_type: ElectricVehicleType::BatteryElectric,
                    electric_range: 200,
                    cafv_eligibility: CafvEligibility::Eligible,
                },
            }
        }

        /// Sets the county.
        pub fn county(mut self, county: &str) -> Self {
            self.record.county = county.to_string();
            self
        }

        /// Sets the city.
        pub fn city(mut self, city: &str) -> Self {
            self.record.city = city.to_string();
            self
        }

        /// Sets the make.
        pub fn make(mut self, make: &str) -> Self {
            self.record.make = make.to_string();
            self
        }

        /// Sets the model year.
        pub fn year(mut self, year: i32) -> Self {
            self.record.model_year = year;
            self
        }

        /// Marks the record as a plug-in hybrid.
        pub fn phev(mut self) -> Self {
            self.record.ev_type = ElectricVehicleType::PlugInHybrid;
            self
        }

        /// Marks the record as a battery electric vehicle.
        pub fn bev(mut self) -> Self {
            self.record.ev_type = ElectricVehicleType::BatteryElectric;
            self
        }

        /// Sets range and eligibility together.
        pub fn range(mut self, miles: u32, eligibility: CafvEligibility) -> Self {
            self.record.electric_range = miles;
            self.record.cafv_eligibility = eligibility;
            self
        }

        /// Zero range, eligibility unknown.
        pub fn unresearched(self) -> Self {
            self.range(0, CafvEligibility::EligibilityUnknown)
        }

        /// Finishes the record.
        pub fn build(self) -> VehicleRecord {
            self.record
        }
    }

    impl Default for RecordBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    /// `count` copies of the builder's record.
    pub fn repeat(builder: &RecordBuilder, count: usize) -> Vec<VehicleRecord> {
        (0..count).map(|_| builder.clone().build()).collect()
    }

    /// A small mixed table covering every enum variant across two counties.
    pub fn sample_table() -> Vec<VehicleRecord> {
        let mut records = Vec::new();
        records.extend(repeat(
            &RecordBuilder::new().make("TESLA").range(310, CafvEligibility::Eligible),
            4,
        ));
        records.extend(repeat(
            &RecordBuilder::new().make("TESLA").city("Bellevue").unresearched(),
            2,
        ));
        records.extend(repeat(
            &RecordBuilder::new()
                .make("TOYOTA")
                .phev()
                .year(2019)
                .range(25, CafvEligibility::IneligibleLowRange),
            3,
        ));
        records.extend(repeat(
            &RecordBuilder::new()
                .county("Pierce")
                .city("Tacoma")
                .make("NISSAN")
                .year(2015)
                .range(84, CafvEligibility::Eligible),
            2,
        ));
        records.push(
            RecordBuilder::new()
                .county("Pierce")
                .city("Tacoma")
                .make("CHEVROLET")
                .phev()
                .year(2018)
                .range(53, CafvEligibility::Eligible)
                .build(),
        );
        records
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use crate::types::{CafvEligibility, ElectricVehicleType, VehicleRecord};
    use proptest::prelude::*;

    /// Strategy for the drivetrain type.
    pub fn ev_type_strategy() -> impl Strategy<Value = ElectricVehicleType> {
        prop_oneof![
            Just(ElectricVehicleType::BatteryElectric),
            Just(ElectricVehicleType::PlugInHybrid),
        ]
    }

    /// Strategy for a record that honours the zero-range convention.
    ///
    /// Names are drawn from small pools so that groups collide.
    pub fn record_strategy() -> impl Strategy<Value = VehicleRecord> {
        (
            prop::sample::select(vec!["King", "Pierce", "Snohomish", "Clark"]),
            prop::sample::select(vec!["Seattle", "Tacoma", "Everett", "Vancouver", "Bellevue"]),
            prop::sample::select(vec!["TESLA", "NISSAN", "KIA", "FORD", "BMW", "TOYOTA"]),
            2008i32..=2025,
            ev_type_strategy(),
            prop_oneof![Just(0u32), 1u32..=400],
            any::<bool>(),
        )
            .prop_map(|(county, city, make, model_year, ev_type, range, eligible)| {
                let cafv_eligibility = if range == 0 {
                    CafvEligibility::EligibilityUnknown
                } else if eligible {
                    CafvEligibility::Eligible
                } else {
                    CafvEligibility::IneligibleLowRange
                };
                VehicleRecord {
                    county: county.to_string(),
                    city: city.to_string(),
                    make: make.to_string(),
                    model_year,
                    ev_type,
                    electric_range: range,
                    cafv_eligibility,
                }
            })
    }

    /// Strategy for a table of up to `max_len` records.
    pub fn table_strategy(max_len: usize) -> impl Strategy<Value = Vec<VehicleRecord>> {
        prop::collection::vec(record_strategy(), 0..=max_len)
    }
}
