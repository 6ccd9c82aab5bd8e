//! Per-group tallies shared by several charts.

use serde::Serialize;

use evdash_common::{CafvEligibility, ElectricVehicleType, VehicleRecord};

use crate::metrics::percentage;

/// Stacking order of the drivetrain charts, BEV at the bottom.
pub const TYPE_STACK_KEYS: [&str; 2] = ["bev", "phev"];

/// Stacking order of the eligibility charts, eligible at the bottom.
pub const ELIGIBILITY_STACK_KEYS: [&str; 3] = ["eligible", "ineligible", "unresearched"];

/// Eligible / ineligible / unresearched counts for a group of records.
///
/// The three counts always add up to the number of records tallied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityCounts {
    /// CAFV eligible.
    pub eligible: usize,
    /// Not eligible due to low battery range.
    pub ineligible: usize,
    /// Range not researched.
    pub unresearched: usize,
}

impl EligibilityCounts {
    /// Tallies eligibility over the records.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.add(record.cafv_eligibility);
        }
        counts
    }

    /// Counts one more record.
    pub fn add(&mut self, eligibility: CafvEligibility) {
        match eligibility {
            CafvEligibility::Eligible => self.eligible += 1,
            CafvEligibility::IneligibleLowRange => self.ineligible += 1,
            CafvEligibility::EligibilityUnknown => self.unresearched += 1,
        }
    }

    /// Records tallied.
    pub const fn total(&self) -> usize {
        self.eligible + self.ineligible + self.unresearched
    }

    /// Count for one eligibility class.
    pub const fn get(&self, eligibility: CafvEligibility) -> usize {
        match eligibility {
            CafvEligibility::Eligible => self.eligible,
            CafvEligibility::IneligibleLowRange => self.ineligible,
            CafvEligibility::EligibilityUnknown => self.unresearched,
        }
    }

    /// Percentage breakdown; all zeros for an empty tally.
    pub fn shares(&self) -> EligibilityShares {
        let total = self.total();
        EligibilityShares {
            eligible: percentage(self.eligible, total),
            ineligible: percentage(self.ineligible, total),
            unresearched: percentage(self.unresearched, total),
        }
    }

    /// Value for a stack key (`eligible`, `ineligible`, `unresearched`).
    pub fn stack_value(&self, key: &str) -> Option<f64> {
        match key {
            "eligible" => Some(self.eligible as f64),
            "ineligible" => Some(self.ineligible as f64),
            "unresearched" => Some(self.unresearched as f64),
            _ => None,
        }
    }
}

/// Percentages matching [`EligibilityCounts`], rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EligibilityShares {
    /// Percent eligible.
    pub eligible: f64,
    /// Percent ineligible.
    pub ineligible: f64,
    /// Percent unresearched.
    pub unresearched: f64,
}

/// BEV / PHEV counts for a group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    /// Battery electric vehicles.
    pub bev: usize,
    /// Plug-in hybrids.
    pub phev: usize,
}

impl TypeCounts {
    /// Tallies drivetrain types over the records.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.ev_type {
                ElectricVehicleType::BatteryElectric => counts.bev += 1,
                ElectricVehicleType::PlugInHybrid => counts.phev += 1,
            }
        }
        counts
    }

    /// BEV plus PHEV.
    pub const fn total(&self) -> usize {
        self.bev + self.phev
    }

    /// Value for a stack key (`bev`, `phev`).
    pub fn stack_value(&self, key: &str) -> Option<f64> {
        match key {
            "bev" => Some(self.bev as f64),
            "phev" => Some(self.phev as f64),
            _ => None,
        }
    }
}
