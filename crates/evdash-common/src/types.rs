//! Vehicle record types and the source-table conventions they decode from.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvDashError;

/// Drivetrain classification of a registered vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectricVehicleType {
    /// Battery Electric Vehicle (BEV).
    #[serde(rename = "Battery Electric Vehicle (BEV)")]
    BatteryElectric,
    /// Plug-in Hybrid Electric Vehicle (PHEV).
    #[serde(rename = "Plug-in Hybrid Electric Vehicle (PHEV)")]
    PlugInHybrid,
}

impl ElectricVehicleType {
    /// Both variants, in the order the dashboard lists them.
    pub const ALL: [Self; 2] = [Self::BatteryElectric, Self::PlugInHybrid];

    /// The cell value used by the source table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BatteryElectric => "Battery Electric Vehicle (BEV)",
            Self::PlugInHybrid => "Plug-in Hybrid Electric Vehicle (PHEV)",
        }
    }

    /// Short form used for stack keys and legends.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::BatteryElectric => "BEV",
            Self::PlugInHybrid => "PHEV",
        }
    }
}

impl fmt::Display for ElectricVehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ElectricVehicleType {
    type Err = EvDashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label() == trimmed || t.abbreviation().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                EvDashError::validation_field(
                    format!("unknown electric vehicle type '{trimmed}'"),
                    "Electric Vehicle Type",
                )
            })
    }
}

/// Clean Alternative Fuel Vehicle eligibility as reported by the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CafvEligibility {
    /// Eligible for the CAFV incentive.
    #[serde(rename = "Clean Alternative Fuel Vehicle Eligible")]
    Eligible,
    /// Not eligible because the battery range is too low.
    #[serde(rename = "Not eligible due to low battery range")]
    IneligibleLowRange,
    /// Battery range has not been researched yet.
    #[serde(rename = "Eligibility unknown as battery range has not been researched")]
    EligibilityUnknown,
}

impl CafvEligibility {
    /// All variants in stacking order (eligible at the bottom).
    pub const ALL: [Self; 3] = [
        Self::Eligible,
        Self::IneligibleLowRange,
        Self::EligibilityUnknown,
    ];

    /// The cell value used by the source table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Clean Alternative Fuel Vehicle Eligible",
            Self::IneligibleLowRange => "Not eligible due to low battery range",
            Self::EligibilityUnknown => {
                "Eligibility unknown as battery range has not been researched"
            }
        }
    }

    /// Short legend name.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Eligible => "Eligible",
            Self::IneligibleLowRange => "Ineligible",
            Self::EligibilityUnknown => "Unresearched",
        }
    }
}

impl fmt::Display for CafvEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CafvEligibility {
    type Err = EvDashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.label() == trimmed || e.short_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                EvDashError::validation_field(
                    format!("unknown CAFV eligibility '{trimmed}'"),
                    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
                )
            })
    }
}

/// One row of the vehicle population table.
///
/// Field names map onto the headers of the Washington State export; any
/// other columns in the file are ignored on load.
///
/// An `electric_range` of zero does not mean a zero-range vehicle: the
/// dataset uses it for "range not researched", which pairs with
/// [`CafvEligibility::EligibilityUnknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// County of registration.
    #[serde(rename = "County")]
    pub county: String,
    /// City of registration.
    #[serde(rename = "City")]
    pub city: String,
    /// Manufacturer.
    #[serde(rename = "Make")]
    pub make: String,
    /// Model year.
    #[serde(rename = "Model Year")]
    pub model_year: i32,
    /// Drivetrain type.
    #[serde(rename = "Electric Vehicle Type")]
    pub ev_type: ElectricVehicleType,
    /// All-electric range in miles, zero when not researched.
    #[serde(rename = "Electric Range", deserialize_with = "range_or_zero")]
    pub electric_range: u32,
    /// CAFV eligibility.
    #[serde(rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility")]
    pub cafv_eligibility: CafvEligibility,
}

impl VehicleRecord {
    /// True when the record is a battery electric vehicle.
    pub fn is_bev(&self) -> bool {
        self.ev_type == ElectricVehicleType::BatteryElectric
    }

    /// True when the record is a plug-in hybrid.
    pub fn is_phev(&self) -> bool {
        self.ev_type == ElectricVehicleType::PlugInHybrid
    }

    /// True when the battery range has not been researched.
    pub fn is_unresearched(&self) -> bool {
        self.cafv_eligibility == CafvEligibility::EligibilityUnknown
    }
}

/// Reads a range cell. Blank text is read as the zero sentinel, matching how
/// the dashboard coerced empty cells.
fn range_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct RangeVisitor;

    impl<'de> Visitor<'de> for RangeVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative range in miles or an empty cell")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("range {v} out of bounds")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("range {v} out of bounds")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse()
                .map_err(|_| E::custom(format!("invalid electric range '{trimmed}'")))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(RangeVisitor)
}
