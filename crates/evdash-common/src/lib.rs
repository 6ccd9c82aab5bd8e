//! # EvDash Common
//!
//! Shared vehicle types, error handling, logging, and table loading for the
//! electric vehicle population dashboard.
//!
//! Everything that touches the outside world lives here; the aggregation
//! crate only ever sees fully typed [`VehicleRecord`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{EvDashError, Result};
pub use filter::RecordFilter;
pub use loader::{parse_table, parse_table_with_delimiter, TableLoader, VehicleTable};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
