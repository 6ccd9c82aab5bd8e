//! # EvDash
//!
//! Command line front end of the EV population dashboard.
//!
//! Loads the configuration and the vehicle table, applies the selected
//! filter, and writes the rendered dashboard report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
