//! Solar-plus-battery dispatch and degradation simulator.
//!
//! The core ([`sim`] and [`degradation`]) is pure and synchronous. The
//! remaining modules load scenarios and records and drive a run.

pub mod cli;
/// Scenario configuration, presets and validation.
pub mod config;
pub mod degradation;
/// CSV record import and ledger export.
pub mod io;
pub mod logging;
pub mod runner;
/// Dispatch simulation, wear accounting and reporting.
pub mod sim;
pub mod synthetic;
