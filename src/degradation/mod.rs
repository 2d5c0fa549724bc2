//! Cycle-life tables and the capacity-fade model built on them.

/// Breakpoint-table interpolation.
pub mod interpolate;
pub mod model;
/// Manufacturer degradation profiles.
pub mod profiles;

pub use model::{
    AnnualDegradation, DegradationResult, annual_degradation, cycles_for_dod, cycles_until_80,
    degradation, expected_lifespan,
};
pub use profiles::{DegradationProfile, Manufacturer};
