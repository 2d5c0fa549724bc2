//! Capacity fade and lifespan estimates driven by the manufacturer tables.

use serde::Serialize;

use super::interpolate::interpolate;
use super::profiles::{DegradationProfile, Manufacturer};

/// Capacity fraction at which a battery is considered end-of-life.
pub const END_OF_LIFE_CAPACITY: f64 = 0.8;

/// Calendar fade per year, as a fraction of capacity.
pub const NATURAL_FADE_PER_YEAR: f64 = 0.01;

/// Lifespan cap from calendar fade alone (years to reach 80% at 1%/year).
pub const CALENDAR_LIFE_YEARS: f64 = 20.0;

/// C-rate against which the manufacturer tables are normalised.
pub const REFERENCE_C_RATE: f64 = 0.5;

const DAYS_PER_YEAR: f64 = 365.0;

/// Capacity fade breakdown for a given usage history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegradationResult {
    /// Remaining capacity as a fraction, floored at 0.8.
    pub remaining_capacity: f64,
    /// Full cycles until 80% capacity for this DoD and C-rate.
    pub cycles_until_80: f64,
    /// Overall capacity loss (%).
    pub degradation_percentage: f64,
    /// Loss attributable to cycling (%).
    pub cycles_degradation_percentage: f64,
    /// Loss attributable to calendar ageing (%).
    pub natural_degradation_percentage: f64,
    /// Same as `degradation_percentage`; kept for report consumers.
    pub total_degradation: f64,
}

/// Yearly capacity fade in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualDegradation {
    pub total: f64,
    pub by_cycles: f64,
    pub natural: f64,
}

/// Full cycles until 80% capacity.
///
/// Interpolates the DoD table at `dod_percent` and the C-rate table at
/// `c_rate`, then multiplies the two.
pub fn cycles_until_80(profile: &DegradationProfile, dod_percent: f64, c_rate: f64) -> f64 {
    interpolate(profile.base_cycles, dod_percent) * interpolate(profile.c_rate_factors, c_rate)
}

/// Same as [`cycles_until_80`] keyed by manufacturer, with `dod` as a fraction.
pub fn cycles_for_dod(manufacturer: Manufacturer, dod: f64, c_rate: f64) -> f64 {
    cycles_until_80(manufacturer.profile(), dod * 100.0, c_rate)
}

/// Remaining capacity after `total_cycles` full cycles over `years` of service.
///
/// Cycle fade is linear down to the 80% floor. Calendar fade is then applied
/// as an additional proportional loss, and the result is floored at 80%.
///
/// # Arguments
///
/// * `manufacturer` - Profile to look up
/// * `total_cycles` - Equivalent full cycles consumed
/// * `dod` - Depth of discharge as a fraction (0, 1]
/// * `c_rate` - Configured C-rate
/// * `years` - Elapsed service time
pub fn degradation(
    manufacturer: Manufacturer,
    total_cycles: f64,
    dod: f64,
    c_rate: f64,
    years: f64,
) -> DegradationResult {
    let cycles_until_80 = cycles_for_dod(manufacturer, dod, c_rate);

    let fade_by_cycles = if cycles_until_80 > 0.0 {
        (1.0 - END_OF_LIFE_CAPACITY) * total_cycles / cycles_until_80
    } else {
        0.0
    };
    let cycles_degradation = (1.0 - fade_by_cycles).max(END_OF_LIFE_CAPACITY);
    let natural_degradation = (1.0 - NATURAL_FADE_PER_YEAR * years).max(0.0);

    let remaining_capacity = (cycles_degradation
        - (1.0 - natural_degradation) * cycles_degradation)
        .max(END_OF_LIFE_CAPACITY);

    let degradation_percentage = (1.0 - remaining_capacity) * 100.0;
    DegradationResult {
        remaining_capacity,
        cycles_until_80,
        degradation_percentage,
        cycles_degradation_percentage: (1.0 - cycles_degradation) * 100.0,
        natural_degradation_percentage: (1.0 - natural_degradation) * 100.0,
        total_degradation: degradation_percentage,
    }
}

/// Expected service life in years at a steady `daily_cycles` usage.
///
/// The smaller of the cycle-limited life and [`CALENDAR_LIFE_YEARS`]. With no
/// cycling the calendar cap applies.
pub fn expected_lifespan(manufacturer: Manufacturer, daily_cycles: f64, dod: f64, c_rate: f64) -> f64 {
    let cycles_per_year = daily_cycles * DAYS_PER_YEAR;
    if cycles_per_year <= 0.0 {
        return CALENDAR_LIFE_YEARS;
    }
    let years_from_cycles = cycles_for_dod(manufacturer, dod, c_rate) / cycles_per_year;
    years_from_cycles.min(CALENDAR_LIFE_YEARS)
}

/// Yearly fade split into cycling and calendar contributions.
pub fn annual_degradation(
    manufacturer: Manufacturer,
    dod: f64,
    c_rate: f64,
    daily_cycles: f64,
) -> AnnualDegradation {
    let cycles_until_80 = cycles_for_dod(manufacturer, dod, c_rate);
    let by_cycles = if cycles_until_80 > 0.0 {
        (1.0 - END_OF_LIFE_CAPACITY) * (daily_cycles * DAYS_PER_YEAR) / cycles_until_80 * 100.0
    } else {
        0.0
    };
    let natural = NATURAL_FADE_PER_YEAR * 100.0;
    AnnualDegradation {
        total: by_cycles + natural,
        by_cycles,
        natural,
    }
}
