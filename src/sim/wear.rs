//! Wear accumulation and cycle accounting.
//!
//! Two separately tuned models of C-rate stress live here:
//! - [`wear_increment`] runs per charge/discharge operation. It feeds the
//!   cumulative wear fraction that discounts every later delivery.
//! - [`cycle_adjustment`] runs once per day at the configured C-rate. It scales
//!   the equivalent-cycle count that the lifespan model consumes.
//!
//! Both sit on top of the manufacturer tables in [`crate::degradation`] and
//! use different stress weights.

use serde::Serialize;

use super::types::BatterySpec;

/// Wear per operation at or below the reference C-rate.
pub const BASE_WEAR_PER_OPERATION: f64 = 0.00003;

/// C-rate above which additional stress is modelled.
pub const STRESS_THRESHOLD_C_RATE: f64 = 0.5;

const STRESS_EXPONENT: f64 = 1.2;
const WEAR_STRESS_WEIGHT: f64 = 0.5;
const CYCLE_STRESS_WEIGHT: f64 = 0.3;
const LIFE_IMPACT_EXPONENT: f64 = 1.5;

fn stress_multiplier(c_rate: f64, weight: f64) -> f64 {
    if c_rate <= STRESS_THRESHOLD_C_RATE {
        1.0
    } else {
        1.0 + ((c_rate / STRESS_THRESHOLD_C_RATE).powf(STRESS_EXPONENT) - 1.0) * weight
    }
}

/// Wear multiplier for an operation run at `actual_c_rate`.
pub fn wear_factor(actual_c_rate: f64) -> f64 {
    stress_multiplier(actual_c_rate, WEAR_STRESS_WEIGHT)
}

/// Wear added to the cumulative fraction by one operation moving `energy_mwh`.
pub fn wear_increment(energy_mwh: f64, capacity_mwh: f64) -> f64 {
    let actual_c_rate = if capacity_mwh > 0.0 {
        energy_mwh / capacity_mwh
    } else {
        0.0
    };
    BASE_WEAR_PER_OPERATION * wear_factor(actual_c_rate)
}

/// Multiplier applied to a day's equivalent cycles at the configured C-rate.
pub fn cycle_adjustment(c_rate: f64) -> f64 {
    stress_multiplier(c_rate, CYCLE_STRESS_WEIGHT)
}

/// Summary of the per-operation wear accumulator at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WearSummary {
    /// Cumulative wear as a percentage.
    pub total_degradation_pct: f64,
    /// Capacity left after wear (MWh).
    pub effective_capacity_mwh: f64,
    /// C-rate adjusted equivalent cycles.
    pub adjusted_cycles: f64,
    /// Life multiplier from running above the reference C-rate.
    pub cycle_impact_factor: f64,
    /// Lifespan reduction implied by `cycle_impact_factor` (%).
    pub estimated_life_reduction_pct: f64,
}

impl WearSummary {
    pub fn new(spec: &BatterySpec, cumulative_degradation: f64, total_cycles: f64) -> Self {
        let cycle_impact_factor = if spec.c_rate > STRESS_THRESHOLD_C_RATE {
            (spec.c_rate / STRESS_THRESHOLD_C_RATE).powf(LIFE_IMPACT_EXPONENT)
        } else {
            1.0
        };
        Self {
            total_degradation_pct: cumulative_degradation * 100.0,
            effective_capacity_mwh: spec.capacity_mwh * (1.0 - cumulative_degradation),
            adjusted_cycles: total_cycles,
            cycle_impact_factor,
            estimated_life_reduction_pct: (cycle_impact_factor - 1.0) * 100.0,
        }
    }
}
