//! Post-run aggregation of revenue, cycling, and degradation figures.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::types::{BatterySpec, SimulationOutput};
use super::wear::WearSummary;
use crate::degradation::model::REFERENCE_C_RATE;
use crate::degradation::{
    AnnualDegradation, Manufacturer, annual_degradation, cycles_for_dod, degradation,
    expected_lifespan,
};

/// Default installed cost per MWh of capacity, used for ROI.
pub const DEFAULT_UNIT_COST_PER_MWH: f64 = 1_000_000.0;

/// Years between two dates, counted as elapsed days / 365.
///
/// Negative if `end` precedes `start`.
pub fn operation_years(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / 365.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Revenues {
    pub solar_only: f64,
    pub with_battery: f64,
    /// `with_battery - solar_only`.
    pub improvement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegradationSources {
    /// Loss from cycling (%).
    pub cycles: f64,
    /// Loss from calendar ageing (%).
    pub natural: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationalData {
    pub total_cycles: f64,
    pub daily_cycles: f64,
    pub cycles_until_80: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lifespan {
    /// Expected service life (years).
    pub expected: f64,
    pub annual: AnnualDegradation,
    pub warranty_years: u32,
    pub within_warranty: bool,
}

/// Cycle life at the configured C-rate compared with the reference rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CRateImpact {
    /// Cycles until 80% at the reference C-rate.
    pub original_cycles: f64,
    /// Cycles until 80% at the configured C-rate.
    pub adjusted_cycles: f64,
    /// `(adjusted - original) / original * 100`, or 0 with no base cycles.
    pub impact_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegradationReport {
    /// Remaining capacity fraction.
    pub remaining_capacity: f64,
    /// Total capacity loss (%).
    pub total: f64,
    pub by_source: DegradationSources,
    pub operational: OperationalData,
    pub lifespan: Lifespan,
    pub c_rate_impact: CRateImpact,
}

/// Battery parameters echoed back with the results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub capacity_mwh: f64,
    pub efficiency: f64,
    pub dod: f64,
    pub c_rate: f64,
    pub manufacturer: Manufacturer,
    pub unit_cost_per_mwh: f64,
}

/// Everything reported for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub revenues: Revenues,
    pub revenue_per_cycle: f64,
    pub total_cycles: f64,
    /// Mean daily discharge/charge ratio.
    pub average_efficiency: f64,
    pub total_days: usize,
    /// Revenue uplift over installed cost (%).
    pub roi: f64,
    pub degradation: DegradationReport,
    pub wear: WearSummary,
    pub parameters: Parameters,
}

impl AggregateResult {
    /// Combines a run's totals with the degradation model.
    ///
    /// # Arguments
    ///
    /// * `output` - Result of [`super::simulate`]
    /// * `spec` - Battery the run used
    /// * `years` - Service time covered by the run (see [`operation_years`])
    /// * `unit_cost_per_mwh` - Installed cost per MWh of capacity
    pub fn build(
        output: &SimulationOutput,
        spec: &BatterySpec,
        years: f64,
        unit_cost_per_mwh: f64,
    ) -> Self {
        let totals = &output.totals;
        let total_cycles = totals.total_cycles;

        let revenue_per_cycle = if total_cycles > 0.0 {
            totals.total_revenue / total_cycles
        } else {
            0.0
        };

        let investment = spec.capacity_mwh * unit_cost_per_mwh;
        let roi = if investment > 0.0 {
            totals.total_revenue / investment * 100.0
        } else {
            0.0
        };

        let daily_cycles = if totals.total_days > 0 {
            total_cycles / totals.total_days as f64
        } else {
            0.0
        };

        let m = spec.manufacturer;
        let dod = spec.depth_of_discharge;
        let fade = degradation(m, total_cycles, dod, spec.c_rate, years);
        let expected = expected_lifespan(m, daily_cycles, dod, spec.c_rate);
        let warranty_years = m.profile().warranty_years;

        let original_cycles = cycles_for_dod(m, dod, REFERENCE_C_RATE);
        let adjusted_cycles = fade.cycles_until_80;
        let impact_percentage = if original_cycles > 0.0 {
            (adjusted_cycles - original_cycles) / original_cycles * 100.0
        } else {
            0.0
        };

        Self {
            revenues: Revenues {
                solar_only: totals.total_solar_only_revenue,
                with_battery: totals.total_with_battery_revenue,
                improvement: totals.total_revenue,
            },
            revenue_per_cycle,
            total_cycles,
            average_efficiency: totals.average_efficiency(),
            total_days: totals.total_days,
            roi,
            degradation: DegradationReport {
                remaining_capacity: fade.remaining_capacity,
                total: fade.total_degradation,
                by_source: DegradationSources {
                    cycles: fade.cycles_degradation_percentage,
                    natural: fade.natural_degradation_percentage,
                },
                operational: OperationalData {
                    total_cycles,
                    daily_cycles,
                    cycles_until_80: fade.cycles_until_80,
                    years,
                },
                lifespan: Lifespan {
                    expected,
                    annual: annual_degradation(m, dod, spec.c_rate, daily_cycles),
                    warranty_years,
                    within_warranty: expected >= f64::from(warranty_years),
                },
                c_rate_impact: CRateImpact {
                    original_cycles,
                    adjusted_cycles,
                    impact_percentage,
                },
            },
            wear: WearSummary::new(spec, output.final_state.cumulative_degradation, total_cycles),
            parameters: Parameters {
                capacity_mwh: spec.capacity_mwh,
                efficiency: spec.round_trip_efficiency,
                dod,
                c_rate: spec.c_rate,
                manufacturer: m,
                unit_cost_per_mwh,
            },
        }
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        let d = &self.degradation;
        writeln!(f, "--- Battery Report ---")?;
        writeln!(
            f,
            "Battery:               {:.2} MWh {} (eff {:.0}%, DoD {:.0}%, C-rate {:.2})",
            p.capacity_mwh,
            p.manufacturer,
            p.efficiency * 100.0,
            p.dod * 100.0,
            p.c_rate
        )?;
        writeln!(f, "Days simulated:        {}", self.total_days)?;
        writeln!(f, "Solar-only revenue:    {:.2}", self.revenues.solar_only)?;
        writeln!(f, "With-battery revenue:  {:.2}", self.revenues.with_battery)?;
        writeln!(f, "Improvement:           {:.2}", self.revenues.improvement)?;
        writeln!(f, "Revenue per cycle:     {:.2}", self.revenue_per_cycle)?;
        writeln!(f, "ROI:                   {:.4}%", self.roi)?;
        writeln!(
            f,
            "Cycles:                {:.2} total, {:.3}/day",
            self.total_cycles, d.operational.daily_cycles
        )?;
        writeln!(f, "Average efficiency:    {:.1}%", self.average_efficiency * 100.0)?;
        writeln!(
            f,
            "Remaining capacity:    {:.2}% (cycles {:.2}%, natural {:.2}%)",
            d.remaining_capacity * 100.0,
            d.by_source.cycles,
            d.by_source.natural
        )?;
        writeln!(f, "Cycles until 80%:      {:.0}", d.operational.cycles_until_80)?;
        writeln!(
            f,
            "Expected lifespan:     {:.1} years (warranty {} years{})",
            d.lifespan.expected,
            d.lifespan.warranty_years,
            if d.lifespan.within_warranty { "" } else { ", SHORT" }
        )?;
        writeln!(
            f,
            "Annual fade:           {:.2}% ({:.2}% cycles, {:.2}% natural)",
            d.lifespan.annual.total, d.lifespan.annual.by_cycles, d.lifespan.annual.natural
        )?;
        writeln!(
            f,
            "C-rate impact:         {:+.1}% cycle life vs {REFERENCE_C_RATE}C",
            d.c_rate_impact.impact_percentage
        )?;
        write!(
            f,
            "Operational wear:      {:.4}% (effective {:.4} MWh)",
            self.wear.total_degradation_pct, self.wear.effective_capacity_mwh
        )
    }
}
