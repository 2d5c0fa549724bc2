//! Core simulation types: hourly inputs, battery parameters, state, and ledger rows.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::degradation::Manufacturer;

/// One hour of market price and solar production.
///
/// `hour` follows the market convention of 1–24, where hour 1 covers
/// 00:00–01:00.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyRecord {
    /// Calendar day of this hour.
    pub date: NaiveDate,
    /// Hour of day (1–24).
    pub hour: u8,
    /// Energy price (currency/MWh).
    pub price: f64,
    /// Solar production during the hour (MWh, >= 0).
    pub solar_production: f64,
}

impl HourlyRecord {
    /// Creates a record for a date given as calendar parts.
    ///
    /// Returns `None` if the parts do not form a valid date.
    ///
    /// # Examples
    ///
    /// ```
    /// use bess_sim::sim::types::HourlyRecord;
    ///
    /// let r = HourlyRecord::from_parts(2024, 6, 1, 12, 55.0, 1.5);
    /// assert!(r.is_some());
    /// assert!(HourlyRecord::from_parts(2024, 2, 30, 1, 0.0, 0.0).is_none());
    /// ```
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u8,
        price: f64,
        solar_production: f64,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| Self {
            date,
            hour,
            price,
            solar_production,
        })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Whether the battery can charge from solar this hour.
    pub fn is_chargeable(&self) -> bool {
        self.solar_production > 0.0
    }
}

/// Battery parameters for one simulation run.
///
/// Callers validate these before simulating (see
/// [`crate::config::ScenarioConfig::validate`]); the simulator trusts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatterySpec {
    /// Usable nameplate capacity (MWh, > 0).
    pub capacity_mwh: f64,
    /// Round-trip efficiency (0, 1].
    pub round_trip_efficiency: f64,
    /// Depth of discharge as a fraction (0, 1].
    pub depth_of_discharge: f64,
    /// Charge/discharge power as a multiple of capacity per hour.
    pub c_rate: f64,
    /// Cell manufacturer, selects the degradation profile.
    pub manufacturer: Manufacturer,
}

impl BatterySpec {
    /// Maximum energy moved in or out during one hour (MWh).
    pub fn max_power_mwh(&self) -> f64 {
        self.capacity_mwh * self.c_rate
    }

    /// Lowest state of charge a discharge may reach (MWh).
    pub fn floor_mwh(&self) -> f64 {
        self.capacity_mwh * (1.0 - self.depth_of_discharge)
    }
}

/// Mutable state carried hour to hour and day to day within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationState {
    /// Stored energy (MWh).
    pub state_of_charge_mwh: f64,
    /// Accumulated wear fraction from charge/discharge intensity. Never decreases.
    pub cumulative_degradation: f64,
}

/// Ledger row for one input hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub hour: u8,
    /// Energy price (currency/MWh).
    pub price: f64,
    /// Solar production (MWh).
    pub solar_production: f64,
    /// Solar energy diverted into the battery (MWh).
    pub charge: f64,
    /// Energy delivered by the battery after losses (MWh).
    pub discharge: f64,
    /// State of charge after this hour (MWh).
    pub state_of_charge: f64,
    /// `solar_production - charge + discharge` (MWh).
    pub net_balance: f64,
    /// Revenue from selling all solar production directly.
    pub solar_only_revenue: f64,
    /// Revenue from selling the net balance.
    pub with_battery_revenue: f64,
}

impl LedgerEntry {
    /// Revenue uplift from the battery this hour.
    pub fn difference(&self) -> f64 {
        self.with_battery_revenue - self.solar_only_revenue
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} h{:>2} | price={:>8.2}  solar={:>8.4} | charge={:>7.4}  discharge={:>7.4} \
             SoC={:>7.4} | net={:>8.4}  solo={:>10.2}  bess={:>10.2}",
            self.date,
            self.hour,
            self.price,
            self.solar_production,
            self.charge,
            self.discharge,
            self.state_of_charge,
            self.net_balance,
            self.solar_only_revenue,
            self.with_battery_revenue,
        )
    }
}

/// Running totals accumulated across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationTotals {
    /// Σ (with-battery revenue − solar-only revenue).
    pub total_revenue: f64,
    pub total_solar_only_revenue: f64,
    pub total_with_battery_revenue: f64,
    /// Equivalent full cycles, C-rate adjusted.
    pub total_cycles: f64,
    /// Σ daily discharge/charge ratios over days that charged.
    pub efficiency_sum: f64,
    /// Number of days contributing to `efficiency_sum`.
    pub efficiency_days: usize,
    /// Number of calendar days in the input.
    pub total_days: usize,
    /// Solar energy taken into the battery (MWh).
    pub total_charged_mwh: f64,
    /// Energy delivered by the battery (MWh).
    pub total_discharged_mwh: f64,
}

impl SimulationTotals {
    /// Mean daily round-trip efficiency, or 0.0 if no day charged.
    pub fn average_efficiency(&self) -> f64 {
        if self.efficiency_days > 0 {
            self.efficiency_sum / self.efficiency_days as f64
        } else {
            0.0
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    /// One entry per input record, in input order.
    pub ledger: Vec<LedgerEntry>,
    pub totals: SimulationTotals,
    /// State after the last hour; pass to [`super::engine::Simulator::with_state`] to resume.
    pub final_state: SimulationState,
}
