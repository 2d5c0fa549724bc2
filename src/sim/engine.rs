//! Sequential day-by-day dispatch simulation.

use tracing::{debug, trace};

use super::dispatch::DayPlan;
use super::types::{
    BatterySpec, HourlyRecord, LedgerEntry, SimulationOutput, SimulationState, SimulationTotals,
};
use super::wear::{cycle_adjustment, wear_increment};

/// Runs the greedy dispatch over an ordered record sequence.
///
/// Owns one [`SimulationState`] for the whole run. Days are processed
/// strictly in order because each starts from the previous day's state of
/// charge. Independent simulators share nothing and may run in parallel.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    spec: &'a BatterySpec,
    state: SimulationState,
    totals: SimulationTotals,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator with an empty battery and no wear.
    pub fn new(spec: &'a BatterySpec) -> Self {
        Self::with_state(spec, SimulationState::default())
    }

    /// Creates a simulator resuming from an earlier run's final state.
    pub fn with_state(spec: &'a BatterySpec, state: SimulationState) -> Self {
        Self {
            spec,
            state,
            totals: SimulationTotals::default(),
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn totals(&self) -> &SimulationTotals {
        &self.totals
    }

    /// Simulates all `records` and returns the ledger with totals.
    ///
    /// Records must already be sorted by date then hour. Consecutive records
    /// sharing a date form one day.
    pub fn run(mut self, records: &[HourlyRecord]) -> SimulationOutput {
        let mut ledger = Vec::with_capacity(records.len());
        for day in records.chunk_by(|a, b| a.date == b.date) {
            self.run_day(day, &mut ledger);
        }
        SimulationOutput {
            ledger,
            totals: self.totals,
            final_state: self.state,
        }
    }

    /// Simulates one calendar day, appending one ledger entry per record.
    pub fn run_day(&mut self, day: &[HourlyRecord], ledger: &mut Vec<LedgerEntry>) {
        self.totals.total_days += 1;

        let mut plan = DayPlan::for_day(day, self.spec, self.state.state_of_charge_mwh);
        if let (Some(plan), Some(first)) = (&plan, day.first()) {
            debug!(
                date = %first.date,
                charge_hours = ?plan.charge.hours().collect::<Vec<_>>(),
                last_charge_hour = plan.charge.last_charge_hour,
                discharge_candidates = ?plan.discharge.hours().collect::<Vec<_>>(),
                "day planned"
            );
        }

        let mut daily_charge = 0.0;
        let mut daily_discharge = 0.0;

        for record in day {
            let mut charge = 0.0;
            let mut discharge = 0.0;

            if let Some(plan) = plan.as_mut() {
                let planned = plan.charge.amount_at(record.hour);
                if planned > 0.0 {
                    charge = self.charge(planned);
                    daily_charge += charge;
                }
                if plan.discharge.is_peak(record.hour) && self.state.state_of_charge_mwh > 0.0 {
                    discharge = self.discharge();
                    daily_discharge += discharge;
                }
            }

            ledger.push(self.record_hour(record, charge, discharge));
        }

        if daily_charge > 0.0 {
            self.totals.efficiency_sum += daily_discharge / daily_charge;
            self.totals.efficiency_days += 1;
            let daily_cycles = daily_charge / self.spec.capacity_mwh;
            self.totals.total_cycles += daily_cycles * cycle_adjustment(self.spec.c_rate);
        }
    }

    /// Stores `amount` of solar energy, discounted by accumulated wear.
    ///
    /// Returns the energy taken from solar (MWh).
    fn charge(&mut self, amount: f64) -> f64 {
        self.accumulate_wear(amount);
        let stored = amount * (1.0 - self.state.cumulative_degradation);
        self.state.state_of_charge_mwh =
            (self.state.state_of_charge_mwh + stored).min(self.spec.capacity_mwh);
        self.totals.total_charged_mwh += amount;
        trace!(amount, stored, soc = self.state.state_of_charge_mwh, "charge");
        amount
    }

    /// Discharges as much as power and depth-of-discharge allow.
    ///
    /// Returns the energy delivered after wear and efficiency losses (MWh).
    fn discharge(&mut self) -> f64 {
        let soc = self.state.state_of_charge_mwh;
        let floor = self.spec.floor_mwh();
        let amount = self.spec.max_power_mwh().min(soc - floor).min(soc);
        if amount <= 0.0 {
            return 0.0;
        }

        self.accumulate_wear(amount);
        let efficiency = self.spec.round_trip_efficiency;
        let delivered = amount * (1.0 - self.state.cumulative_degradation) * efficiency;
        self.state.state_of_charge_mwh = (soc - delivered / efficiency)
            .max(floor)
            .min(self.spec.capacity_mwh);
        self.totals.total_discharged_mwh += delivered;
        trace!(amount, delivered, soc = self.state.state_of_charge_mwh, "discharge");
        delivered
    }

    fn accumulate_wear(&mut self, energy_mwh: f64) {
        self.state.cumulative_degradation += wear_increment(energy_mwh, self.spec.capacity_mwh);
    }

    fn record_hour(&mut self, record: &HourlyRecord, charge: f64, discharge: f64) -> LedgerEntry {
        let net_balance = record.solar_production - charge + discharge;
        let solar_only_revenue = record.solar_production * record.price;
        let with_battery_revenue = net_balance * record.price;

        self.totals.total_solar_only_revenue += solar_only_revenue;
        self.totals.total_with_battery_revenue += with_battery_revenue;
        self.totals.total_revenue += with_battery_revenue - solar_only_revenue;

        LedgerEntry {
            date: record.date,
            hour: record.hour,
            price: record.price,
            solar_production: record.solar_production,
            charge,
            discharge,
            state_of_charge: self.state.state_of_charge_mwh,
            net_balance,
            solar_only_revenue,
            with_battery_revenue,
        }
    }
}

/// Simulates `records` with a fresh battery.
///
/// # Examples
///
/// ```
/// use bess_sim::degradation::Manufacturer;
/// use bess_sim::sim::simulate;
/// use bess_sim::sim::types::{BatterySpec, HourlyRecord};
///
/// let spec = BatterySpec {
///     capacity_mwh: 10.0,
///     round_trip_efficiency: 0.9,
///     depth_of_discharge: 0.8,
///     c_rate: 0.5,
///     manufacturer: Manufacturer::Tesla,
/// };
/// let records: Vec<HourlyRecord> = [(1, 10.0, 5.0), (2, 50.0, 0.0), (3, 80.0, 0.0)]
///     .into_iter()
///     .filter_map(|(h, p, s)| HourlyRecord::from_parts(2024, 1, 1, h, p, s))
///     .collect();
///
/// let out = simulate(&records, &spec);
/// assert_eq!(out.ledger.len(), 3);
/// assert!(out.totals.total_revenue > 0.0);
/// ```
pub fn simulate(records: &[HourlyRecord], spec: &BatterySpec) -> SimulationOutput {
    Simulator::new(spec).run(records)
}
