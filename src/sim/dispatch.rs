//! Greedy per-day dispatch planning.
//!
//! A day is planned in two passes over its hours. The passes are greedy and
//! never backtrack.
//! 1. Charge from solar in the cheapest producing hours until the battery is
//!    full ([`ChargePlan`]).
//! 2. Queue every later hour by descending price. An hour discharges only
//!    when it is the most expensive hour still ahead ([`DischargeQueue`]).

use super::types::{BatterySpec, HourlyRecord};

/// Solar charging decided for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargePlan {
    /// `(hour, MWh)` in the order the hours were picked (cheapest first).
    charges: Vec<(u8, f64)>,
    /// Latest hour that charges, or 0 if none does.
    pub last_charge_hour: u8,
}

impl ChargePlan {
    /// Picks charge hours for `day` starting from `state_of_charge_mwh`.
    ///
    /// Producing hours are visited by ascending price (ties keep chronological
    /// order). Each takes `min(max power, headroom, solar that hour)` until the
    /// headroom to full capacity is used up.
    pub fn for_day(day: &[HourlyRecord], spec: &BatterySpec, state_of_charge_mwh: f64) -> Self {
        let mut chargeable: Vec<&HourlyRecord> = day.iter().filter(|r| r.is_chargeable()).collect();
        chargeable.sort_by(|a, b| a.price.total_cmp(&b.price));

        let max_power = spec.max_power_mwh();
        let mut headroom = spec.capacity_mwh - state_of_charge_mwh;
        let mut charges = Vec::new();

        for record in chargeable {
            if headroom <= 0.0 {
                break;
            }
            let amount = max_power.min(headroom).min(record.solar_production);
            if amount > 0.0 {
                charges.push((record.hour, amount));
                headroom -= amount;
            }
        }

        let last_charge_hour = charges.iter().map(|&(h, _)| h).max().unwrap_or(0);
        Self {
            charges,
            last_charge_hour,
        }
    }

    /// Energy to charge at `hour` (MWh), 0.0 if the hour does not charge.
    pub fn amount_at(&self, hour: u8) -> f64 {
        self.charges
            .iter()
            .find(|&&(h, _)| h == hour)
            .map_or(0.0, |&(_, amount)| amount)
    }

    /// Charge hours in pick order.
    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.charges.iter().map(|&(h, _)| h)
    }

    /// Total planned charge (MWh).
    pub fn total_mwh(&self) -> f64 {
        self.charges.iter().map(|&(_, amount)| amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}

/// Discharge candidates for one day, most expensive first.
#[derive(Debug, Clone, PartialEq)]
pub struct DischargeQueue {
    /// `(hour, price)`; stable-sorted by descending price.
    candidates: Vec<(u8, f64)>,
}

impl DischargeQueue {
    /// Queues every hour of `day` strictly after `last_charge_hour`.
    pub fn after(day: &[HourlyRecord], last_charge_hour: u8) -> Self {
        let mut candidates: Vec<(u8, f64)> = day
            .iter()
            .filter(|r| r.hour > last_charge_hour)
            .map(|r| (r.hour, r.price))
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self { candidates }
    }

    /// Advances the queue to `hour` and reports whether `hour` heads it.
    ///
    /// Candidates earlier than `hour` are dropped for good. Call with hours in
    /// chronological order.
    pub fn is_peak(&mut self, hour: u8) -> bool {
        self.candidates.retain(|&(h, _)| h >= hour);
        self.candidates.first().is_some_and(|&(h, _)| h == hour)
    }

    /// Remaining candidate hours, most expensive first.
    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.candidates.iter().map(|&(h, _)| h)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Dispatch plan for a day with at least one producing hour.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub charge: ChargePlan,
    pub discharge: DischargeQueue,
}

impl DayPlan {
    /// Plans `day`, or returns `None` when no hour produces solar (the battery
    /// then sits idle for the whole day).
    pub fn for_day(day: &[HourlyRecord], spec: &BatterySpec, state_of_charge_mwh: f64) -> Option<Self> {
        if !day.iter().any(HourlyRecord::is_chargeable) {
            return None;
        }
        let charge = ChargePlan::for_day(day, spec, state_of_charge_mwh);
        let discharge = DischargeQueue::after(day, charge.last_charge_hour);
        Some(Self { charge, discharge })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degradation::Manufacturer;

    fn spec() -> BatterySpec {
        BatterySpec {
            capacity_mwh: 10.0,
            round_trip_efficiency: 0.9,
            depth_of_discharge: 0.8,
            c_rate: 0.5,
            manufacturer: Manufacturer::Tesla,
        }
    }

    fn day(rows: &[(u8, f64, f64)]) -> Vec<HourlyRecord> {
        rows.iter()
            .filter_map(|&(hour, price, solar)| HourlyRecord::from_parts(2024, 5, 1, hour, price, solar))
            .collect()
    }

    #[test]
    fn charges_cheapest_producing_hours_first() {
        let d = day(&[(10, 30.0, 4.0), (11, 20.0, 4.0), (12, 25.0, 4.0), (13, 60.0, 0.0)]);
        let plan = ChargePlan::for_day(&d, &spec(), 0.0);
        // max power 5, headroom 10: 4 + 4 + 2
        assert_eq!(plan.hours().collect::<Vec<_>>(), vec![11, 12, 10]);
        assert_eq!(plan.amount_at(11), 4.0);
        assert_eq!(plan.amount_at(12), 4.0);
        assert_eq!(plan.amount_at(10), 2.0);
        assert_eq!(plan.amount_at(13), 0.0);
        assert_eq!(plan.last_charge_hour, 12);
        assert_eq!(plan.total_mwh(), 10.0);
    }

    #[test]
    fn charge_limited_by_power() {
        let d = day(&[(12, 10.0, 8.0)]);
        let plan = ChargePlan::for_day(&d, &spec(), 0.0);
        assert_eq!(plan.amount_at(12), 5.0);
    }

    #[test]
    fn full_battery_does_not_charge() {
        let d = day(&[(12, 10.0, 8.0), (20, 90.0, 0.0)]);
        let plan = ChargePlan::for_day(&d, &spec(), 10.0);
        assert!(plan.is_empty());
        assert_eq!(plan.last_charge_hour, 0);
    }

    #[test]
    fn queue_commits_to_most_expensive_remaining_hour() {
        let d = day(&[(1, 10.0, 5.0), (2, 50.0, 0.0), (3, 80.0, 0.0), (4, 70.0, 0.0)]);
        let mut q = DischargeQueue::after(&d, 1);
        assert_eq!(q.hours().collect::<Vec<_>>(), vec![3, 4, 2]);
        assert!(!q.is_peak(1));
        assert!(!q.is_peak(2));
        assert!(q.is_peak(3));
        // hour 3 passed; hour 4 is now the top of what is left
        assert!(q.is_peak(4));
        assert_eq!(q.len(), 1);
        assert!(!q.is_peak(5));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_prices_favour_earlier_hour() {
        let d = day(&[(5, 40.0, 0.0), (6, 40.0, 0.0)]);
        let mut q = DischargeQueue::after(&d, 0);
        assert!(q.is_peak(5));
        assert!(q.is_peak(6));
    }

    #[test]
    fn no_plan_without_production() {
        let d = day(&[(1, 10.0, 0.0), (2, 90.0, 0.0)]);
        assert!(DayPlan::for_day(&d, &spec(), 3.0).is_none());
    }

    #[test]
    fn day_plan_queues_hours_after_last_charge() {
        let d = day(&[(9, 15.0, 2.0), (14, 5.0, 1.0), (12, 100.0, 0.0), (19, 70.0, 0.0)]);
        let plan = DayPlan::for_day(&d, &spec(), 0.0);
        let hours: Option<Vec<u8>> = plan.map(|p| p.discharge.hours().collect());
        assert_eq!(hours, Some(vec![19]));
    }
}
