//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use bess_sim::degradation::Manufacturer;
use bess_sim::sim::types::{BatterySpec, HourlyRecord};
use bess_sim::synthetic::SyntheticProfile;
use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Reference battery (10 MWh, 90% efficiency, 80% DoD, 0.5C, Tesla).
pub fn reference_spec() -> BatterySpec {
    BatterySpec {
        capacity_mwh: 10.0,
        round_trip_efficiency: 0.9,
        depth_of_discharge: 0.8,
        c_rate: 0.5,
        manufacturer: Manufacturer::Tesla,
    }
}

/// Builds one day's records from `(hour, price, production)` rows.
pub fn day(date: NaiveDate, rows: &[(u8, f64, f64)]) -> Vec<HourlyRecord> {
    rows.iter()
        .map(|&(hour, price, solar_production)| HourlyRecord {
            date,
            hour,
            price,
            solar_production,
        })
        .collect()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// The three-hour reference day: charge at hour 1, discharge at hour 3.
pub fn three_hour_day() -> Vec<HourlyRecord> {
    day(
        date(2024, 1, 1),
        &[(1, 10.0, 5.0), (2, 50.0, 0.0), (3, 80.0, 0.0)],
    )
}

/// Seeded synthetic records (noise on), `days` days from 2024-03-01.
pub fn synthetic(days: u32, seed: u64) -> Vec<HourlyRecord> {
    SyntheticProfile {
        start: date(2024, 3, 1),
        days,
        seed,
        ..SyntheticProfile::default()
    }
    .generate()
}

/// Uniformly random records: 24 hours per day, some days with no sun.
pub fn random_records(days: u32, seed: u64) -> Vec<HourlyRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = date(2024, 1, 1);
    let mut out = Vec::new();
    for d in 0..days {
        let date = start + chrono::Days::new(u64::from(d));
        let sunny = rng.random_bool(0.8);
        for hour in 1..=24u8 {
            let price = rng.random_range(-20.0..200.0);
            let solar = if sunny && (7..=18).contains(&hour) {
                rng.random_range(0.0..8.0)
            } else {
                0.0
            };
            out.push(HourlyRecord {
                date,
                hour,
                price,
                solar_production: solar,
            });
        }
    }
    out
}
