//! Seeded synthetic price and solar records for demos and tests.
//!
//! Solar follows a half-cosine daylight curve with multiplicative Gaussian
//! noise. Prices follow a two-peak (morning and evening) daily shape that sags
//! around midday when solar is plentiful, plus Gaussian noise.

use std::f64::consts::PI;

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use crate::sim::types::HourlyRecord;

const HOURS_PER_DAY: u8 = 24;
const MORNING_PEAK_SLOT: f64 = 8.0;
const EVENING_PEAK_SLOT: f64 = 19.0;
const PEAK_WIDTH: f64 = 2.5;
const MORNING_PEAK_WEIGHT: f64 = 0.6;
const SOLAR_PRICE_SAG: f64 = 0.4;

/// Parameters of the synthetic generator.
///
/// Deserialises from the `[synthetic]` scenario section. Dates are quoted
/// strings (`start = "2024-01-01"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticProfile {
    /// First simulated day.
    pub start: NaiveDate,
    /// Number of days to generate (must be > 0).
    pub days: u32,
    /// Clear-sky production at solar noon (MWh per hour).
    pub peak_mwh: f64,
    /// First daylight slot, 0-based (hour 1 is slot 0).
    pub sunrise_hour: u8,
    /// First dark slot after daylight (exclusive, <= 24).
    pub sunset_hour: u8,
    /// Relative standard deviation of solar and price noise.
    pub noise_std: f64,
    /// Overnight price level (currency/MWh).
    pub base_price: f64,
    /// Height of the evening price peak above `base_price`.
    pub price_amplitude: f64,
    /// Random seed; identical seeds give identical records.
    pub seed: u64,
}

impl Default for SyntheticProfile {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 30,
            peak_mwh: 2.5,
            sunrise_hour: 6,
            sunset_hour: 19,
            noise_std: 0.1,
            base_price: 40.0,
            price_amplitude: 60.0,
            seed: 42,
        }
    }
}

/// Generates Gaussian noise using the Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and the given
/// standard deviation, or 0.0 if `std_dev <= 0`.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z0 * std_dev
}

impl SyntheticProfile {
    /// Fraction of peak production in `slot` (0-based hour of day).
    ///
    /// Zero outside `[sunrise_hour, sunset_hour)`; a half-cosine between,
    /// evaluated at the middle of the slot.
    pub fn daylight_frac(&self, slot: u8) -> f64 {
        if slot < self.sunrise_hour || slot >= self.sunset_hour {
            return 0.0;
        }
        let span = f64::from(self.sunset_hour - self.sunrise_hour);
        let x = (f64::from(slot - self.sunrise_hour) + 0.5) / span;
        (PI * (x - 0.5)).cos()
    }

    /// Noise-free price shape for `slot`, before the solar sag.
    fn price_shape(&self, slot: u8) -> f64 {
        let bump = |center: f64| {
            let d = (f64::from(slot) - center) / PEAK_WIDTH;
            (-0.5 * d * d).exp()
        };
        self.base_price
            + self.price_amplitude
                * (MORNING_PEAK_WEIGHT * bump(MORNING_PEAK_SLOT) + bump(EVENING_PEAK_SLOT))
    }

    /// Generates `days × 24` records starting at `start`, hours 1-24 in order.
    ///
    /// Days past the last representable date are skipped.
    pub fn generate(&self) -> Vec<HourlyRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let peak = self.peak_mwh.max(0.0);
        let mut records = Vec::with_capacity(self.days as usize * usize::from(HOURS_PER_DAY));

        for offset in 0..self.days {
            let Some(date) = self.start.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            for slot in 0..HOURS_PER_DAY {
                let frac = self.daylight_frac(slot);
                let solar = if frac > 0.0 {
                    (peak * frac * (1.0 + gaussian_noise(&mut rng, self.noise_std))).max(0.0)
                } else {
                    0.0
                };

                let sag = self.price_amplitude * SOLAR_PRICE_SAG * frac;
                let price = (self.price_shape(slot) - sag)
                    * (1.0 + gaussian_noise(&mut rng, self.noise_std));

                records.push(HourlyRecord {
                    date,
                    hour: slot + 1,
                    price,
                    solar_production: solar,
                });
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> SyntheticProfile {
        SyntheticProfile {
            days: 2,
            noise_std: 0.0,
            ..SyntheticProfile::default()
        }
    }

    #[test]
    fn twenty_four_hours_per_day() {
        let records = quiet().generate();
        assert_eq!(records.len(), 48);
        assert_eq!(records[0].hour, 1);
        assert_eq!(records[23].hour, 24);
        assert_eq!(records[24].date, records[0].date.succ_opt().unwrap());
    }

    #[test]
    fn no_sun_at_night() {
        let p = quiet();
        assert_eq!(p.daylight_frac(0), 0.0);
        assert_eq!(p.daylight_frac(5), 0.0);
        assert_eq!(p.daylight_frac(19), 0.0);
        assert_eq!(p.daylight_frac(23), 0.0);
        assert!(p.daylight_frac(12) > 0.95);
        assert!((p.daylight_frac(6) - p.daylight_frac(18)).abs() < 1e-12);
    }

    #[test]
    fn evening_is_pricier_than_noon() {
        let records = quiet().generate();
        let noon = records[12].price;
        let evening = records[19].price;
        assert!(evening > noon, "evening {evening} noon {noon}");
    }

    #[test]
    fn production_never_negative() {
        let p = SyntheticProfile {
            noise_std: 2.0,
            days: 5,
            ..SyntheticProfile::default()
        };
        assert!(p.generate().iter().all(|r| r.solar_production >= 0.0));
    }

    #[test]
    fn deterministic_with_same_seed() {
        let p = SyntheticProfile::default();
        assert_eq!(p.generate(), p.generate());

        let other = SyntheticProfile {
            seed: 43,
            ..SyntheticProfile::default()
        };
        assert_ne!(p.generate(), other.generate());
    }

    #[test]
    fn zero_noise_std_is_silent() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
    }
}
