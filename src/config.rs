//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::degradation::Manufacturer;
use crate::sim::report::DEFAULT_UNIT_COST_PER_MWH;
use crate::sim::types::BatterySpec;
use crate::synthetic::SyntheticProfile;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Battery parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Optional date window applied to the records.
    #[serde(default)]
    pub period: PeriodConfig,
    /// Cost basis for ROI.
    #[serde(default)]
    pub economics: EconomicsConfig,
    /// Where records come from.
    #[serde(default)]
    pub data: DataConfig,
    /// Synthetic record generator, used when `data.records` is unset.
    #[serde(default)]
    pub synthetic: SyntheticProfile,
}

/// Battery parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (MWh, > 0).
    pub capacity_mwh: f64,
    /// Round-trip efficiency (0, 1].
    pub efficiency: f64,
    /// Depth of discharge as a fraction (0, 1].
    pub dod: f64,
    /// Charge/discharge power as a multiple of capacity per hour (> 0).
    pub c_rate: f64,
    /// `"tesla"`, `"catl"` or `"byd"`.
    pub manufacturer: Manufacturer,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_mwh: 3.92,
            efficiency: 0.9,
            dod: 0.8,
            c_rate: 0.5,
            manufacturer: Manufacturer::Tesla,
        }
    }
}

impl BatteryConfig {
    pub fn to_spec(&self) -> BatterySpec {
        BatterySpec {
            capacity_mwh: self.capacity_mwh,
            round_trip_efficiency: self.efficiency,
            depth_of_discharge: self.dod,
            c_rate: self.c_rate,
            manufacturer: self.manufacturer,
        }
    }
}

/// Inclusive date window. Either bound may be left open.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeriodConfig {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicsConfig {
    /// Installed cost per MWh of capacity (> 0).
    pub unit_cost_per_mwh: f64,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            unit_cost_per_mwh: DEFAULT_UNIT_COST_PER_MWH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// CSV of hourly records; relative paths resolve against the working directory.
    pub records: Option<PathBuf>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_mwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a 3.92 MWh Tesla pack at 0.5C.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the high-power preset: a 1C CATL pack that trades cycle life
    /// for throughput.
    pub fn high_power() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_mwh: 5.0,
                c_rate: 1.0,
                efficiency: 0.88,
                manufacturer: Manufacturer::Catl,
                ..BatteryConfig::default()
            },
            synthetic: SyntheticProfile {
                peak_mwh: 4.0,
                seed: 7,
                ..SyntheticProfile::default()
            },
            ..Self::default()
        }
    }

    /// Returns the deep-cycle preset: a BYD pack discharged to 95% depth.
    pub fn deep_cycle() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_mwh: 8.0,
                dod: 0.95,
                c_rate: 0.25,
                efficiency: 0.92,
                manufacturer: Manufacturer::Byd,
            },
            synthetic: SyntheticProfile {
                peak_mwh: 3.0,
                days: 60,
                price_amplitude: 90.0,
                seed: 11,
                ..SyntheticProfile::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_power", "deep_cycle"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_power" => Ok(Self::high_power()),
            "deep_cycle" => Ok(Self::deep_cycle()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let bat = &self.battery;
        if !(bat.capacity_mwh > 0.0 && bat.capacity_mwh.is_finite()) {
            errors.push(ConfigError::new("battery.capacity_mwh", "must be > 0"));
        }
        if !(bat.efficiency > 0.0 && bat.efficiency <= 1.0) {
            errors.push(ConfigError::new("battery.efficiency", "must be in (0.0, 1.0]"));
        }
        if !(bat.dod > 0.0 && bat.dod <= 1.0) {
            errors.push(ConfigError::new("battery.dod", "must be in (0.0, 1.0]"));
        }
        if !(bat.c_rate > 0.0 && bat.c_rate.is_finite()) {
            errors.push(ConfigError::new("battery.c_rate", "must be > 0"));
        }

        if let (Some(start), Some(end)) = (self.period.start, self.period.end) {
            if start > end {
                errors.push(ConfigError::new("period.start", "must be <= period.end"));
            }
        }

        if !(self.economics.unit_cost_per_mwh > 0.0) {
            errors.push(ConfigError::new("economics.unit_cost_per_mwh", "must be > 0"));
        }

        let syn = &self.synthetic;
        if syn.days == 0 {
            errors.push(ConfigError::new("synthetic.days", "must be > 0"));
        }
        if syn.sunrise_hour >= syn.sunset_hour {
            errors.push(ConfigError::new("synthetic.sunrise_hour", "must be < synthetic.sunset_hour"));
        }
        if syn.sunset_hour > 24 {
            errors.push(ConfigError::new("synthetic.sunset_hour", "must be <= 24"));
        }
        if syn.peak_mwh < 0.0 {
            errors.push(ConfigError::new("synthetic.peak_mwh", "must be >= 0"));
        }
        if syn.noise_std < 0.0 {
            errors.push(ConfigError::new("synthetic.noise_std", "must be >= 0"));
        }

        errors
    }
}
