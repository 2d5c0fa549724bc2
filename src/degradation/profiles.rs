//! Manufacturer cycle-life tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A `(key, value)` breakpoint in a lookup table. Tables are sorted by key.
pub type Breakpoint = (f64, f64);

/// Cycle-life data published for one battery manufacturer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradationProfile {
    /// Depth of discharge in percent → full cycles until 80% capacity.
    pub base_cycles: &'static [Breakpoint],
    /// C-rate → multiplier applied to `base_cycles`.
    pub c_rate_factors: &'static [Breakpoint],
    /// Warranty period in years.
    pub warranty_years: u32,
}

const TESLA: DegradationProfile = DegradationProfile {
    base_cycles: &[
        (20.0, 10_000.0),
        (40.0, 7_500.0),
        (60.0, 5_500.0),
        (80.0, 4_000.0),
        (100.0, 3_000.0),
    ],
    c_rate_factors: &[(0.25, 1.2), (0.5, 1.0), (1.0, 0.8), (2.0, 0.6)],
    warranty_years: 10,
};

const CATL: DegradationProfile = DegradationProfile {
    base_cycles: &[
        (20.0, 15_000.0),
        (40.0, 12_000.0),
        (60.0, 8_000.0),
        (80.0, 6_000.0),
        (100.0, 4_500.0),
    ],
    c_rate_factors: &[(0.25, 1.25), (0.5, 1.0), (1.0, 0.85), (2.0, 0.7)],
    warranty_years: 12,
};

const BYD: DegradationProfile = DegradationProfile {
    base_cycles: &[
        (20.0, 13_000.0),
        (40.0, 10_000.0),
        (60.0, 7_000.0),
        (80.0, 5_000.0),
        (100.0, 3_500.0),
    ],
    c_rate_factors: &[(0.25, 1.15), (0.5, 1.0), (1.0, 0.9), (2.0, 0.75)],
    warranty_years: 10,
};

/// Battery manufacturers with a shipped degradation profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Manufacturer {
    Tesla,
    Catl,
    Byd,
}

impl Manufacturer {
    /// All manufacturers, in declaration order.
    pub const ALL: [Self; 3] = [Self::Tesla, Self::Catl, Self::Byd];

    /// Returns the static degradation profile for this manufacturer.
    pub const fn profile(self) -> &'static DegradationProfile {
        match self {
            Self::Tesla => &TESLA,
            Self::Catl => &CATL,
            Self::Byd => &BYD,
        }
    }

    /// Lowercase identifier used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tesla => "tesla",
            Self::Catl => "catl",
            Self::Byd => "byd",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Manufacturer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tesla" => Ok(Self::Tesla),
            "catl" => Ok(Self::Catl),
            "byd" => Ok(Self::Byd),
            other => Err(format!(
                "unknown manufacturer \"{other}\", expected one of: tesla, catl, byd"
            )),
        }
    }
}
