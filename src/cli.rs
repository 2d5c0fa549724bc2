//! Command-line argument definitions using clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bess-sim")]
#[command(author, version, about = "Battery dispatch and degradation simulator for solar installations")]
#[command(
    long_about = "Simulates a greedy solar-charging battery over hourly prices and solar\n\
    production, then reports the revenue uplift, cycling and expected capacity fade.\n\
    \nRecords come from --records (CSV: year,month,day,hour,price,production) or from the\n\
    scenario's synthetic generator.\n\
    \nExamples:\n  \
    bess-sim                                   # baseline preset on synthetic data\n  \
    bess-sim --preset high_power --json\n  \
    bess-sim --scenario scenarios/deep_cycle.toml --ledger-out ledger.csv\n  \
    bess-sim --records prices.csv --start 2024-05-01 --end 2024-05-31"
)]
pub struct Cli {
    /// Load the scenario from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, high_power, deep_cycle)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Hourly records CSV; overrides `data.records`
    #[arg(long, value_name = "PATH", env = "BESS_SIM_RECORDS")]
    pub records: Option<PathBuf>,

    /// First simulated date; overrides `period.start`
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Last simulated date (inclusive); overrides `period.end`
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<NaiveDate>,

    /// Write the hourly ledger to a CSV file
    #[arg(long, value_name = "PATH")]
    pub ledger_out: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Do not print one line per simulated hour
    #[arg(long, default_value_t = false)]
    pub quiet_ledger: bool,
}

impl Cli {
    /// Preset to use when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("baseline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bess-sim").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_baseline() {
        let cli = parse(&[]).unwrap();
        assert!(cli.scenario.is_none());
        assert_eq!(cli.preset_name(), "baseline");
        assert!(!cli.json);
        assert!(!cli.quiet_ledger);
    }

    #[test]
    fn supports_scenario_file() {
        let cli = parse(&["--scenario", "scenarios/baseline.toml"]).unwrap();
        assert_eq!(cli.scenario, Some(PathBuf::from("scenarios/baseline.toml")));
    }

    #[test]
    fn scenario_and_preset_conflict() {
        assert!(parse(&["--scenario", "a.toml", "--preset", "baseline"]).is_err());
    }

    #[test]
    fn parses_dates_and_flags() {
        let cli = parse(&[
            "--preset",
            "deep_cycle",
            "--start",
            "2024-01-02",
            "--end",
            "2024-01-09",
            "--json",
            "--quiet-ledger",
            "--ledger-out",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.preset_name(), "deep_cycle");
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2024, 1, 9));
        assert!(cli.json && cli.quiet_ledger);
        assert_eq!(cli.ledger_out, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn rejects_bad_date() {
        assert!(parse(&["--start", "2024-02-30"]).is_err());
    }
}
