//! Scenario execution: load records, simulate, aggregate.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::ScenarioConfig;
use crate::io::{ImportError, filter_date_range, normalize, read_records_csv};
use crate::sim::report::{AggregateResult, operation_years};
use crate::sim::simulate;
use crate::sim::types::{HourlyRecord, SimulationOutput};

/// Result of running one scenario end to end.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output: SimulationOutput,
    pub report: AggregateResult,
    /// First and last simulated dates, if any record survived filtering.
    pub span: Option<(NaiveDate, NaiveDate)>,
}

/// Loads the scenario's records, sorted, deduplicated and filtered to `period`.
///
/// Reads `data.records` when set; otherwise generates them from `synthetic`.
///
/// # Errors
///
/// Returns an [`ImportError`] if the records CSV cannot be read.
pub fn load_records(cfg: &ScenarioConfig) -> Result<Vec<HourlyRecord>, ImportError> {
    let raw = match &cfg.data.records {
        Some(path) => {
            let records = read_records_csv(path)?;
            info!(path = %path.display(), rows = records.len(), "records imported");
            records
        }
        None => {
            let records = cfg.synthetic.generate();
            info!(
                days = cfg.synthetic.days,
                seed = cfg.synthetic.seed,
                "synthetic records generated"
            );
            records
        }
    };

    let records = filter_date_range(normalize(raw), cfg.period.start, cfg.period.end);
    if records.is_empty() {
        warn!("no records in the selected period");
    }
    Ok(records)
}

/// Service years covered by a run.
///
/// Uses the configured period bounds where set and the record dates otherwise.
pub fn service_years(cfg: &ScenarioConfig, records: &[HourlyRecord]) -> f64 {
    let first = cfg.period.start.or(records.first().map(|r| r.date));
    let last = cfg.period.end.or(records.last().map(|r| r.date));
    match (first, last) {
        (Some(start), Some(end)) => operation_years(start, end).max(0.0),
        _ => 0.0,
    }
}

/// Runs `cfg` end to end.
///
/// The configuration must already have passed [`ScenarioConfig::validate`].
///
/// # Errors
///
/// Returns an [`ImportError`] if the records CSV cannot be read.
pub fn run_scenario(cfg: &ScenarioConfig) -> Result<RunOutcome, ImportError> {
    let records = load_records(cfg)?;
    let spec = cfg.battery.to_spec();
    let years = service_years(cfg, &records);

    let output = simulate(&records, &spec);
    let report = AggregateResult::build(&output, &spec, years, cfg.economics.unit_cost_per_mwh);

    info!(
        days = output.totals.total_days,
        cycles = output.totals.total_cycles,
        improvement = output.totals.total_revenue,
        wear_pct = report.wear.total_degradation_pct,
        "simulation complete"
    );

    let span = records.first().zip(records.last()).map(|(a, b)| (a.date, b.date));
    Ok(RunOutcome {
        output,
        report,
        span,
    })
}
