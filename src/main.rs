//! Battery simulator entry point: CLI wiring and config-driven runs.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use bess_sim::cli::Cli;
use bess_sim::config::ScenarioConfig;
use bess_sim::io::export_ledger_csv;
use bess_sim::logging;
use bess_sim::runner::run_scenario;

fn load_config(cli: &Cli) -> ScenarioConfig {
    let loaded = match &cli.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path),
        None => ScenarioConfig::from_preset(cli.preset_name()),
    };
    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(records) = &cli.records {
        cfg.data.records = Some(records.clone());
    }
    if cli.start.is_some() {
        cfg.period.start = cli.start;
    }
    if cli.end.is_some() {
        cfg.period.end = cli.end;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let cfg = load_config(&cli);
    match &cli.scenario {
        Some(path) => info!(scenario = %path.display(), "scenario loaded"),
        None => info!(preset = cli.preset_name(), "preset loaded"),
    }

    let outcome = run_scenario(&cfg).context("loading records")?;

    if !cli.quiet_ledger && !cli.json {
        for entry in &outcome.output.ledger {
            println!("{entry}");
        }
        println!();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        if let Some((first, last)) = outcome.span {
            println!("Period:                {first} to {last}");
        }
        println!("{}", outcome.report);
    }

    if let Some(path) = &cli.ledger_out {
        export_ledger_csv(&outcome.output.ledger, path)
            .with_context(|| format!("writing ledger to {}", path.display()))?;
        info!(path = %path.display(), rows = outcome.output.ledger.len(), "ledger exported");
    }

    Ok(())
}
