//! End-to-end runs: records in, report and ledger out.

mod common;

use std::path::Path;

use bess_sim::config::ScenarioConfig;
use bess_sim::io::{export_ledger_csv, filter_date_range, normalize, read_records, write_ledger_csv};
use bess_sim::runner::run_scenario;
use bess_sim::sim::report::{AggregateResult, DEFAULT_UNIT_COST_PER_MWH, operation_years};
use bess_sim::sim::simulate;

#[test]
fn three_hour_day_report() {
    let spec = common::reference_spec();
    let out = simulate(&common::three_hour_day(), &spec);
    let report = AggregateResult::build(&out, &spec, 0.0, DEFAULT_UNIT_COST_PER_MWH);

    assert_eq!(report.total_days, 1);
    // 5 MWh charged at 0.5C on a 10 MWh pack: half a cycle, no C-rate penalty.
    assert!((report.total_cycles - 0.5).abs() < 1e-12);
    assert!((report.revenues.improvement - out.totals.total_revenue).abs() < 1e-12);
    assert!((report.roi - report.revenues.improvement / 1e7 * 100.0).abs() < 1e-12);
    assert!((report.revenue_per_cycle - report.revenues.improvement / 0.5).abs() < 1e-9);
    assert!((report.average_efficiency - 2.6997 / 5.0).abs() < 1e-3);
    assert_eq!(report.degradation.c_rate_impact.impact_percentage, 0.0);
    assert_eq!(report.wear.cycle_impact_factor, 1.0);
    assert!((report.wear.total_degradation_pct - 0.006).abs() < 1e-9);
}

#[test]
fn csv_records_drive_the_same_run() {
    let csv = "year,month,day,hour,price,production\n\
               2024,1,1,3,80,\n\
               2024,1,1,1,10,5\n\
               2024,1,1,2,50,0\n\
               2024,1,1,2,50,0\n\
               2024,1,2,1,10,1\n";
    let records = normalize(read_records(csv.as_bytes()).unwrap());
    let records = filter_date_range(records, None, Some(common::date(2024, 1, 1)));
    assert_eq!(records, common::three_hour_day());

    let spec = common::reference_spec();
    assert_eq!(simulate(&records, &spec), simulate(&common::three_hour_day(), &spec));
}

#[test]
fn ledger_export_has_one_row_per_hour() {
    let out = simulate(&common::synthetic(3, 4), &common::reference_spec());
    let path = std::env::temp_dir().join(format!("bess_sim_ledger_{}.csv", std::process::id()));
    export_ledger_csv(&out.ledger, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(written.lines().count(), 1 + 3 * 24);

    let mut buf = Vec::new();
    write_ledger_csv(&out.ledger, &mut buf).unwrap();
    assert_eq!(written.as_bytes(), buf.as_slice());
}

#[test]
fn json_report_shape() {
    let outcome = run_scenario(&ScenarioConfig::baseline()).unwrap();
    let json = serde_json::to_value(&outcome.report).unwrap();

    for key in ["revenues", "degradation", "wear", "parameters", "roi", "total_cycles"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    let lifespan = &json["degradation"]["lifespan"];
    assert!(lifespan["expected"].as_f64().unwrap() > 0.0);
    assert!(lifespan["annual"]["natural"].as_f64().unwrap() == 1.0);
    assert_eq!(json["parameters"]["capacity_mwh"].as_f64(), Some(3.92));
}

#[test]
fn scenario_files_load_and_validate() {
    for name in ScenarioConfig::PRESETS {
        let path = Path::new("scenarios").join(format!("{name}.toml"));
        let cfg = ScenarioConfig::from_toml_file(&path)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let errors = cfg.validate();
        assert!(errors.is_empty(), "{}: {errors:?}", path.display());
    }
}

#[test]
fn scenario_files_match_presets() {
    for name in ["baseline", "high_power"] {
        let file = ScenarioConfig::from_toml_file(&Path::new("scenarios").join(format!("{name}.toml")))
            .unwrap();
        let preset = ScenarioConfig::from_preset(name).unwrap();
        assert_eq!(file.battery, preset.battery, "{name}");
        assert_eq!(file.synthetic, preset.synthetic, "{name}");
    }
}

#[test]
fn higher_c_rate_wears_faster() {
    let mut slow = ScenarioConfig::baseline();
    slow.battery.c_rate = 0.25;
    let mut fast = ScenarioConfig::baseline();
    fast.battery.c_rate = 2.0;

    let slow = run_scenario(&slow).unwrap().report;
    let fast = run_scenario(&fast).unwrap().report;
    assert!(fast.degradation.operational.cycles_until_80 < slow.degradation.operational.cycles_until_80);
    assert!(fast.degradation.c_rate_impact.impact_percentage < 0.0);
    assert!(slow.degradation.c_rate_impact.impact_percentage > 0.0);
    assert!(fast.wear.cycle_impact_factor > slow.wear.cycle_impact_factor);
}

#[test]
fn years_from_period() {
    let y = operation_years(common::date(2024, 1, 1), common::date(2024, 12, 31));
    assert!((y - 365.0 / 365.0).abs() < 1e-12);
}
