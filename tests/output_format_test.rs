//! Tests for the JSON report structure.

use std::path::PathBuf;

use purecheck::detect::Runner;
use purecheck::graph::BlueprintAsset;
use purecheck::policy::Policy;
use purecheck::report::{json_report, JsonReport};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn report_for(fixture: &str) -> JsonReport {
    let asset = BlueprintAsset::load(testdata_path().join(fixture)).expect("fixture should load");
    let result = Runner::new(Policy::default()).run(&asset);
    json_report("testdata", "(built-in defaults)", &result)
}

#[test]
fn failing_asset_produces_failed_report() {
    let report = report_for("multi_sink.blueprint.json");

    assert!(!report.passed);
    assert_eq!(report.assets_scanned, 1);
    assert_eq!(report.graphs_analyzed, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.warnings, 0);
    assert_eq!(report.findings.len(), 1);

    let f = &report.findings[0];
    assert_eq!(f.kind, "multi_exec");
    assert_eq!(f.severity, "error");
    assert_eq!(f.graph, "EventGraph");
    assert_eq!(f.node, "roll_1");
    assert_eq!(f.title, "Get Random Seed");
    assert!(f.asset.ends_with("multi_sink.blueprint.json"));
}

#[test]
fn clean_asset_produces_passed_report() {
    let report = report_for("single_sink.blueprint.json");

    assert!(report.passed);
    assert_eq!(report.errors, 0);
    assert!(report.findings.is_empty());
}

#[test]
fn report_round_trips_through_json() {
    let report = report_for("engine_misuse.blueprint.json");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: JsonReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.passed, report.passed);
    assert_eq!(parsed.findings.len(), report.findings.len());
    assert_eq!(parsed.findings[0].kind, "empty_tick");
    assert_eq!(parsed.findings[1].kind, "blocking_load");
}
