//! Full-pipeline tests: synthetic portfolio -> KPI pass -> flag engine

#![cfg(feature = "synth")]

use avance::synth::{PerfProfile, PortfolioBuilder, ProjectSpec};
use avance::{analyze, AnalysisReport};

fn report(seed: u64) -> AnalysisReport {
    let portfolio = PortfolioBuilder::new().periods(52).seed(seed).build();
    analyze(portfolio.metrics, &portfolio.schedule, &portfolio.changes).unwrap()
}

#[test]
fn test_pipeline_augments_every_row() {
    let report = report(42);
    assert_eq!(report.metrics.len(), 3 * 52);
    for row in &report.metrics {
        assert!(row.cpi.is_some());
        assert!(row.spi.is_some());
        assert!(row.eac.is_some());
        assert!(row.vac.is_some());
        assert!(row.tcpi.is_some());
        assert!(row.cpi.unwrap().is_finite());
        assert!(row.eac.unwrap().is_finite());
    }
}

#[test]
fn test_pipeline_is_reproducible() {
    assert_eq!(report(42), report(42));
}

#[test]
fn test_flags_reference_generated_projects() {
    let report = report(42);
    for flag in &report.flags {
        assert!(
            report
                .metrics
                .iter()
                .any(|m| m.project_id == flag.project_id && m.period_end == flag.period_end),
            "flag for unknown row: {flag:?}"
        );
    }
}

#[test]
fn test_report_serializes_roundtrip() {
    let report = report(7);
    let json = serde_json::to_string(&report).expect("serialization failed");
    let back: AnalysisReport = serde_json::from_str(&json).expect("deserialization failed");
    assert_eq!(report, back);
}

#[test]
fn test_single_project_portfolio() {
    let portfolio = PortfolioBuilder::new()
        .periods(10)
        .seed(3)
        .project(ProjectSpec::new(
            "SOLO",
            "Solo Project",
            100_000.0,
            PerfProfile::Stable,
        ))
        .build();
    let metric_count = portfolio.metrics.len();

    let report = analyze(portfolio.metrics, &portfolio.schedule, &portfolio.changes).unwrap();
    assert_eq!(metric_count, 10);
    assert!(report.metrics.iter().all(|m| m.project_id == "SOLO"));
}
