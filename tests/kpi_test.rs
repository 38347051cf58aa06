//! KPI Calculator contract tests
//!
//! The formulas and their zero-denominator defaults are compatibility
//! contracts: downstream dashboards compare these numbers against
//! historical values, so every branch is pinned here exactly.

use avance::kpi::{self, Kpi};
use avance::{Error, PeriodMetric};
use chrono::NaiveDate;

const TOL: f64 = 1e-9;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn row(pv: f64, ev: f64, ac: f64, bac: f64) -> PeriodMetric {
    PeriodMetric::new("P001", day(7), pv, ev, ac, bac)
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_scenario_on_plan() {
    // ev=100, ac=100, pv=100, bac=1000
    let k = Kpi::from_inputs(100.0, 100.0, 100.0, 1000.0);
    assert!((k.cpi - 1.0).abs() < TOL);
    assert!((k.spi - 1.0).abs() < TOL);
    assert!((k.eac - 1000.0).abs() < TOL);
    assert!((k.vac - 0.0).abs() < TOL);
}

#[test]
fn test_scenario_cost_overrun() {
    // ev=50, ac=100, pv=50, bac=1000
    let k = Kpi::from_inputs(50.0, 50.0, 100.0, 1000.0);
    assert!((k.cpi - 0.5).abs() < TOL);
    assert!((k.spi - 1.0).abs() < TOL);
    assert!((k.eac - 2000.0).abs() < TOL);
    assert!((k.vac - (-1000.0)).abs() < TOL);
}

#[test]
fn test_scenario_not_started() {
    // ev=0, ac=0, pv=0, bac=1000: degenerate cpi/spi branches, but tcpi
    // goes through the real formula since bac - ac = 1000
    let k = Kpi::from_inputs(0.0, 0.0, 0.0, 1000.0);
    assert!((k.cpi - 1.0).abs() < TOL);
    assert!((k.spi - 1.0).abs() < TOL);
    assert!((k.eac - 1000.0).abs() < TOL);
    assert!((k.tcpi - 1.0).abs() < TOL);
}

// =============================================================================
// Zero-denominator branch matrix
// =============================================================================

#[test]
fn test_cpi_branches() {
    assert!((Kpi::from_inputs(0.0, 0.0, 0.0, 100.0).cpi - 1.0).abs() < TOL);
    assert!((Kpi::from_inputs(0.0, 5.0, 0.0, 100.0).cpi - 0.0).abs() < TOL);
    assert!((Kpi::from_inputs(0.0, 30.0, 60.0, 100.0).cpi - 0.5).abs() < TOL);
}

#[test]
fn test_spi_branches() {
    assert!((Kpi::from_inputs(0.0, 0.0, 1.0, 100.0).spi - 1.0).abs() < TOL);
    assert!((Kpi::from_inputs(0.0, 5.0, 1.0, 100.0).spi - 0.0).abs() < TOL);
    assert!((Kpi::from_inputs(80.0, 60.0, 1.0, 100.0).spi - 0.75).abs() < TOL);
}

#[test]
fn test_eac_vac_identity() {
    let k = Kpi::from_inputs(100.0, 90.0, 120.0, 1000.0);
    assert!((k.eac - 1000.0 / (90.0 / 120.0)).abs() < TOL);
    assert!((k.vac - (1000.0 - k.eac)).abs() < TOL);
}

#[test]
fn test_tcpi_branches() {
    // bac == ac: infeasible remaining efficiency reported as 0.0
    assert!((Kpi::from_inputs(10.0, 8.0, 100.0, 100.0).tcpi - 0.0).abs() < TOL);
    // nominal: (100-40)/(100-50) = 1.2
    assert!((Kpi::from_inputs(50.0, 40.0, 50.0, 100.0).tcpi - 1.2).abs() < TOL);
    // over budget: negative denominator is still the real formula
    let k = Kpi::from_inputs(100.0, 90.0, 120.0, 100.0);
    assert!((k.tcpi - (10.0 / -20.0)).abs() < TOL);
}

#[test]
fn test_no_branch_produces_non_finite_values() {
    let zero_heavy = [
        (0.0, 0.0, 0.0, 0.0),
        (0.0, 1.0, 0.0, 0.0),
        (1.0, 0.0, 0.0, 10.0),
        (0.0, 0.0, 1.0, 1.0),
    ];
    for (pv, ev, ac, bac) in zero_heavy {
        let k = Kpi::from_inputs(pv, ev, ac, bac);
        assert!(k.cpi.is_finite(), "cpi not finite for {pv}/{ev}/{ac}/{bac}");
        assert!(k.spi.is_finite());
        assert!(k.eac.is_finite());
        assert!(k.vac.is_finite());
        assert!(k.tcpi.is_finite());
    }
}

// =============================================================================
// Batch contract
// =============================================================================

#[test]
fn test_calculate_is_idempotent() {
    let rows = vec![
        PeriodMetric::new("P001", day(7), 100.0, 80.0, 90.0, 1000.0),
        PeriodMetric::new("P001", day(14), 200.0, 150.0, 170.0, 1000.0),
        PeriodMetric::new("P002", day(7), 0.0, 0.0, 0.0, 500.0),
    ];
    let once = kpi::calculate(rows).unwrap();
    let twice = kpi::calculate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_calculate_is_order_independent() {
    let a = PeriodMetric::new("P001", day(7), 100.0, 80.0, 90.0, 1000.0);
    let b = PeriodMetric::new("P002", day(7), 50.0, 50.0, 40.0, 500.0);

    let forward = kpi::calculate(vec![a.clone(), b.clone()]).unwrap();
    let reverse = kpi::calculate(vec![b, a]).unwrap();
    assert_eq!(forward[0], reverse[1]);
    assert_eq!(forward[1], reverse[0]);
}

#[test]
fn test_duplicate_key_is_fatal() {
    let rows = vec![
        PeriodMetric::new("P001", day(7), 1.0, 1.0, 1.0, 10.0),
        PeriodMetric::new("P001", day(7), 2.0, 2.0, 2.0, 10.0),
    ];
    let err = kpi::calculate(rows).unwrap_err();
    match err {
        Error::DuplicateKey {
            project_id,
            period_end,
        } => {
            assert_eq!(project_id, "P001");
            assert_eq!(period_end, day(7));
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

#[test]
fn test_empty_project_id_is_fatal() {
    let rows = vec![PeriodMetric::new("", day(7), 1.0, 1.0, 1.0, 10.0)];
    assert!(matches!(
        kpi::calculate(rows).unwrap_err(),
        Error::MissingProjectId { index: 0 }
    ));
}

#[test]
fn test_same_date_across_projects_is_valid() {
    let rows = vec![
        PeriodMetric::new("P001", day(7), 1.0, 1.0, 1.0, 10.0),
        PeriodMetric::new("P002", day(7), 2.0, 2.0, 2.0, 10.0),
    ];
    assert!(kpi::calculate(rows).is_ok());
}
