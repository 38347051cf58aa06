//! KPI Calculator - per-row EVM performance indices
//!
//! **Problem**: naive `ev / ac` style ratios blow up to `inf`/`NaN` on the
//! zero-cost and zero-plan rows that every real portfolio contains.
//!
//! **Solution**: guarded arithmetic with a fixed default-value policy. The
//! zero-denominator branches are documented outcomes, never errors:
//!
//! | Index | Formula              | Degenerate case                          |
//! |-------|----------------------|------------------------------------------|
//! | CPI   | `ev / ac`            | `ac == 0`: 1.0 if `ev == 0`, else 0.0    |
//! | SPI   | `ev / pv`            | `pv == 0`: 1.0 if `ev == 0`, else 0.0    |
//! | EAC   | `bac / cpi`          | `cpi == 0`: `bac` (budget assumed held)  |
//! | VAC   | `bac - eac`          | none                                     |
//! | TCPI  | `(bac-ev)/(bac-ac)`  | `bac == ac`: 0.0 (remaining work, no remaining budget) |
//!
//! No cost incurred with no value earned is "on plan" (1.0); cost-free but
//! value owed is a hard failure (0.0), never infinite. Every computation is
//! row-independent and idempotent: the derived indices are fully determined
//! by the four inputs.

use crate::record::{check_keys, PeriodMetric};
use crate::Result;
use tracing::debug;

/// Derived EVM indices for a single period row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpi {
    /// Cost performance index
    pub cpi: f64,
    /// Schedule performance index
    pub spi: f64,
    /// Estimate at completion
    pub eac: f64,
    /// Variance at completion
    pub vac: f64,
    /// To-complete performance index
    pub tcpi: f64,
}

impl Kpi {
    /// Compute all five indices from the four cumulative inputs.
    ///
    /// Pure and total over finite non-negative inputs: never panics, never
    /// divides by zero, never produces `inf` from the documented branches.
    #[must_use]
    pub fn from_inputs(pv: f64, ev: f64, ac: f64, bac: f64) -> Self {
        let cpi = if ac > 0.0 {
            ev / ac
        } else if ev == 0.0 {
            1.0
        } else {
            0.0
        };

        let spi = if pv > 0.0 {
            ev / pv
        } else if ev == 0.0 {
            1.0
        } else {
            0.0
        };

        let eac = if cpi > 0.0 { bac / cpi } else { bac };
        let vac = bac - eac;

        let remaining_budget = bac - ac;
        let tcpi = if remaining_budget == 0.0 {
            0.0
        } else {
            (bac - ev) / remaining_budget
        };

        Self {
            cpi,
            spi,
            eac,
            vac,
            tcpi,
        }
    }
}

/// Augment every row with its five derived indices.
///
/// Rows are independent; no ordering is required and none is imposed. The
/// pass is idempotent: rerunning on already-augmented rows recomputes
/// identical values.
///
/// # Errors
///
/// Returns [`crate::Error::DuplicateKey`] or
/// [`crate::Error::MissingProjectId`] when the input violates the
/// one-row-per-project-per-period contract. No partial result is returned.
pub fn calculate(mut rows: Vec<PeriodMetric>) -> Result<Vec<PeriodMetric>> {
    check_keys(rows.iter().map(PeriodMetric::key))?;

    for row in &mut rows {
        let kpi = Kpi::from_inputs(row.pv, row.ev, row.ac, row.bac);
        row.cpi = Some(kpi.cpi);
        row.spi = Some(kpi.spi);
        row.eac = Some(kpi.eac);
        row.vac = Some(kpi.vac);
        row.tcpi = Some(kpi.tcpi);
    }

    debug!(rows = rows.len(), "computed EVM indices");
    Ok(rows)
}
