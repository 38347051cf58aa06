//! Period Metric - time-phased cost performance per project and period

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cumulative cost-performance row per project per reporting period.
///
/// The four inputs (`pv`, `ev`, `ac`, `bac`) come from the source-of-truth
/// store already aggregated to period level. They are cumulative and
/// monotonically non-decreasing within a project's timeline; that invariant
/// is enforced upstream, not here.
///
/// The five derived indices start as `None` and are populated by
/// [`crate::kpi::calculate`]. They are fully determined by the four inputs,
/// so recomputing an already-augmented row yields identical values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodMetric {
    /// Project identifier (composite key with `period_end`)
    pub project_id: String,
    /// Reporting period end date (weekly or monthly cadence)
    pub period_end: NaiveDate,
    /// Planned value: budgeted cost of work scheduled to date
    pub pv: f64,
    /// Earned value: budgeted cost of work completed to date
    pub ev: f64,
    /// Actual cost incurred to date
    pub ac: f64,
    /// Budget at completion for the project scope
    pub bac: f64,
    /// Cost performance index (`ev / ac`, guarded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpi: Option<f64>,
    /// Schedule performance index (`ev / pv`, guarded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spi: Option<f64>,
    /// Estimate at completion (`bac / cpi`, guarded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eac: Option<f64>,
    /// Variance at completion (`bac - eac`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vac: Option<f64>,
    /// To-complete performance index (`(bac - ev) / (bac - ac)`, guarded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcpi: Option<f64>,
}

impl PeriodMetric {
    /// Create an input row with all derived indices unset.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        period_end: NaiveDate,
        pv: f64,
        ev: f64,
        ac: f64,
        bac: f64,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            period_end,
            pv,
            ev,
            ac,
            bac,
            cpi: None,
            spi: None,
            eac: None,
            vac: None,
            tcpi: None,
        }
    }

    /// Composite key used for joins and uniqueness checks.
    #[must_use]
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.project_id, self.period_end)
    }
}
