//! Flag Generator - rule-based portfolio health flags
//!
//! Consumes KPI-augmented [`PeriodMetric`] rows joined with
//! [`ScheduleMetric`] rows and emits discrete [`Flag`] signals:
//!
//! | Rule                | Severity | Fires when                                      |
//! |---------------------|----------|-------------------------------------------------|
//! | Cost Efficiency     | High     | `cpi < 0.9`                                     |
//! | Schedule Efficiency | High     | `spi < 0.9`                                     |
//! | Float Collapse      | Medium   | `avg_float` fell > 5 days over 4 periods        |
//!
//! Rules evaluate independently per row; several flags may share one
//! `(project_id, period_end)` and nothing deduplicates or ranks them. Each
//! call is a stateless recomputation over the full supplied history, so the
//! output is always the complete flag history implied by the inputs, not an
//! incremental diff.
//!
//! Per-project temporal state (trailing means, the float lookback) lives in
//! an explicit sorted sequence per project, indexed positionally. Rows
//! without a matching schedule row keep `None` schedule fields and skip
//! schedule-dependent rules; metric-only rules still evaluate for them.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::record::{check_keys, ChangeRecord, Flag, FlagType, PeriodMetric, ScheduleMetric, Severity};
use crate::rolling::trailing_mean;
use crate::Result;

/// One metric row joined with its schedule row, plus trailing-window means.
///
/// The trend means are computed for every row as an extension point; no
/// shipped rule consumes them yet. `None` means the window was not yet
/// fillable (project warm-up) or the underlying value was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPeriod {
    /// Project identifier
    pub project_id: String,
    /// Reporting period end date
    pub period_end: NaiveDate,
    /// Cost performance index, if the row was KPI-augmented
    pub cpi: Option<f64>,
    /// Schedule performance index, if the row was KPI-augmented
    pub spi: Option<f64>,
    /// Average total float in days, if a schedule row joined
    pub avg_float: Option<f64>,
    /// Critical activity count, if a schedule row joined
    pub critical_count: Option<u32>,
    /// Trailing mean of `cpi` (window 3)
    pub cpi_trend: Option<f64>,
    /// Trailing mean of `spi` (window 3)
    pub spi_trend: Option<f64>,
    /// Trailing mean of `avg_float` (window 4)
    pub float_trend: Option<f64>,
}

/// Rule thresholds and window lengths.
///
/// Defaults are the published contract values; the builder exists for
/// callers that need to tune thresholds without forking the rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagEngine {
    cpi_threshold: f64,
    spi_threshold: f64,
    float_drop_days: f64,
    cpi_window: usize,
    spi_window: usize,
    float_window: usize,
    float_lookback: usize,
}

impl Default for FlagEngine {
    fn default() -> Self {
        Self {
            cpi_threshold: 0.9,
            spi_threshold: 0.9,
            float_drop_days: 5.0,
            cpi_window: 3,
            spi_window: 3,
            float_window: 4,
            float_lookback: 4,
        }
    }
}

impl FlagEngine {
    /// Create a builder with contract-default thresholds.
    #[must_use]
    pub fn builder() -> FlagEngineBuilder {
        FlagEngineBuilder::default()
    }

    /// Join, partition, sort and enrich the inputs without evaluating rules.
    ///
    /// Returns one ascending-by-date sequence per project. Exposed so
    /// downstream consumers (and future rules) can reuse the engine's
    /// temporal bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error when either table violates the
    /// one-row-per-project-per-period contract.
    pub fn project_periods(
        &self,
        metrics: &[PeriodMetric],
        schedule: &[ScheduleMetric],
    ) -> Result<BTreeMap<String, Vec<ProjectPeriod>>> {
        check_keys(metrics.iter().map(PeriodMetric::key))?;
        check_keys(schedule.iter().map(ScheduleMetric::key))?;

        let by_key: HashMap<(&str, NaiveDate), &ScheduleMetric> =
            schedule.iter().map(|row| (row.key(), row)).collect();

        let mut projects: BTreeMap<String, Vec<ProjectPeriod>> = BTreeMap::new();
        for row in metrics {
            let joined = by_key.get(&row.key());
            projects
                .entry(row.project_id.clone())
                .or_default()
                .push(ProjectPeriod {
                    project_id: row.project_id.clone(),
                    period_end: row.period_end,
                    cpi: row.cpi,
                    spi: row.spi,
                    avg_float: joined.map(|s| s.avg_float),
                    critical_count: joined.map(|s| s.critical_count),
                    cpi_trend: None,
                    spi_trend: None,
                    float_trend: None,
                });
        }

        for periods in projects.values_mut() {
            periods.sort_by_key(|p| p.period_end);

            let cpi: Vec<Option<f64>> = periods.iter().map(|p| p.cpi).collect();
            let spi: Vec<Option<f64>> = periods.iter().map(|p| p.spi).collect();
            let float: Vec<Option<f64>> = periods.iter().map(|p| p.avg_float).collect();

            let cpi_trend = trailing_mean(&cpi, self.cpi_window);
            let spi_trend = trailing_mean(&spi, self.spi_window);
            let float_trend = trailing_mean(&float, self.float_window);

            for (i, period) in periods.iter_mut().enumerate() {
                period.cpi_trend = cpi_trend[i];
                period.spi_trend = spi_trend[i];
                period.float_trend = float_trend[i];
            }
        }

        Ok(projects)
    }

    /// Evaluate every rule for every row and return the full flag history.
    ///
    /// `changes` is accepted for forward compatibility: no shipped rule
    /// consumes change records yet, and an empty slice is always valid.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error when the metric or schedule table
    /// violates the one-row-per-project-per-period contract. No partial
    /// flag list is returned.
    pub fn generate(
        &self,
        metrics: &[PeriodMetric],
        schedule: &[ScheduleMetric],
        changes: &[ChangeRecord],
    ) -> Result<Vec<Flag>> {
        let projects = self.project_periods(metrics, schedule)?;
        debug!(
            projects = projects.len(),
            rows = metrics.len(),
            changes = changes.len(),
            "evaluating flag rules (change records accepted, not yet consumed)"
        );

        let mut flags = Vec::new();
        for periods in projects.values() {
            for (i, period) in periods.iter().enumerate() {
                self.check_cost_efficiency(period, &mut flags);
                self.check_schedule_efficiency(period, &mut flags);
                self.check_float_collapse(periods, i, &mut flags);
            }
        }

        debug!(flags = flags.len(), "flag evaluation complete");
        Ok(flags)
    }

    fn check_cost_efficiency(&self, period: &ProjectPeriod, flags: &mut Vec<Flag>) {
        let Some(cpi) = period.cpi else { return };
        if cpi < self.cpi_threshold {
            trace!(project_id = %period.project_id, cpi, "cost efficiency breach");
            flags.push(Flag {
                project_id: period.project_id.clone(),
                period_end: period.period_end,
                flag_type: FlagType::CostEfficiency,
                severity: Severity::High,
                message: format!("CPI {cpi:.2} < {:.2}", self.cpi_threshold),
            });
        }
    }

    fn check_schedule_efficiency(&self, period: &ProjectPeriod, flags: &mut Vec<Flag>) {
        let Some(spi) = period.spi else { return };
        if spi < self.spi_threshold {
            trace!(project_id = %period.project_id, spi, "schedule efficiency breach");
            flags.push(Flag {
                project_id: period.project_id.clone(),
                period_end: period.period_end,
                flag_type: FlagType::ScheduleEfficiency,
                severity: Severity::High,
                message: format!("SPI {spi:.2} < {:.2}", self.spi_threshold),
            });
        }
    }

    /// Compare `avg_float` against the row exactly `float_lookback`
    /// positions earlier in the same project's sorted sequence.
    ///
    /// Rows with fewer than `float_lookback` prior periods skip the rule:
    /// clamping the lookback to the project's first row fires spuriously
    /// during warm-up, so warm-up rows emit nothing instead.
    fn check_float_collapse(&self, periods: &[ProjectPeriod], i: usize, flags: &mut Vec<Flag>) {
        if i < self.float_lookback {
            return;
        }
        let period = &periods[i];
        let (Some(current), Some(earlier)) =
            (period.avg_float, periods[i - self.float_lookback].avg_float)
        else {
            return;
        };

        let drop = earlier - current;
        if drop > self.float_drop_days {
            trace!(project_id = %period.project_id, drop, "float collapse");
            flags.push(Flag {
                project_id: period.project_id.clone(),
                period_end: period.period_end,
                flag_type: FlagType::FloatCollapse,
                severity: Severity::Medium,
                message: format!(
                    "avg_float dropped {drop:.1} days over {} periods",
                    self.float_lookback
                ),
            });
        }
    }
}

/// Builder for [`FlagEngine`].
#[derive(Debug, Clone, Copy)]
pub struct FlagEngineBuilder {
    engine: FlagEngine,
}

impl Default for FlagEngineBuilder {
    fn default() -> Self {
        Self {
            engine: FlagEngine::default(),
        }
    }
}

impl FlagEngineBuilder {
    /// CPI below this fires a High cost-efficiency flag (default 0.9).
    #[must_use]
    pub const fn cpi_threshold(mut self, threshold: f64) -> Self {
        self.engine.cpi_threshold = threshold;
        self
    }

    /// SPI below this fires a High schedule-efficiency flag (default 0.9).
    #[must_use]
    pub const fn spi_threshold(mut self, threshold: f64) -> Self {
        self.engine.spi_threshold = threshold;
        self
    }

    /// Float drop (days) beyond this fires a Medium collapse flag (default 5.0).
    #[must_use]
    pub const fn float_drop_days(mut self, days: f64) -> Self {
        self.engine.float_drop_days = days;
        self
    }

    /// Lookback distance (periods) for the float-collapse rule (default 4).
    #[must_use]
    pub const fn float_lookback(mut self, periods: usize) -> Self {
        self.engine.float_lookback = periods;
        self
    }

    /// Trailing-window lengths for the cpi/spi/float trend means
    /// (defaults 3, 3, 4).
    #[must_use]
    pub const fn trend_windows(mut self, cpi: usize, spi: usize, float: usize) -> Self {
        self.engine.cpi_window = cpi;
        self.engine.spi_window = spi;
        self.engine.float_window = float;
        self
    }

    /// Build the engine.
    #[must_use]
    pub const fn build(self) -> FlagEngine {
        self.engine
    }
}
