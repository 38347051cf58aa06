//! Synthetic portfolio generator (feature `synth`)
//!
//! Deterministic, seeded generation of a small project portfolio for
//! demos, benches and integration tests. Realism is explicitly a non-goal;
//! the contract is determinism: the same builder with the same seed always
//! produces byte-identical records.
//!
//! Each project follows a simple cumulative S-curve for planned value and
//! earns/spends against it according to its performance profile, so a
//! `Deteriorating` project reliably drifts into flag territory while a
//! `Good` one stays clean.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::record::{ChangeRecord, ChangeType, PeriodMetric, ScheduleMetric};

/// How a synthetic project performs over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfProfile {
    /// Hovers around plan (factors ~0.95..1.05)
    Stable,
    /// Slightly ahead of plan (factors ~1.0..1.1)
    Good,
    /// Degrades as the project ages, bottoming out ~30% below plan
    Deteriorating,
}

impl PerfProfile {
    /// Cost and schedule earning factors for the given elapsed fraction.
    fn factors(self, rng: &mut StdRng, elapsed: f64) -> (f64, f64) {
        match self {
            Self::Stable => (rng.gen_range(0.95..1.05), rng.gen_range(0.95..1.05)),
            Self::Good => (rng.gen_range(1.0..1.1), rng.gen_range(1.0..1.1)),
            Self::Deteriorating => {
                let degrade = (elapsed * 0.5).min(0.3);
                (
                    rng.gen_range((0.9 - degrade)..1.0),
                    rng.gen_range((0.8 - degrade)..1.0),
                )
            }
        }
    }

    /// Per-period float drift range in days.
    const fn float_drift(self) -> (f64, f64) {
        match self {
            Self::Stable => (-2.0, 1.5),
            Self::Good => (-1.0, 2.0),
            Self::Deteriorating => (-3.0, 0.5),
        }
    }
}

/// One synthetic project to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpec {
    /// Project identifier
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Budget at completion
    pub budget: f64,
    /// Performance profile
    pub profile: PerfProfile,
}

impl ProjectSpec {
    /// Create a project spec.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        budget: f64,
        profile: PerfProfile,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            budget,
            profile,
        }
    }
}

/// Generated portfolio tables, schema-conformant with the engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPortfolio {
    /// Cumulative cost-performance rows, one per project per period
    pub metrics: Vec<PeriodMetric>,
    /// Schedule-health rows, one per project per period
    pub schedule: Vec<ScheduleMetric>,
    /// Occasional approved-change log entries
    pub changes: Vec<ChangeRecord>,
}

/// Builder for [`SyntheticPortfolio`].
#[derive(Debug, Clone)]
pub struct PortfolioBuilder {
    start: NaiveDate,
    periods: usize,
    seed: u64,
    projects: Vec<ProjectSpec>,
}

impl Default for PortfolioBuilder {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 7).expect("valid literal date"),
            periods: 52,
            seed: 42,
            projects: Vec::new(),
        }
    }
}

impl PortfolioBuilder {
    /// Create a builder with one year of weekly periods and seed 42.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First period end date (weekly cadence from here).
    #[must_use]
    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Number of reporting periods per project.
    #[must_use]
    pub fn periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    /// RNG seed; equal seeds produce identical portfolios.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a project to generate.
    #[must_use]
    pub fn project(mut self, spec: ProjectSpec) -> Self {
        self.projects.push(spec);
        self
    }

    /// Generate the portfolio.
    ///
    /// With no projects configured, generates the stock three-project mix
    /// (stable / good / deteriorating).
    #[must_use]
    pub fn build(self) -> SyntheticPortfolio {
        let projects = if self.projects.is_empty() {
            vec![
                ProjectSpec::new("P001", "North Substation", 250_000.0, PerfProfile::Stable),
                ProjectSpec::new("P002", "Billing Replatform", 180_000.0, PerfProfile::Good),
                ProjectSpec::new(
                    "P003",
                    "Harbor Expansion",
                    400_000.0,
                    PerfProfile::Deteriorating,
                ),
            ]
        } else {
            self.projects
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut portfolio = SyntheticPortfolio {
            metrics: Vec::with_capacity(projects.len() * self.periods),
            schedule: Vec::with_capacity(projects.len() * self.periods),
            changes: Vec::new(),
        };

        for spec in &projects {
            generate_project(spec, self.start, self.periods, &mut rng, &mut portfolio);
        }

        debug!(
            projects = projects.len(),
            metrics = portfolio.metrics.len(),
            changes = portfolio.changes.len(),
            "generated synthetic portfolio"
        );
        portfolio
    }
}

#[allow(clippy::cast_precision_loss)]
fn generate_project(
    spec: &ProjectSpec,
    start: NaiveDate,
    periods: usize,
    rng: &mut StdRng,
    out: &mut SyntheticPortfolio,
) {
    let bac = spec.budget;
    let mut cum_pv_pct = 0.0_f64;
    let mut cum_ev = 0.0_f64;
    let mut cum_ac = 0.0_f64;
    let mut avg_float = rng.gen_range(12.0..25.0);
    let mut change_seq = 0_u32;

    for i in 0..periods {
        let period_end = start + Duration::weeks(i as i64);
        let elapsed = if periods > 1 {
            i as f64 / (periods - 1) as f64
        } else {
            1.0
        };

        // Planned value climbs a noisy S-curve and saturates at BAC.
        let step = if cum_pv_pct < 1.0 {
            rng.gen_range(0.01..0.04)
        } else {
            0.0
        };
        let prev_pv_pct = cum_pv_pct;
        cum_pv_pct = (cum_pv_pct + step).min(1.0);
        let pv = bac * cum_pv_pct;
        let delta_pv = bac * (cum_pv_pct - prev_pv_pct);

        let (cpi_factor, spi_factor) = spec.profile.factors(rng, elapsed);

        // Occasional stall: nothing earned, fixed costs keep burning.
        let stalled = rng.gen_bool(0.05);
        let delta_ev = if stalled { 0.0 } else { delta_pv * spi_factor };
        cum_ev = (cum_ev + delta_ev).min(bac);

        let mut delta_ac = if cpi_factor > 0.1 {
            delta_ev / cpi_factor
        } else {
            delta_ev
        };
        if stalled && cum_pv_pct > 0.0 && cum_pv_pct < 1.0 {
            delta_ac += bac * rng.gen_range(0.0005..0.002);
        }
        cum_ac += delta_ac;

        out.metrics.push(PeriodMetric::new(
            spec.project_id.clone(),
            period_end,
            pv,
            cum_ev,
            cum_ac,
            bac,
        ));

        let (lo, hi) = spec.profile.float_drift();
        avg_float += rng.gen_range(lo..hi);
        let critical_count = if avg_float <= 0.0 {
            rng.gen_range(3..9)
        } else if avg_float < 5.0 {
            rng.gen_range(1..4)
        } else {
            0
        };
        out.schedule.push(ScheduleMetric::new(
            spec.project_id.clone(),
            period_end,
            avg_float,
            critical_count,
            cum_pv_pct * 100.0,
            cum_ev / bac * 100.0,
        ));

        if rng.gen_bool(0.03) {
            change_seq += 1;
            let change_type = match rng.gen_range(0..3) {
                0 => ChangeType::Scope,
                1 => ChangeType::Schedule,
                _ => ChangeType::Budget,
            };
            out.changes.push(ChangeRecord::new(
                spec.project_id.clone(),
                format!("{}-CR{change_seq}", spec.project_id),
                period_end,
                change_type,
                bac * rng.gen_range(-0.02..0.05),
                rng.gen_range(0..30),
                format!("synthetic change {change_seq} for {}", spec.name),
            ));
        }
    }
}
