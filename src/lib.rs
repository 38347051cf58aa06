//! # Avance: Earned Value Management Analytics Engine
//!
//! Avance turns time-phased cost and schedule records for a project
//! portfolio into EVM performance indices (CPI, SPI, EAC, VAC, TCPI) and
//! rule-based health flags (cost/schedule efficiency breaches, float
//! collapse).
//!
//! ## Design Principles
//!
//! - **Pure core**: no I/O, no retained state; every call is a bounded,
//!   reproducible transformation over caller-owned rows
//! - **Guarded arithmetic**: zero-denominator cases follow a documented
//!   default-value policy; they are outcomes, never errors or `inf`
//! - **Explicit temporal state**: trend windows and lookbacks run over an
//!   explicit sorted per-project sequence, indexed positionally
//!
//! ## Example Usage
//!
//! ```rust
//! use avance::{analyze, PeriodMetric};
//! use chrono::NaiveDate;
//!
//! let period_end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let metrics = vec![PeriodMetric::new("P001", period_end, 100.0, 85.0, 100.0, 1000.0)];
//!
//! let report = analyze(metrics, &[], &[])?;
//! assert_eq!(report.metrics[0].cpi, Some(0.85));
//! assert_eq!(report.flags.len(), 2); // CPI and SPI both breach 0.9
//! # Ok::<(), avance::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod flags;
pub mod kpi;
pub mod record;
pub mod rolling;
#[cfg(feature = "synth")]
pub mod synth;

pub use error::{Error, Result};
pub use flags::{FlagEngine, FlagEngineBuilder, ProjectPeriod};
pub use record::{ChangeRecord, ChangeType, Flag, FlagType, PeriodMetric, ScheduleMetric, Severity};

use serde::{Deserialize, Serialize};

/// Output of the full pipeline: KPI-augmented rows plus the complete flag
/// history they imply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    /// Input rows with all five derived indices populated
    pub metrics: Vec<PeriodMetric>,
    /// Every flag fired by the default rule set
    pub flags: Vec<Flag>,
}

/// Run the KPI Calculator and the default [`FlagEngine`] in sequence.
///
/// Convenience façade over [`kpi::calculate`] and
/// [`FlagEngine::generate`]; callers needing non-default thresholds use
/// the builder directly.
///
/// # Errors
///
/// Returns a malformed-input error when any input table violates the
/// one-row-per-project-per-period contract.
pub fn analyze(
    metrics: Vec<PeriodMetric>,
    schedule: &[ScheduleMetric],
    changes: &[ChangeRecord],
) -> Result<AnalysisReport> {
    let metrics = kpi::calculate(metrics)?;
    let flags = FlagEngine::default().generate(&metrics, schedule, changes)?;
    Ok(AnalysisReport { metrics, flags })
}
