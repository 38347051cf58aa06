//! Flag - discrete portfolio health signals emitted by the flag engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule fired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlagType {
    /// CPI below the cost-efficiency threshold
    CostEfficiency,
    /// SPI below the schedule-efficiency threshold
    ScheduleEfficiency,
    /// Average total float dropped sharply over the lookback window
    FloatCollapse,
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CostEfficiency => "Cost Efficiency",
            Self::ScheduleEfficiency => "Schedule Efficiency",
            Self::FloatCollapse => "Float Collapse",
        };
        f.write_str(name)
    }
}

/// How urgent the signal is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Worth watching
    Medium,
    /// Needs intervention
    High,
}

/// One emitted health signal.
///
/// Flags are produced, never mutated, and never retracted: each engine call
/// recomputes the complete flag history implied by its inputs. Several
/// flags may share the same `(project_id, period_end)` when multiple rules
/// fire for one row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flag {
    /// Project the signal applies to
    pub project_id: String,
    /// Reporting period the signal applies to
    pub period_end: NaiveDate,
    /// Which rule fired
    pub flag_type: FlagType,
    /// Signal severity
    pub severity: Severity,
    /// Plain-text detail for the presentation layer
    pub message: String,
}
