//! Record Schema - tabular rows exchanged with the caller
//!
//! ## Schema Overview
//!
//! ```text
//! PeriodMetric (N per project)  ──┐
//! ScheduleMetric (N per project) ──┼──> FlagEngine ──> Flag (0..N per period)
//! ChangeRecord (immutable log)  ──┘
//! ```
//!
//! All records are plain value rows keyed by `(project_id, period_end)`,
//! owned by the caller before and after every engine call. The engine never
//! retains references and never mutates a record it did not return.
//!
//! ## Usage
//!
//! ```rust
//! use avance::record::PeriodMetric;
//! use chrono::NaiveDate;
//!
//! let period_end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let row = PeriodMetric::new("P001", period_end, 100.0, 100.0, 100.0, 1000.0);
//! assert!(row.cpi.is_none()); // derived indices unset until the KPI pass
//! ```

mod change_record;
mod flag;
mod period_metric;
mod schedule_metric;

pub use change_record::{ChangeRecord, ChangeType};
pub use flag::{Flag, FlagType, Severity};
pub use period_metric::PeriodMetric;
pub use schedule_metric::ScheduleMetric;

use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Reject rows with an empty `project_id` or a duplicated composite key.
///
/// Shared by the KPI Calculator and the Flag Generator: both treat a
/// malformed key as fatal before any computation starts.
pub(crate) fn check_keys<'a>(
    rows: impl Iterator<Item = (&'a str, NaiveDate)>,
) -> Result<()> {
    let mut seen: HashSet<(&str, NaiveDate)> = HashSet::new();
    for (index, (project_id, period_end)) in rows.enumerate() {
        if project_id.is_empty() {
            return Err(Error::MissingProjectId { index });
        }
        if !seen.insert((project_id, period_end)) {
            return Err(Error::DuplicateKey {
                project_id: project_id.to_string(),
                period_end,
            });
        }
    }
    Ok(())
}
