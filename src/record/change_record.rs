//! Change Record - immutable scope/schedule change log entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of an approved project change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeType {
    /// Scope added or removed (moves BAC)
    Scope,
    /// Schedule relief or acceleration (moves the finish date)
    Schedule,
    /// Budget-only adjustment with no scope movement
    Budget,
}

/// One immutable change-log entry.
///
/// Change records are accepted by the flag engine for forward
/// compatibility; no shipped rule consumes them yet, and an empty change
/// log is always valid input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeRecord {
    /// Project the change applies to
    pub project_id: String,
    /// Unique change identifier within the portfolio
    pub change_id: String,
    /// Reporting period in which the change was approved
    pub period_end: NaiveDate,
    /// Change category
    pub change_type: ChangeType,
    /// Budget-at-completion delta (signed)
    pub delta_bac: f64,
    /// Finish-date delta in days (signed)
    pub delta_finish_days: i32,
    /// Free-text justification
    pub reason: String,
}

impl ChangeRecord {
    /// Create a change-log entry.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_id: impl Into<String>,
        change_id: impl Into<String>,
        period_end: NaiveDate,
        change_type: ChangeType,
        delta_bac: f64,
        delta_finish_days: i32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            change_id: change_id.into(),
            period_end,
            change_type,
            delta_bac,
            delta_finish_days,
            reason: reason.into(),
        }
    }
}
