//! Schedule Metric - period-level schedule health per project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One schedule-health row per project per reporting period.
///
/// Joined onto [`super::PeriodMetric`] rows by `(project_id, period_end)`.
/// A metric row without a matching schedule row is not an error; schedule
/// dependent rules are simply skipped for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleMetric {
    /// Project identifier (composite key with `period_end`)
    pub project_id: String,
    /// Reporting period end date
    pub period_end: NaiveDate,
    /// Mean total float across remaining activities, in days (may be negative)
    pub avg_float: f64,
    /// Number of critical activities (total float <= 0)
    pub critical_count: u32,
    /// Planned percent complete for the whole project, 0..=100
    pub planned_pct_total: f64,
    /// Actual percent complete for the whole project, 0..=100
    pub actual_pct_total: f64,
}

impl ScheduleMetric {
    /// Create a schedule-health row.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        period_end: NaiveDate,
        avg_float: f64,
        critical_count: u32,
        planned_pct_total: f64,
        actual_pct_total: f64,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            period_end,
            avg_float,
            critical_count,
            planned_pct_total,
            actual_pct_total,
        }
    }

    /// Composite key used for joins and uniqueness checks.
    #[must_use]
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.project_id, self.period_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_metric_roundtrip() {
        let period_end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let row = ScheduleMetric::new("P003", period_end, -2.5, 7, 40.0, 31.5);

        let json = serde_json::to_string(&row).expect("serialization failed");
        let back: ScheduleMetric = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(row, back);
        assert!(back.avg_float < 0.0);
    }
}
