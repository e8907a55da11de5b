//! Projection of schedule offsets onto calendar dates.
//!
//! Offsets are added as plain days; there is no working-day calendar.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::types::ScheduleResult;

/// Calendar dates for one task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskDates {
    pub task_id: String,
    pub earliest_start: NaiveDate,
    pub earliest_finish: NaiveDate,
    pub latest_start: NaiveDate,
    pub latest_finish: NaiveDate,
}

/// Schedule projected from a project start date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectedDates {
    pub start: NaiveDate,
    pub finish: NaiveDate,
    /// Per-task dates in topological order.
    pub tasks: Vec<TaskDates>,
}

fn offset(start: NaiveDate, days: i64) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::try_from(days).ok()?))
}

impl ScheduleResult {
    /// Map every offset to `start + offset` days.
    ///
    /// Returns `None` if a date falls outside the representable range.
    pub fn project_dates(&self, start: NaiveDate) -> Option<ProjectedDates> {
        let tasks = self
            .timings()
            .map(|(name, t)| {
                Some(TaskDates {
                    task_id: name.to_string(),
                    earliest_start: offset(start, t.earliest_start)?,
                    earliest_finish: offset(start, t.earliest_finish)?,
                    latest_start: offset(start, t.latest_start)?,
                    latest_finish: offset(start, t.latest_finish)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(ProjectedDates {
            start,
            finish: offset(start, self.total_duration())?,
            tasks,
        })
    }
}
