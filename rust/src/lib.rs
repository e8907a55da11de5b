//! Critical Path Method scheduling engine.
//!
//! Computes earliest/latest dates, slack and the critical task set for a
//! project given as a task-dependency graph. The engine is a pure function of
//! its input task set; editing, persistence and presentation are left to the
//! caller.
//!
//! ```
//! use cpm_rust::{compute_schedule, Task, TaskSet, START};
//!
//! let tasks = TaskSet::from_tasks([
//!     Task::new("A", 8, [START], "Survey"),
//!     Task::new("B", 12, ["A"], "Design"),
//! ])
//! .unwrap();
//!
//! let schedule = compute_schedule(&tasks).unwrap();
//! assert_eq!(schedule.total_duration(), 20);
//! assert_eq!(schedule.critical_path(), ["A", "B"]);
//! ```

mod config;
pub mod cpm;
pub mod logging;
mod models;
mod node_index;
#[cfg(feature = "python")]
mod python;

pub use config::ScheduleConfig;
pub use cpm::{
    compute_schedule, compute_schedule_with_config, topological_order, ProjectedDates,
    ScheduleError, ScheduleResult, TaskDates, TaskStatus, TaskTiming,
};
pub use models::{is_sentinel, normalize_name, Task, TaskSet, TaskSetError, END, START};
