//! Result types for CPM schedule computation.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

use crate::config::ScheduleConfig;
use crate::models::{normalize_name, TaskSet, START};

/// Per-task timing information from the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: i64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: i64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: i64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: i64,
    /// Slack = latest_start - earliest_start.
    pub slack: i64,
}

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }
}

/// Display classification of a task by its slack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Zero slack: any delay moves the project end.
    Critical,
    /// Slack within the configured warning threshold.
    Warning,
    Normal,
}

impl TaskStatus {
    pub fn from_slack(slack: i64, config: &ScheduleConfig) -> Self {
        if slack == 0 {
            TaskStatus::Critical
        } else if slack <= config.warning_slack_threshold {
            TaskStatus::Warning
        } else {
            TaskStatus::Normal
        }
    }
}

/// Immutable schedule snapshot produced by `compute_schedule`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub(crate) order: Vec<String>,
    pub(crate) timings: FxHashMap<String, TaskTiming>,
    pub(crate) total_duration: i64,
    pub(crate) critical_path: Vec<String>,
}

impl ScheduleResult {
    /// Project length: earliest finish of the end sentinel.
    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    /// Zero-slack tasks in topological order.
    ///
    /// When several zero-slack branches exist they are all listed; this is
    /// the critical set, not one chosen chain.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    /// Tasks in topological order (sentinels excluded).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn timing(&self, name: &str) -> Option<&TaskTiming> {
        self.timings.get(&normalize_name(name))
    }

    /// Timings in topological order.
    pub fn timings(&self) -> impl Iterator<Item = (&str, &TaskTiming)> {
        self.order
            .iter()
            .filter_map(|name| self.timings.get(name).map(|t| (name.as_str(), t)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_critical(&self, name: &str) -> bool {
        self.timing(name).is_some_and(TaskTiming::is_critical)
    }

    pub fn status(&self, name: &str, config: &ScheduleConfig) -> Option<TaskStatus> {
        self.timing(name)
            .map(|t| TaskStatus::from_slack(t.slack, config))
    }

    /// Dependency edges that carry the critical path.
    ///
    /// An edge is critical when both ends have zero slack and the dependent
    /// starts exactly when the predecessor finishes. `START` counts as a
    /// critical node finishing at 0. Edges are listed in task insertion order.
    pub fn critical_edges<'a>(&self, tasks: &'a TaskSet) -> Vec<(&'a str, &'a str)> {
        let start_timing = TaskTiming::default();
        let mut edges = Vec::new();
        for task in tasks {
            let Some(timing) = self.timings.get(&task.name) else {
                continue;
            };
            if !timing.is_critical() {
                continue;
            }
            for pred in &task.predecessors {
                let pred_timing = if pred == START {
                    Some(&start_timing)
                } else {
                    self.timings.get(pred)
                };
                if let Some(pt) = pred_timing {
                    if pt.is_critical() && pt.earliest_finish == timing.earliest_start {
                        edges.push((pred.as_str(), task.name.as_str()));
                    }
                }
            }
        }
        edges
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total duration: {}, critical tasks: {} ({})",
            self.total_duration,
            self.critical_path.len(),
            self.critical_path.join(", ")
        )
    }
}
