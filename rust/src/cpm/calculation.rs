//! Schedule calculation using forward and backward passes.

use rustc_hash::FxHashMap;

use crate::config::ScheduleConfig;
use crate::models::TaskSet;
use crate::node_index::START_ID;
use crate::{log_changes, log_checks, log_debug};

use super::graph::{ScheduleError, ScheduleGraph};
use super::types::{ScheduleResult, TaskTiming};

/// Compute the CPM schedule for a task set with the default configuration.
///
/// # Returns
/// * `Ok(ScheduleResult)` with per-task dates, total duration and critical path
/// * `Err(ScheduleError)` if a predecessor is unknown, a duration is negative
///   the dependencies form a cycle or a finish time overflows `i64`; no
///   partial schedule is produced
pub fn compute_schedule(tasks: &TaskSet) -> Result<ScheduleResult, ScheduleError> {
    compute_schedule_with_config(tasks, &ScheduleConfig::default())
}

/// Compute the CPM schedule for a task set.
///
/// The input is never modified; every call returns a fresh snapshot.
pub fn compute_schedule_with_config(
    tasks: &TaskSet,
    config: &ScheduleConfig,
) -> Result<ScheduleResult, ScheduleError> {
    let verbosity = config.verbosity;
    let graph = ScheduleGraph::new(tasks, verbosity)?;
    let n = graph.len();

    // Forward pass: earliest start = latest finish among predecessors
    let mut earliest_start = vec![0i64; n];
    let mut earliest_finish = vec![0i64; n];

    for &node in &graph.order {
        if node == START_ID {
            continue;
        }
        let idx = node as usize;
        let start = graph.predecessors[idx]
            .iter()
            .map(|&p| earliest_finish[p as usize])
            .max()
            .unwrap_or(0);
        let Some(finish) = start.checked_add(graph.durations[idx]) else {
            let err = ScheduleError::DurationOverflow {
                task: graph.name(node).to_string(),
            };
            log_changes!(verbosity, error = %err, "rejected task set");
            return Err(err);
        };
        earliest_start[idx] = start;
        earliest_finish[idx] = finish;

        log_debug!(
            verbosity,
            "forward {}: ES={} EF={}",
            graph.name(node),
            earliest_start[idx],
            earliest_finish[idx]
        );
    }

    let total_duration = earliest_finish.iter().copied().max().unwrap_or(0);

    // Backward pass: latest finish = earliest latest start among successors.
    // LF >= EF >= duration here, so the subtraction cannot underflow.
    let mut latest_start = vec![0i64; n];
    let mut latest_finish = vec![0i64; n];

    for &node in graph.order.iter().rev() {
        if node == START_ID {
            continue;
        }
        let idx = node as usize;
        let finish = graph.successors[idx]
            .iter()
            .map(|&s| latest_start[s as usize])
            .min()
            .unwrap_or(total_duration);
        latest_finish[idx] = finish;
        latest_start[idx] = finish - graph.durations[idx];

        log_debug!(
            verbosity,
            "backward {}: LS={} LF={}",
            graph.name(node),
            latest_start[idx],
            latest_finish[idx]
        );
    }

    let mut order: Vec<String> = Vec::with_capacity(n.saturating_sub(1));
    let mut timings: FxHashMap<String, TaskTiming> =
        FxHashMap::with_capacity_and_hasher(n, Default::default());
    let mut critical_path: Vec<String> = Vec::new();

    for &node in &graph.order {
        if node == START_ID {
            continue;
        }
        let idx = node as usize;
        let name = graph.name(node).to_string();
        let timing = TaskTiming {
            earliest_start: earliest_start[idx],
            earliest_finish: earliest_finish[idx],
            latest_start: latest_start[idx],
            latest_finish: latest_finish[idx],
            slack: latest_start[idx] - earliest_start[idx],
        };

        log_checks!(
            verbosity,
            "{}: ES={} EF={} LS={} LF={} slack={}",
            name,
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack
        );

        if timing.is_critical() {
            critical_path.push(name.clone());
        }
        timings.insert(name.clone(), timing);
        order.push(name);
    }

    let result = ScheduleResult {
        order,
        timings,
        total_duration,
        critical_path,
    };
    log_changes!(verbosity, "{}", result);

    Ok(result)
}
