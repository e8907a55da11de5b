//! Graph validation, successor index and topological ordering.

use thiserror::Error;

use crate::logging::VERBOSITY_SILENT;
use crate::models::TaskSet;
use crate::node_index::{NodeId, NodeIndex, START_ID};
use crate::{log_changes, log_checks, log_debug};

/// Errors that reject a task set before any date is computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Task {task:?} references unknown predecessor {predecessor:?}")]
    UnknownPredecessor { task: String, predecessor: String },
    #[error("Task {task:?} has invalid duration {duration}")]
    InvalidDuration { task: String, duration: i64 },
    #[error("Circular dependency detected: {}", .members.join(" -> "))]
    CycleDetected { members: Vec<String> },
    #[error("Finish time of task {task:?} exceeds the representable range")]
    DurationOverflow { task: String },
}

/// Visitation state for the depth-first traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Finished,
}

/// Validated dependency graph with dense node ids.
///
/// Node 0 is `START`; tasks follow in insertion order. All vectors are
/// indexed by node id.
#[derive(Debug, Clone)]
pub(crate) struct ScheduleGraph {
    pub index: NodeIndex,
    pub durations: Vec<i64>,
    pub predecessors: Vec<Vec<NodeId>>,
    /// Reverse adjacency, each list in insertion order of the dependents.
    pub successors: Vec<Vec<NodeId>>,
    /// Topological order, `START` first.
    pub order: Vec<NodeId>,
}

impl ScheduleGraph {
    /// Validate `tasks` and order them, without logging.
    pub fn build(tasks: &TaskSet) -> Result<Self, ScheduleError> {
        Self::new(tasks, VERBOSITY_SILENT)
    }

    /// Validate `tasks` and order them.
    pub fn new(tasks: &TaskSet, verbosity: u8) -> Result<Self, ScheduleError> {
        let result = Self::build_inner(tasks, verbosity);
        if let Err(ref err) = result {
            log_changes!(verbosity, error = %err, "rejected task set");
        }
        result
    }

    fn build_inner(tasks: &TaskSet, verbosity: u8) -> Result<Self, ScheduleError> {
        let index = NodeIndex::for_tasks(tasks);
        let n = index.len();
        let mut durations = vec![0; n];
        let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); n];

        for (id, task) in index.task_ids().zip(tasks) {
            let idx = id as usize;

            for pred in &task.predecessors {
                let pred_id = index
                    .id(pred)
                    .ok_or_else(|| ScheduleError::UnknownPredecessor {
                        task: task.name.clone(),
                        predecessor: pred.clone(),
                    })?;
                predecessors[idx].push(pred_id);
                successors[pred_id as usize].push(id);
            }

            if task.duration < 0 {
                return Err(ScheduleError::InvalidDuration {
                    task: task.name.clone(),
                    duration: task.duration,
                });
            }
            durations[idx] = task.duration;
        }

        let order = topological_sort(&successors, verbosity).map_err(|cycle| {
            ScheduleError::CycleDetected {
                members: cycle
                    .into_iter()
                    .filter_map(|id| index.name(id).map(str::to_string))
                    .collect(),
            }
        })?;

        log_checks!(
            verbosity,
            "topological order: {:?}",
            order
                .iter()
                .filter_map(|&id| index.name(id))
                .collect::<Vec<_>>()
        );

        Ok(Self {
            index,
            durations,
            predecessors,
            successors,
            order,
        })
    }

    /// Number of nodes, `START` included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Name of a node. Ids come from this graph, so resolution cannot fail.
    pub fn name(&self, id: NodeId) -> &str {
        self.index.name(id).unwrap_or_default()
    }
}

/// Depth-first topological sort over the successor index.
///
/// Traversal starts at `START`, then picks up any node it did not reach in id
/// order (only possible when the input is cyclic). The order is the reverse of
/// finish order. On a cycle, returns the in-progress nodes from the re-entered
/// node down to the one that closed the loop.
fn topological_sort(successors: &[Vec<NodeId>], verbosity: u8) -> Result<Vec<NodeId>, Vec<NodeId>> {
    let n = successors.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut finished: Vec<NodeId> = Vec::with_capacity(n);
    // (node, index of the next successor to visit)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    let roots = std::iter::once(START_ID).chain((0..n as NodeId).filter(|&id| id != START_ID));
    for root in roots {
        if marks[root as usize] != Mark::Unvisited {
            continue;
        }
        marks[root as usize] = Mark::InProgress;
        stack.push((root, 0));

        loop {
            let (node, child) = match stack.last_mut() {
                Some(top) => {
                    let child = successors[top.0 as usize].get(top.1).copied();
                    if child.is_some() {
                        top.1 += 1;
                    }
                    (top.0, child)
                }
                None => break,
            };

            match child {
                Some(child) => match marks[child as usize] {
                    Mark::Unvisited => {
                        log_debug!(verbosity, "visit {} -> {}", node, child);
                        marks[child as usize] = Mark::InProgress;
                        stack.push((child, 0));
                    }
                    Mark::InProgress => {
                        let pos = stack
                            .iter()
                            .position(|&(id, _)| id == child)
                            .unwrap_or(0);
                        return Err(stack[pos..].iter().map(|&(id, _)| id).collect());
                    }
                    Mark::Finished => {}
                },
                None => {
                    marks[node as usize] = Mark::Finished;
                    finished.push(node);
                    stack.pop();
                }
            }
        }
    }

    finished.reverse();
    Ok(finished)
}

/// Topological order of the tasks (sentinels excluded).
///
/// Every predecessor precedes its dependents; siblings are visited in
/// insertion order.
pub fn topological_order(tasks: &TaskSet) -> Result<Vec<String>, ScheduleError> {
    let graph = ScheduleGraph::build(tasks)?;
    Ok(graph
        .order
        .iter()
        .filter(|&&id| id != START_ID)
        .map(|&id| graph.name(id).to_string())
        .collect())
}
