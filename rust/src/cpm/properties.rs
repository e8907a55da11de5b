//! Property tests over randomly generated acyclic task sets.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use super::compute_schedule;
use crate::models::{Task, TaskSet, START};

/// Random DAG: task i may depend on any task j < i (bit j of its mask).
fn arb_task_set() -> impl Strategy<Value = (TaskSet, Vec<i64>, Vec<Vec<usize>>)> {
    (1usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(0i64..20, n),
                prop::collection::vec(any::<u8>(), n),
                any::<bool>(),
            )
        })
        .prop_map(|(durations, masks, reversed)| {
            let preds: Vec<Vec<usize>> = masks
                .iter()
                .enumerate()
                .map(|(i, &mask)| (0..i).filter(|&j| mask & (1u8 << j) != 0).collect())
                .collect();

            let mut tasks: Vec<Task> = durations
                .iter()
                .enumerate()
                .map(|(i, &d)| {
                    let names: Vec<String> = preds[i].iter().map(|j| format!("T{}", j)).collect();
                    Task::new(&format!("T{}", i), d, names, "")
                })
                .collect();
            if reversed {
                tasks.reverse();
            }

            let set = TaskSet::from_tasks(tasks).unwrap();
            (set, durations, preds)
        })
}

/// Longest chain ending with task `i`, by exhaustive recursion.
fn longest_finish(i: usize, durations: &[i64], preds: &[Vec<usize>]) -> i64 {
    let start = preds[i]
        .iter()
        .map(|&p| longest_finish(p, durations, preds))
        .max()
        .unwrap_or(0);
    start + durations[i]
}

proptest! {
    #[test]
    fn total_duration_matches_longest_path((tasks, durations, preds) in arb_task_set()) {
        let result = compute_schedule(&tasks).unwrap();
        let brute = (0..durations.len())
            .map(|i| longest_finish(i, &durations, &preds))
            .max()
            .unwrap_or(0);
        prop_assert_eq!(result.total_duration(), brute);

        for i in 0..durations.len() {
            let t = result.timing(&format!("T{}", i)).unwrap();
            prop_assert_eq!(t.earliest_finish, longest_finish(i, &durations, &preds));
        }
    }

    #[test]
    fn dates_are_consistent((tasks, _durations, _preds) in arb_task_set()) {
        let result = compute_schedule(&tasks).unwrap();

        for task in &tasks {
            let t = result.timing(&task.name).unwrap();
            prop_assert!(t.earliest_start <= t.latest_start);
            prop_assert!(t.slack >= 0);
            prop_assert_eq!(t.slack, t.latest_start - t.earliest_start);
            prop_assert_eq!(t.earliest_finish, t.earliest_start + task.duration);
            prop_assert_eq!(t.latest_finish, t.latest_start + task.duration);
            prop_assert!(t.latest_finish <= result.total_duration());

            for pred in task.predecessors.iter().filter(|p| *p != START) {
                let p = result.timing(pred).unwrap();
                prop_assert!(p.earliest_finish <= t.earliest_start);
                prop_assert!(p.latest_finish <= t.latest_start);
            }
        }
    }

    #[test]
    fn order_and_critical_path_are_well_formed((tasks, _durations, _preds) in arb_task_set()) {
        let result = compute_schedule(&tasks).unwrap();

        let position: FxHashMap<&str, usize> = result
            .order()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        prop_assert_eq!(position.len(), tasks.len());

        for task in &tasks {
            for pred in task.predecessors.iter().filter(|p| *p != START) {
                prop_assert!(position[pred.as_str()] < position[task.name.as_str()]);
            }
        }

        // Non-empty, zero-slack, listed in topological order
        prop_assert!(!result.critical_path().is_empty());
        let mut last = None;
        for name in result.critical_path() {
            prop_assert!(result.is_critical(name));
            let pos = position[name.as_str()];
            prop_assert!(last.map_or(true, |l| l < pos));
            last = Some(pos);
        }
        let critical_count = result.timings().filter(|(_, t)| t.is_critical()).count();
        prop_assert_eq!(critical_count, result.critical_path().len());

        // Some critical task finishes the project
        prop_assert!(result
            .timings()
            .any(|(_, t)| t.is_critical() && t.earliest_finish == result.total_duration()));
    }

    #[test]
    fn recomputation_is_identical((tasks, _durations, _preds) in arb_task_set()) {
        let first = compute_schedule(&tasks).unwrap();
        let second = compute_schedule(&tasks).unwrap();
        prop_assert_eq!(first, second);
    }
}
