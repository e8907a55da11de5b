//! Core data types: tasks and the insertion-ordered task set.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Name of the start sentinel. Implicit predecessor of every root task.
pub const START: &str = "DEB";

/// Name of the end sentinel. Implicit successor of every task without successors.
pub const END: &str = "FIN";

/// Normalize a task name: surrounding whitespace removed, upper-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// True if the (normalized) name is one of the graph sentinels.
pub fn is_sentinel(name: &str) -> bool {
    name == START || name == END
}

/// Errors raised while editing a task set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskSetError {
    #[error("Task name must not be empty")]
    EmptyName,
    #[error("Task name {0:?} is reserved")]
    ReservedName(String),
    #[error("Task {0:?} already exists")]
    DuplicateTask(String),
    #[error("Task {0:?} not found")]
    TaskNotFound(String),
}

/// A task to be scheduled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Duration in the project's time unit.
    pub duration: i64,
    /// Direct predecessors. Never empty once normalized: root tasks list `START`.
    #[serde(default)]
    pub predecessors: Vec<String>,
    /// Free-text description, no effect on scheduling.
    #[serde(default)]
    pub label: String,
}

impl Task {
    /// Create a normalized task.
    pub fn new<I, S>(name: &str, duration: i64, predecessors: I, label: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            duration,
            predecessors: predecessors
                .into_iter()
                .map(|p| p.as_ref().to_string())
                .collect(),
            label: label.to_string(),
        }
        .normalized()
    }

    /// Normalize the name and predecessor list.
    ///
    /// Blank predecessors are dropped, duplicates removed (first occurrence
    /// wins) and an empty list becomes `[START]`.
    pub fn normalized(mut self) -> Self {
        self.name = normalize_name(&self.name);

        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut predecessors = Vec::with_capacity(self.predecessors.len());
        for pred in &self.predecessors {
            let pred = normalize_name(pred);
            if !pred.is_empty() && seen.insert(pred.clone()) {
                predecessors.push(pred);
            }
        }
        if predecessors.is_empty() {
            predecessors.push(START.to_string());
        }
        self.predecessors = predecessors;
        self
    }

    /// True if this task depends directly on the start sentinel.
    pub fn is_root(&self) -> bool {
        self.predecessors.iter().any(|p| p == START)
    }
}

/// Insertion-ordered mapping from task name to task.
///
/// Insertion order is the tie-break for sibling traversal in the engine, so
/// it is preserved through editing and serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<Task>,
    index: FxHashMap<String, usize>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a task set from tasks in order, rejecting duplicates and bad names.
    pub fn from_tasks<I>(tasks: I) -> Result<Self, TaskSetError>
    where
        I: IntoIterator<Item = Task>,
    {
        let mut set = Self::new();
        for task in tasks {
            set.insert(task)?;
        }
        Ok(set)
    }

    /// Add a new task at the end of the set.
    ///
    /// Durations and predecessor references are not checked here; the engine
    /// reports them when the schedule is computed.
    pub fn insert(&mut self, task: Task) -> Result<(), TaskSetError> {
        let task = task.normalized();
        Self::check_name(&task.name)?;
        if self.index.contains_key(&task.name) {
            return Err(TaskSetError::DuplicateTask(task.name));
        }
        self.index.insert(task.name.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Replace an existing task in place, or append it if new.
    ///
    /// Returns the previous task when one was replaced.
    pub fn upsert(&mut self, task: Task) -> Result<Option<Task>, TaskSetError> {
        let task = task.normalized();
        Self::check_name(&task.name)?;
        match self.index.get(&task.name) {
            Some(&pos) => Ok(Some(std::mem::replace(&mut self.tasks[pos], task))),
            None => {
                self.index.insert(task.name.clone(), self.tasks.len());
                self.tasks.push(task);
                Ok(None)
            }
        }
    }

    /// Remove a task and every reference to it.
    ///
    /// Tasks left without predecessors fall back to `START`.
    pub fn remove(&mut self, name: &str) -> Result<Task, TaskSetError> {
        let name = normalize_name(name);
        let pos = self
            .index
            .get(&name)
            .copied()
            .ok_or_else(|| TaskSetError::TaskNotFound(name.clone()))?;

        let removed = self.tasks.remove(pos);
        for task in &mut self.tasks {
            task.predecessors.retain(|p| *p != name);
            if task.predecessors.is_empty() {
                task.predecessors.push(START.to_string());
            }
        }
        self.rebuild_index();
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        let name = normalize_name(name);
        self.index.get(&name).map(|&pos| &self.tasks[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Task names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }

    /// Direct dependents of `name` (a task or `START`), in insertion order.
    pub fn successors(&self, name: &str) -> Vec<&str> {
        let name = normalize_name(name);
        self.tasks
            .iter()
            .filter(|t| t.predecessors.iter().any(|p| *p == name))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Tasks nothing depends on; these feed the implicit `END` node.
    pub fn end_tasks(&self) -> Vec<&str> {
        let referenced: FxHashSet<&str> = self
            .tasks
            .iter()
            .flat_map(|t| t.predecessors.iter().map(|p| p.as_str()))
            .collect();
        self.tasks
            .iter()
            .filter(|t| !referenced.contains(t.name.as_str()))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Check references, durations and acyclicity without computing dates.
    pub fn validate(&self) -> Result<(), crate::cpm::ScheduleError> {
        crate::cpm::ScheduleGraph::build(self).map(|_| ())
    }

    fn check_name(name: &str) -> Result<(), TaskSetError> {
        if name.is_empty() {
            return Err(TaskSetError::EmptyName);
        }
        if is_sentinel(name) {
            return Err(TaskSetError::ReservedName(name.to_string()));
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, task) in self.tasks.iter().enumerate() {
            self.index.insert(task.name.clone(), pos);
        }
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Serialized form of a task inside a task set: the name is the map key and
/// the label is stored under `name`, as in saved project files.
#[derive(Serialize)]
struct TaskRecordRef<'a> {
    duration: i64,
    predecessors: &'a [String],
    #[serde(rename = "name")]
    label: &'a str,
}

#[derive(Deserialize)]
struct TaskRecord {
    duration: i64,
    #[serde(default)]
    predecessors: Vec<String>,
    #[serde(default, rename = "name", alias = "label")]
    label: String,
}

impl Serialize for TaskSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tasks.len()))?;
        for task in &self.tasks {
            map.serialize_entry(
                &task.name,
                &TaskRecordRef {
                    duration: task.duration,
                    predecessors: &task.predecessors,
                    label: &task.label,
                },
            )?;
        }
        map.end()
    }
}

struct TaskSetVisitor;

impl<'de> Visitor<'de> for TaskSetVisitor {
    type Value = TaskSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of task name to task record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TaskSet, A::Error> {
        let mut set = TaskSet::new();
        while let Some((name, record)) = access.next_entry::<String, TaskRecord>()? {
            let task = Task {
                name,
                duration: record.duration,
                predecessors: record.predecessors,
                label: record.label,
            };
            set.insert(task).map_err(de::Error::custom)?;
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for TaskSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<TaskSet, D::Error> {
        deserializer.deserialize_map(TaskSetVisitor)
    }
}
