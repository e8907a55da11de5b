//! Dense node ids for the schedule graph.
//!
//! Every pass indexes plain vectors by `NodeId`. Id 0 is always `START`;
//! tasks follow in task-set insertion order, which is also the sibling
//! tie-break of the traversal.

use rustc_hash::FxHashMap;

use crate::models::{TaskSet, START};

pub type NodeId = u32;

/// Id of the start sentinel in every `NodeIndex`.
pub const START_ID: NodeId = 0;

/// Name table for one task set, `START` first.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    ids: FxHashMap<String, NodeId>,
    names: Vec<String>,
}

impl NodeIndex {
    /// Number every task of `tasks` after the start sentinel.
    ///
    /// Names in a `TaskSet` are unique and never a sentinel, so each task
    /// gets its own id.
    pub fn for_tasks(tasks: &TaskSet) -> Self {
        let n = tasks.len() + 1;
        let mut ids = FxHashMap::with_capacity_and_hasher(n, Default::default());
        let mut names = Vec::with_capacity(n);

        for name in std::iter::once(START).chain(tasks.names()) {
            ids.insert(name.to_string(), names.len() as NodeId);
            names.push(name.to_string());
        }
        Self { ids, names }
    }

    /// Id of a task name or `START`; `None` for anything the set does not hold.
    #[inline]
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Name of a node id handed out by this index.
    #[inline]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Ids of the tasks, sentinel excluded, in insertion order.
    pub fn task_ids(&self) -> impl Iterator<Item = NodeId> {
        1..self.names.len() as NodeId
    }

    /// Number of nodes, sentinel included.
    pub fn len(&self) -> usize {
        self.names.len()
    }
}
