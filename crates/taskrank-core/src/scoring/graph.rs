//! Dependency relationships within one batch.
//!
//! Built once per batch and shared by every task scored against it. Edges
//! point from a task to the ids it depends on.

use std::collections::{HashMap, HashSet};

use crate::task::{TaskId, TaskRecord};

/// Id-indexed view of a batch.
#[derive(Debug, Default)]
pub struct DependencyGraph<'a> {
    by_id: HashMap<&'a TaskId, &'a TaskRecord>,
    /// Every id that appears in some record's dependency list.
    depended_on: HashSet<&'a TaskId>,
}

impl<'a> DependencyGraph<'a> {
    /// Index a batch.
    ///
    /// When two records share an id the first one wins for edge lookups.
    /// Records without an id still contribute their dependency lists.
    pub fn build(tasks: &'a [TaskRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(tasks.len());
        let mut depended_on = HashSet::new();

        for task in tasks {
            if let Some(id) = &task.id {
                by_id.entry(id).or_insert(task);
            }
            depended_on.extend(task.dependencies.iter());
        }

        Self { by_id, depended_on }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&'a TaskRecord> {
        self.by_id.get(id).copied()
    }

    /// Outgoing edges of `id`. Unknown ids are dead ends.
    pub fn dependencies_of(&self, id: &TaskId) -> &'a [TaskId] {
        match self.by_id.get(id) {
            Some(task) => task.dependencies.as_slice(),
            None => &[],
        }
    }

    /// Whether any record in the batch lists `id` as a dependency.
    ///
    /// A task that lists itself counts.
    pub fn blocks_others(&self, id: &TaskId) -> bool {
        self.depended_on.contains(id)
    }

    /// Whether a depth-first walk from `start` meets a back-edge.
    ///
    /// State is fresh on every call. A dependency that is already on the
    /// current path closes a cycle; one that was fully explored earlier in
    /// this walk is skipped.
    pub fn in_cycle(&self, start: &TaskId) -> bool {
        let mut visited: HashSet<&TaskId> = HashSet::new();
        let mut on_path: HashSet<&TaskId> = HashSet::new();
        // (task id, index of the next dependency to follow)
        let mut stack: Vec<(&TaskId, usize)> = vec![(start, 0)];
        visited.insert(start);
        on_path.insert(start);

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            match self.dependencies_of(current).get(cursor) {
                Some(dep) => {
                    frame.1 += 1;
                    if on_path.contains(dep) {
                        return true;
                    }
                    if visited.insert(dep) {
                        on_path.insert(dep);
                        stack.push((dep, 0));
                    }
                }
                None => {
                    on_path.remove(current);
                    stack.pop();
                }
            }
        }

        false
    }
}
