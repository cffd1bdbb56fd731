//! The ordered task collection

use crate::task::Task;

/// An ordered, index-addressable sequence that owns every task.
///
/// Indices are 0-based here; user-facing text is 1-based throughout, the conversion
/// happens at the command layer.
#[derive(Debug, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from already-loaded tasks, preserving their order
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Append a task at the end of the list
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the task at `index`, shifting every later task down by one.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds; callers validate first.
    pub fn delete(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Case-sensitive substring search over descriptions.
    ///
    /// Each match is returned with its original 0-based position in the full list, not
    /// renumbered relative to the match subset.
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description().contains(keyword))
            .collect()
    }
}
