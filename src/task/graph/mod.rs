// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency ordering of publish tasks.
//!
//! ```text
//! add_task(a) add_task(b -> a) add_task(c)
//!        |
//!    build():  unknown deps?  --> TaskError::UnknownDependency
//!              Kahn, ready set ordered by declaration index
//!              leftover tasks --> ConfigError::CyclicDependency (a -> b -> a)
//!        |
//!        v
//!    [a, b, c]
//! ```

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use super::{PublishTask, TaskId};
use crate::error::{ConfigError, GantryResult, TaskError};

/// Owns the publish tasks of a run.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<PublishTask>,
    index: BTreeMap<TaskId, usize>,
}

impl TaskGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task. Declaration order breaks ties in [`Self::build`].
    ///
    /// # Errors
    ///
    /// Returns `TaskError::DuplicateTask` if the id is already present.
    pub fn add_task(&mut self, task: PublishTask) -> Result<(), TaskError> {
        if self.index.contains_key(&task.id) {
            return Err(TaskError::DuplicateTask(task.id.to_string()));
        }
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&PublishTask> {
        self.index.get(id).map(|&i| &self.tasks[i])
    }

    /// Tasks in declaration order.
    #[must_use]
    pub fn tasks(&self) -> &[PublishTask] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Orders the tasks so every task follows all of its dependencies.
    ///
    /// Among tasks that are ready at the same time, the one added first
    /// comes first. The graph is not modified, so repeated calls return the
    /// same order.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::UnknownDependency` for a dependency that was never
    /// added and `ConfigError::CyclicDependency` naming one cycle.
    pub fn build(&self) -> GantryResult<Vec<PublishTask>> {
        let mut in_degree = vec![0usize; self.tasks.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.tasks.len()];

        for (i, task) in self.tasks.iter().enumerate() {
            for dep in &task.depends_on {
                let Some(&d) = self.index.get(dep) else {
                    return Err(TaskError::UnknownDependency {
                        task: task.id.to_string(),
                        dependency: dep.to_string(),
                    }
                    .into());
                };
                in_degree[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(i, _)| i)
            .collect();
        let mut order = Vec::with_capacity(self.tasks.len());

        while let Some(i) = ready.pop_first() {
            order.push(i);
            for &next in &dependents[i] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        if order.len() < self.tasks.len() {
            let remaining: BTreeSet<usize> = (0..self.tasks.len())
                .filter(|i| in_degree[*i] > 0)
                .collect();
            return Err(ConfigError::CyclicDependency {
                cycle: self.find_cycle(&remaining),
            }
            .into());
        }

        Ok(order.into_iter().map(|i| self.tasks[i].clone()).collect())
    }

    /// Follows dependencies among `remaining` until a task repeats.
    ///
    /// Every remaining task still waits on another remaining task, so the
    /// walk always closes a cycle.
    fn find_cycle(&self, remaining: &BTreeSet<usize>) -> Vec<String> {
        let Some(&start) = remaining.first() else {
            return Vec::new();
        };

        let mut path = vec![start];
        let mut position = BTreeMap::from([(start, 0usize)]);
        let mut current = start;

        loop {
            let next = self.tasks[current]
                .depends_on
                .iter()
                .filter_map(|dep| self.index.get(dep).copied())
                .find(|d| remaining.contains(d));

            let Some(next) = next else {
                break;
            };

            if let Some(&at) = position.get(&next) {
                let mut cycle: Vec<String> = path[at..]
                    .iter()
                    .map(|&i| self.tasks[i].id.to_string())
                    .collect();
                cycle.push(self.tasks[next].id.to_string());
                return cycle;
            }

            position.insert(next, path.len());
            path.push(next);
            current = next;
        }

        path.iter().map(|&i| self.tasks[i].id.to_string()).collect()
    }
}
