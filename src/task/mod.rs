// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish tasks and their execution state.
//!
//! # Architecture
//!
//! ```text
//! plan --> TaskGraph::add_task(PublishTask)
//!              |
//!          build() --> topological order (declaration order tie-break)
//!              |
//!              v
//!     PublishDispatcher::run
//!        JoinSet + Semaphore + CancellationToken
//!              |
//!        ExecutionState (Mutex<id -> TaskRecord>)
//!              |
//!              v
//!          RunReport
//! ```
//!
//! # State machine
//!
//! ```text
//! Pending --> Running --> Succeeded
//!    |           +------> Failed
//!    |           +------> Skipped
//!    +-------------------> Skipped
//! ```

pub mod dispatcher;
pub mod graph;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::error::TaskError;
use crate::publication::PublicationUnit;
use crate::repository::RepositoryTarget;

/// Task identifier, `<module>:publish` for planned tasks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The publish task id for a module.
    #[must_use]
    pub fn publish(module: &str) -> Self {
        Self(format!("{module}:publish"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One publish operation: a unit sent to a target.
///
/// Cheap to clone; the target and unit are shared.
#[derive(Debug, Clone)]
pub struct PublishTask {
    pub id: TaskId,
    pub depends_on: BTreeSet<TaskId>,
    pub target: Arc<RepositoryTarget>,
    pub unit: Arc<PublicationUnit>,
}

impl PublishTask {
    pub fn new(
        id: impl Into<TaskId>,
        target: Arc<RepositoryTarget>,
        unit: Arc<PublicationUnit>,
    ) -> Self {
        Self {
            id: id.into(),
            depends_on: BTreeSet::new(),
            target,
            unit,
        }
    }

    /// Adds a dependency.
    #[must_use]
    pub fn depends_on(mut self, id: impl Into<TaskId>) -> Self {
        self.depends_on.insert(id.into());
        self
    }

    /// Name of the module owning the unit.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.unit.owner().name
    }
}

/// Lifecycle state of a task within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

impl TaskStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Skipped)
    }

    /// Whether `self -> to` is a legal transition.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Running | Self::Skipped)
                | (Self::Running, Self::Succeeded | Self::Failed | Self::Skipped)
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status, reason, and timing of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub reason: Option<String>,
    pub duration: Duration,
}

impl Default for TaskRecord {
    fn default() -> Self {
        Self {
            status: TaskStatus::Pending,
            reason: None,
            duration: Duration::ZERO,
        }
    }
}

/// Status table shared between the coordinator and workers.
#[derive(Debug, Default)]
pub struct ExecutionState {
    records: Mutex<BTreeMap<TaskId, TaskRecord>>,
}

impl ExecutionState {
    /// Creates a table with every task `Pending`.
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a TaskId>) -> Self {
        let records = ids
            .into_iter()
            .map(|id| (id.clone(), TaskRecord::default()))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<TaskId, TaskRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn status(&self, id: &TaskId) -> Option<TaskStatus> {
        self.lock().get(id).map(|r| r.status)
    }

    #[must_use]
    pub fn record(&self, id: &TaskId) -> Option<TaskRecord> {
        self.lock().get(id).cloned()
    }

    /// Moves a task to `to`, recording an optional reason.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` for an unknown id and
    /// `TaskError::InvalidTransition` for an illegal move.
    pub fn transition(
        &self,
        id: &TaskId,
        to: TaskStatus,
        reason: Option<String>,
    ) -> Result<(), TaskError> {
        let mut records = self.lock();
        let record = records
            .get_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        if !record.status.can_transition(to) {
            return Err(TaskError::InvalidTransition {
                task: id.to_string(),
                from: record.status.to_string(),
                to: to.to_string(),
            });
        }

        record.status = to;
        if reason.is_some() {
            record.reason = reason;
        }
        Ok(())
    }

    /// Records how long a task ran.
    pub fn set_duration(&self, id: &TaskId, duration: Duration) {
        if let Some(record) = self.lock().get_mut(id) {
            record.duration = duration;
        }
    }
}
