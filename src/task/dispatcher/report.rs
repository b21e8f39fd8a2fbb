// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run report.

use serde::Serialize;

use crate::error::{EXIT_SUCCESS, EXIT_TASK_FAILED};
use crate::task::{ExecutionState, PublishTask, TaskId, TaskStatus};

/// Terminal state of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub id: TaskId,
    pub module: String,
    pub target: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

/// Every task of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub tasks: Vec<TaskReport>,
    pub aborted: bool,
}

impl RunReport {
    pub(crate) fn from_state(order: &[PublishTask], state: &ExecutionState, aborted: bool) -> Self {
        let tasks = order
            .iter()
            .map(|task| {
                let record = state.record(&task.id).unwrap_or_default();
                TaskReport {
                    id: task.id.clone(),
                    module: task.module().to_string(),
                    target: task.target.name.clone(),
                    status: record.status,
                    reason: record.reason,
                    duration_ms: u64::try_from(record.duration.as_millis()).unwrap_or(u64::MAX),
                }
            })
            .collect();
        Self { tasks, aborted }
    }

    /// Status of a task, if it was part of the run.
    #[must_use]
    pub fn status(&self, id: &str) -> Option<TaskStatus> {
        self.tasks
            .iter()
            .find(|t| t.id.as_str() == id)
            .map(|t| t.status)
    }

    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Whether every task succeeded and the run was not aborted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.aborted && self.tasks.iter().all(|t| t.status == TaskStatus::Succeeded)
    }

    /// `0` on full success, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            EXIT_SUCCESS
        } else {
            EXIT_TASK_FAILED
        }
    }

    /// One line per task plus a summary line.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let width = self.tasks.iter().map(|t| t.id.as_str().len()).max().unwrap_or(0);

        let mut lines: Vec<String> = self
            .tasks
            .iter()
            .map(|t| {
                let id = t.id.as_str();
                match &t.reason {
                    Some(reason) => format!("{id:<width$}  {:<9}  {reason}", t.status.name()),
                    None => format!("{id:<width$}  {}", t.status.name()),
                }
            })
            .collect();

        let mut summary = format!(
            "{} succeeded, {} failed, {} skipped",
            self.count(TaskStatus::Succeeded),
            self.count(TaskStatus::Failed),
            self.count(TaskStatus::Skipped)
        );
        if self.aborted {
            summary.push_str(" (aborted)");
        }
        lines.push(summary);
        lines
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
