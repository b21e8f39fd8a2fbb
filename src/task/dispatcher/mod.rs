// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish dispatcher.
//!
//! ```text
//! PublishDispatcher::new(uploader, credentials)
//!   .with_concurrency(n) .with_dry_run() .with_cancel_token()
//!   .run(&graph).await
//!
//! run loop
//!   order = graph.build()                 (errors before any upload)
//!   pending tasks, in order:
//!     dependency failed/skipped  --> Skipped
//!     dependencies succeeded     --> Running, spawned on JoinSet
//!                                    (needs a semaphore permit)
//!   select! { cancelled  --> every Pending task Skipped ("run aborted")
//!             join_next  --> Succeeded | Failed }
//!
//! execute(task)
//!   collect artifacts --> credentials --> upload (or log in dry run)
//! ```

pub mod report;


use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::graph::TaskGraph;
use super::{ExecutionState, PublishTask, TaskId, TaskStatus};
use crate::credentials::CredentialProvider;
use crate::error::{GantryResult, PublishError};
use crate::net::ArtifactUploader;

pub use report::{RunReport, TaskReport};

/// Reason recorded for tasks skipped by cancellation.
pub const ABORTED_REASON: &str = "run aborted";

/// Outcome of executing one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    Success,
    Failure(String),
}

impl PublishResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<PublishError> for PublishResult {
    fn from(err: PublishError) -> Self {
        Self::Failure(err.to_string())
    }
}

/// Executes publish tasks against their targets.
///
/// Clones share the uploader, credential provider, semaphore, and
/// cancellation token.
#[derive(Clone)]
pub struct PublishDispatcher {
    uploader: Arc<dyn ArtifactUploader>,
    credentials: Arc<dyn CredentialProvider>,
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
    dry_run: bool,
}

impl PublishDispatcher {
    /// Creates a dispatcher with one permit per available core.
    #[must_use]
    pub fn new(
        uploader: Arc<dyn ArtifactUploader>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let max_concurrent = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4);
        Self {
            uploader,
            credentials,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            cancel_token: CancellationToken::new(),
            dry_run: false,
        }
    }

    /// Limits concurrent uploads. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Uses an externally owned cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Returns the cancellation token for sharing with signal handlers.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Requests cancellation of the current run.
    pub fn interrupt(&self) {
        info!("interrupting publish run");
        self.cancel_token.cancel();
    }

    /// Publishes one task's unit to its target.
    ///
    /// Never panics and never retries; every problem becomes a
    /// [`PublishResult::Failure`].
    pub async fn execute(&self, task: &PublishTask) -> PublishResult {
        let unit = Arc::clone(&task.unit);
        let artifacts = match tokio::task::spawn_blocking(move || unit.collect_artifacts()).await
        {
            Ok(Ok(artifacts)) => artifacts,
            Ok(Err(e)) => return e.into(),
            Err(e) => return PublishResult::Failure(format!("artifact collection panicked: {e}")),
        };

        if artifacts.is_empty() {
            return PublishError::NoArtifacts {
                unit: task.module().to_string(),
            }
            .into();
        }

        let target = &task.target;
        let credentials = if target.requires_auth {
            match self.credentials.get(&target.name) {
                Some(credentials) => Some(credentials),
                None => {
                    return PublishError::NoCredentials {
                        target: target.name.clone(),
                    }
                    .into();
                }
            }
        } else {
            None
        };

        if self.dry_run {
            for artifact in &artifacts {
                info!(
                    task = %task.id,
                    url = %target.file_url(&artifact.remote_path),
                    file = %artifact.local_path.display(),
                    "[DRY-RUN] would upload"
                );
            }
            return PublishResult::Success;
        }

        debug!(task = %task.id, count = artifacts.len(), url = %target.url, "uploading");
        match self
            .uploader
            .upload(target, credentials.as_ref(), &artifacts)
            .await
        {
            Ok(()) => PublishResult::Success,
            Err(e) => PublishError::from(e).into(),
        }
    }

    /// Runs every task of `graph` in dependency order.
    ///
    /// Failures are isolated per task: dependents of a failed or skipped
    /// task are skipped, independent tasks continue.
    ///
    /// # Errors
    ///
    /// Returns the graph error (cycle, unknown dependency) before anything
    /// is executed.
    pub async fn run(&self, graph: &TaskGraph) -> GantryResult<RunReport> {
        let order = graph.build()?;
        let state = Arc::new(ExecutionState::new(order.iter().map(|t| &t.id)));

        info!(task_count = order.len(), dry_run = self.dry_run, "starting publish run");

        let mut pending: Vec<PublishTask> = order.clone();
        let mut running: HashMap<tokio::task::Id, TaskId> = HashMap::new();
        let mut set: JoinSet<(TaskId, PublishResult, Duration)> = JoinSet::new();
        let mut aborted = false;

        loop {
            if self.cancel_token.is_cancelled() && !aborted {
                aborted = true;
                for task in pending.drain(..) {
                    self.finish(&state, &task.id, TaskStatus::Skipped, Some(ABORTED_REASON));
                }
                warn!(running = running.len(), "publish run aborted");
            }

            self.start_ready(&state, &mut pending, &mut set, &mut running);

            if set.is_empty() {
                // Nothing running means no pending task can become ready
                for task in pending.drain(..) {
                    self.finish(
                        &state,
                        &task.id,
                        TaskStatus::Skipped,
                        Some("dependencies never finished"),
                    );
                }
                break;
            }

            tokio::select! {
                biased;
                () = self.cancel_token.cancelled(), if !aborted => {}
                Some(joined) = set.join_next_with_id() => match joined {
                    Ok((task_id, (id, result, elapsed))) => {
                        running.remove(&task_id);
                        state.set_duration(&id, elapsed);
                        match result {
                            PublishResult::Success => {
                                self.finish(&state, &id, TaskStatus::Succeeded, None);
                            }
                            PublishResult::Failure(reason) => {
                                self.finish(&state, &id, TaskStatus::Failed, Some(&reason));
                            }
                        }
                    }
                    Err(e) => {
                        if let Some(id) = running.remove(&e.id()) {
                            let reason = format!("task panicked: {e}");
                            self.finish(&state, &id, TaskStatus::Failed, Some(&reason));
                        }
                    }
                },
            }
        }

        let report = RunReport::from_state(&order, &state, aborted);
        info!(
            succeeded = report.count(TaskStatus::Succeeded),
            failed = report.count(TaskStatus::Failed),
            skipped = report.count(TaskStatus::Skipped),
            aborted,
            "publish run finished"
        );
        Ok(report)
    }

    /// Skips tasks behind a failure and spawns tasks whose dependencies
    /// all succeeded, as long as permits are available.
    ///
    /// Repeats until a pass changes nothing, so skips cascade in one call.
    fn start_ready(
        &self,
        state: &Arc<ExecutionState>,
        pending: &mut Vec<PublishTask>,
        set: &mut JoinSet<(TaskId, PublishResult, Duration)>,
        running: &mut HashMap<tokio::task::Id, TaskId>,
    ) {
        loop {
            let mut changed = false;
            let mut index = 0;

            while index < pending.len() {
                let task = &pending[index];
                match dependency_state(state, task) {
                    Readiness::Blocked(dep, status) => {
                        let reason = format!("dependency '{dep}' {status}");
                        self.finish(state, &task.id, TaskStatus::Skipped, Some(&reason));
                        pending.remove(index);
                        changed = true;
                    }
                    Readiness::Ready => {
                        let Ok(permit) = Arc::clone(&self.semaphore).try_acquire_owned() else {
                            return;
                        };
                        let task = pending.remove(index);
                        if let Err(e) = state.transition(&task.id, TaskStatus::Running, None) {
                            warn!(task = %task.id, error = %e, "cannot start task");
                            continue;
                        }
                        info!(task = %task.id, status = %TaskStatus::Running, "starting task");

                        let dispatcher = self.clone();
                        let id = task.id.clone();
                        let handle = set.spawn(async move {
                            let _permit = permit;
                            let started = Instant::now();
                            let result = dispatcher.execute(&task).await;
                            (task.id, result, started.elapsed())
                        });
                        running.insert(handle.id(), id);
                        changed = true;
                    }
                    Readiness::Waiting => index += 1,
                }
            }

            if !changed {
                return;
            }
        }
    }

    fn finish(&self, state: &ExecutionState, id: &TaskId, to: TaskStatus, reason: Option<&str>) {
        if let Err(e) = state.transition(id, to, reason.map(str::to_string)) {
            warn!(task = %id, error = %e, "ignored task transition");
            return;
        }
        match (to, reason) {
            (TaskStatus::Succeeded, _) => info!(task = %id, status = %to, "task finished"),
            (_, Some(reason)) => warn!(task = %id, status = %to, reason, "task finished"),
            (_, None) => warn!(task = %id, status = %to, "task finished"),
        }
    }
}

enum Readiness {
    Ready,
    Waiting,
    Blocked(TaskId, TaskStatus),
}

fn dependency_state(state: &ExecutionState, task: &PublishTask) -> Readiness {
    let mut ready = true;
    for dep in &task.depends_on {
        match state.status(dep) {
            Some(status @ (TaskStatus::Failed | TaskStatus::Skipped)) => {
                return Readiness::Blocked(dep.clone(), status);
            }
            Some(TaskStatus::Succeeded) => {}
            _ => ready = false,
        }
    }
    if ready {
        Readiness::Ready
    } else {
        Readiness::Waiting
    }
}
