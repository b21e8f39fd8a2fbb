// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command implementation for gantry.
//!
//! ```text
//! Workspace::load --> build_plan --> PublishDispatcher::run
//!                                        |        ^
//!                                        |        +-- Ctrl+C cancels
//!                                        v
//!                          render report, --report JSON
//!                                        |
//!                          exit 0 (all succeeded) | 1
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::cli::publish::PublishArgs;
use crate::cmd::Workspace;
use crate::config::Config;
use crate::credentials::EnvCredentialProvider;
use crate::error::{FsError, GantryError, GantryResult, Result};
use crate::net::{HttpUploader, ProgressDisplay};
use crate::plan::build_plan;
use crate::task::dispatcher::{PublishDispatcher, RunReport};

/// Main handler for publish command.
///
/// Returns the process exit code of the run.
///
/// # Errors
///
/// Returns an error for configuration, discovery, or task graph problems,
/// all detected before the first upload, and when the report file cannot
/// be written.
pub async fn run_publish_command(args: &PublishArgs, config: &Config) -> Result<u8> {
    let progress = if args.progress {
        ProgressDisplay::Bar
    } else {
        ProgressDisplay::Silent
    };
    let jobs = args.jobs.map_or_else(|| config.jobs(), usize::from);

    let dispatcher = PublishDispatcher::new(
        Arc::new(HttpUploader::new().progress(progress)),
        Arc::new(EnvCredentialProvider::new(
            &config.publish.credentials_env_prefix,
        )),
    )
    .with_concurrency(jobs)
    .with_dry_run(config.global.dry);

    let cancel_token = dispatcher.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, skipping tasks that have not started...");
            cancel_token.cancel();
        }
    });

    let report = publish_modules(config, &args.target, &args.modules, &dispatcher).await?;

    for line in report.render() {
        println!("{line}");
    }

    if let Some(path) = &args.report {
        write_report(&report, path).await?;
    }

    Ok(report.exit_code())
}

/// Writes the run report as JSON.
///
/// Runs after uploads, so failures are never configuration errors.
///
/// # Errors
///
/// Returns `GantryError::Other` if the report cannot be serialized and
/// `GantryError::Fs` if the file cannot be written.
pub async fn write_report(report: &RunReport, path: &Path) -> GantryResult<()> {
    let json = report
        .to_json()
        .map_err(|e| GantryError::Other(format!("failed to serialize run report: {e}").into()))?;
    tokio::fs::write(path, json).await.map_err(|source| {
        GantryError::from(FsError::IoError {
            path: path.display().to_string(),
            source,
        })
    })?;
    tracing::info!(path = %path.display(), "wrote run report");
    Ok(())
}

/// Discovers the workspace, plans, and runs the publish tasks.
///
/// # Errors
///
/// Returns an error for configuration, discovery, or task graph problems.
pub async fn publish_modules(
    config: &Config,
    target: &str,
    modules: &[String],
    dispatcher: &PublishDispatcher,
) -> Result<RunReport> {
    let workspace = Workspace::load(config)?;
    let graph = build_plan(
        config,
        &workspace.modules,
        &workspace.repositories,
        target,
        modules,
    )?;
    Ok(dispatcher.run(&graph).await?)
}
