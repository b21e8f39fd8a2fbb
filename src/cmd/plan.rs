// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plan command implementation for gantry.

use crate::cli::publish::PlanArgs;
use crate::cmd::Workspace;
use crate::config::Config;
use crate::error::Result;
use crate::plan::build_plan;
use crate::task::PublishTask;

/// Prints the ordered publish tasks without running them.
///
/// # Errors
///
/// Returns an error for configuration, discovery, or task graph problems.
pub fn run_plan_command(args: &PlanArgs, config: &Config) -> Result<()> {
    let workspace = Workspace::load(config)?;
    let graph = build_plan(
        config,
        &workspace.modules,
        &workspace.repositories,
        &args.target,
        &args.modules,
    )?;

    for line in format_plan(&graph.build()?) {
        println!("{line}");
    }
    Ok(())
}

/// One numbered line per task.
///
/// ```text
/// 1. core:publish -> central
/// 2. aggregation:publish [+ core, solana-programs] -> central (after core:publish)
/// ```
#[must_use]
pub fn format_plan(order: &[PublishTask]) -> Vec<String> {
    order
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let mut line = format!("{}. {}", i + 1, task.id);

            let members: Vec<&str> = task.unit.member_names().collect();
            if !members.is_empty() {
                line.push_str(&format!(" [+ {}]", members.join(", ")));
            }

            line.push_str(&format!(" -> {}", task.target.name));

            if !task.depends_on.is_empty() {
                let deps: Vec<&str> = task.depends_on.iter().map(|d| d.as_str()).collect();
                line.push_str(&format!(" (after {})", deps.join(", ")));
            }
            line
        })
        .collect()
}
