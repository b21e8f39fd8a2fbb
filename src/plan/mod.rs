// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish planning.
//!
//! ```text
//! Config + ModuleRegistry + RepositoryRegistry + target + --module specs
//!    |
//!    |  resolve target             --> UnknownTarget
//!    |  validate aggregations      --> InvalidAggregation
//!    |  validate publish.depends_on --> UnknownModule
//!    |  select modules             --> UnknownModule
//!    v
//! one task per selected module, name order
//!   id        <module>:publish
//!   unit      owner + [aggregations.<module>] members
//!             without members that have their own task
//!   depends   member tasks in the plan
//!             + publish.depends_on entries in the plan
//!    |
//!    v
//! TaskGraph
//! ```

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{ConfigError, GantryResult};
use crate::module::ModuleRegistry;
use crate::module::selector::ModuleSelector;
use crate::publication::{PublicationAggregator, PublicationUnit};
use crate::repository::RepositoryRegistry;
use crate::task::graph::TaskGraph;
use crate::task::{PublishTask, TaskId};

/// Builds the task graph for publishing `selection` to `target`.
///
/// An empty selection publishes every module.
///
/// # Errors
///
/// Returns a `ConfigError` for an unknown target, an invalid aggregation,
/// an unknown module in `publish.depends_on` or in the selection. Task graph
/// errors are reported by [`TaskGraph::build`].
pub fn build_plan(
    config: &Config,
    modules: &ModuleRegistry,
    repositories: &RepositoryRegistry,
    target: &str,
    selection: &[String],
) -> GantryResult<TaskGraph> {
    let target = repositories.resolve(target)?;
    let units = aggregate_units(config, modules)?;
    validate_depends_on(&config.publish.depends_on, modules)?;

    let selected = ModuleSelector::new(modules, &config.aliases).resolve(selection)?;

    let mut graph = TaskGraph::new();
    for name in &selected {
        let aggregated = match units.get(name.as_str()) {
            Some(unit) => Arc::clone(unit),
            None => {
                let Some(module) = modules.get(name) else {
                    return Err(ConfigError::UnknownModule { name: name.clone() }.into());
                };
                Arc::new(PublicationUnit::single(Arc::clone(module)))
            }
        };

        let explicit = config
            .publish
            .depends_on
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let depends_on: Vec<TaskId> = aggregated
            .member_names()
            .chain(explicit.iter().map(String::as_str))
            .filter(|dep| selected.contains(*dep))
            .map(TaskId::publish)
            .collect();

        // Members with their own task upload their files there
        let unit = if aggregated.member_names().any(|m| selected.contains(m)) {
            Arc::new(aggregated.excluding(|m| selected.contains(m)))
        } else {
            aggregated
        };

        let mut task = PublishTask::new(TaskId::publish(name), Arc::clone(&target), unit);
        for dep in depends_on {
            task = task.depends_on(dep);
        }

        tracing::debug!(
            task = %task.id,
            depends_on = task.depends_on.len(),
            "planned task"
        );
        graph.add_task(task)?;
    }

    tracing::info!(
        target_name = %target.name,
        tasks = graph.len(),
        "publish plan ready"
    );
    Ok(graph)
}

/// Units for every configured aggregation, keyed by owner.
fn aggregate_units<'a>(
    config: &'a Config,
    modules: &ModuleRegistry,
) -> Result<BTreeMap<&'a str, Arc<PublicationUnit>>, ConfigError> {
    let aggregator = PublicationAggregator::new(modules);
    config
        .aggregations
        .iter()
        .map(|(owner, aggregation)| {
            aggregator
                .aggregate(owner, &aggregation.members)
                .map(|unit| (owner.as_str(), Arc::new(unit)))
        })
        .collect()
}

fn validate_depends_on(
    depends_on: &BTreeMap<String, Vec<String>>,
    modules: &ModuleRegistry,
) -> Result<(), ConfigError> {
    let unknown: BTreeSet<&String> = depends_on
        .iter()
        .flat_map(|(module, deps)| std::iter::once(module).chain(deps))
        .filter(|name| !modules.contains(name))
        .collect();

    match unknown.first() {
        Some(name) => Err(ConfigError::UnknownModule {
            name: (*name).clone(),
        }),
        None => Ok(()),
    }
}
