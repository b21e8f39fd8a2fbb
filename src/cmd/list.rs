// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for gantry.

use crate::cli::publish::ListArgs;
use crate::cmd::Workspace;
use crate::config::Config;
use crate::error::{GantryError, Result};
use crate::module::ModuleRegistry;
use crate::repository::RepositoryRegistry;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if module discovery or repository registration fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let lines = if args.aliases {
        format_aliases(config)
    } else if args.targets {
        let repositories =
            RepositoryRegistry::from_config(&config.repositories).map_err(GantryError::from)?;
        format_targets(&repositories)
    } else {
        format_modules(&Workspace::load(config)?.modules)
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// `name = module, module` per alias.
#[must_use]
pub fn format_aliases(config: &Config) -> Vec<String> {
    if config.aliases.is_empty() {
        return vec!["No aliases defined".to_string()];
    }
    config
        .aliases
        .iter()
        .map(|(name, targets)| format!("{name} = {}", targets.join(", ")))
        .collect()
}

/// `name  url  (auth)` per target, in declaration order.
#[must_use]
pub fn format_targets(repositories: &RepositoryRegistry) -> Vec<String> {
    if repositories.is_empty() {
        return vec!["No repositories configured".to_string()];
    }
    let width = repositories.targets().map(|t| t.name.len()).max().unwrap_or(0);
    repositories
        .targets()
        .map(|t| {
            let auth = if t.requires_auth { "auth" } else { "anonymous" };
            format!("{:<width$}  {}  ({auth})", t.name, t.url)
        })
        .collect()
}

/// `name  group:version  path` per module, path relative to the root.
#[must_use]
pub fn format_modules(modules: &ModuleRegistry) -> Vec<String> {
    let width = modules.names().map(str::len).max().unwrap_or(0);
    modules
        .modules()
        .map(|m| {
            let path = m.path.strip_prefix(modules.root()).unwrap_or(&m.path);
            format!(
                "{:<width$}  {}:{}  {}",
                m.name,
                m.group,
                m.version,
                path.display()
            )
        })
        .collect()
}
