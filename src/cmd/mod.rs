// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   publish, plan, list, config
//!
//! Workspace::load(config)
//!   layout  --> ModuleRegistry
//!   [[repositories]] --> RepositoryRegistry
//! ```

pub mod config;
pub mod list;
pub mod plan;
pub mod publish;


use crate::config::Config;
use crate::error::{GantryError, Result};
use crate::module::{LayoutRule, ModuleDefaults, ModuleRegistry};
use crate::repository::RepositoryRegistry;

/// Modules and repository targets of the configured workspace.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub modules: ModuleRegistry,
    pub repositories: RepositoryRegistry,
}

impl Workspace {
    /// Discovers modules and registers repository targets.
    ///
    /// # Errors
    ///
    /// Returns a [`GantryError`] for discovery failures, an unreadable
    /// version file, or an invalid repository entry.
    pub fn load(config: &Config) -> Result<Self> {
        let layout = &config.layout;
        let rule = LayoutRule::from_config(layout);
        let defaults =
            ModuleDefaults::from_config(layout, &layout.root).map_err(GantryError::from)?;
        let modules =
            ModuleRegistry::discover(&layout.root, &rule, &defaults).map_err(GantryError::from)?;
        let repositories =
            RepositoryRegistry::from_config(&config.repositories).map_err(GantryError::from)?;

        Ok(Self {
            modules,
            repositories,
        })
    }
}
