// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gantry.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. --ini files (in order)
//! 3. gantry.toml (cwd, optional)
//! 4. GANTRY__* env vars
//! 5. --set / CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GANTRY__GLOBAL__DRY=true        → global.dry = true
//! GANTRY__LAYOUT__ROOT=/path      → layout.root = "/path"
//! GANTRY__PUBLISH__JOBS=2         → publish.jobs = 2
//! ```
//!
//! # Example
//!
//! ```toml
//! [layout]
//! group = "software.sava"
//! version_file = "gradle/version"
//!
//! [aliases]
//! github-packages = ["solana-programs"]
//!
//! [aggregations.aggregation]
//! members = ["solana-programs"]
//!
//! [[repositories]]
//! name = "central"
//! url = "https://central.example.org/maven2"
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{AggregationConfig, Aliases, GlobalConfig, LayoutConfig, PublishConfig, RepositoryConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Module layout.
    pub layout: LayoutConfig,
    /// Publish run options.
    pub publish: PublishConfig,
    /// Module aliases.
    pub aliases: Aliases,
    /// Aggregations keyed by owner module.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregations: BTreeMap<String, AggregationConfig>,
    /// Remote repository targets, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<RepositoryConfig>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gantry::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("config/default.toml")
    ///     .add_toml_file_optional("gantry.toml")
    ///     .with_env_prefix("GANTRY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Effective upload concurrency.
    ///
    /// `publish.jobs = 0` means one upload per available core.
    #[must_use]
    pub fn jobs(&self) -> usize {
        if self.publish.jobs > 0 {
            return self.publish.jobs;
        }
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4)
    }

    /// Validate values that deserialization alone cannot check.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an empty manifest name, a nameless
    /// repository, or an empty alias.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.layout.manifest.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "layout".to_string(),
                key: "manifest".to_string(),
                message: "manifest file name must not be empty".to_string(),
            }
            .into());
        }

        for repository in &self.repositories {
            if repository.name.trim().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "repositories".to_string(),
                    key: "name".to_string(),
                }
                .into());
            }
        }

        for (alias, targets) in &self.aliases {
            if targets.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "aliases".to_string(),
                    key: alias.clone(),
                    message: "alias must name at least one module".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_layout_options(&mut options);
        self.format_publish_options(&mut options);
        self.format_aggregation_options(&mut options);
        self.format_repository_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
    }

    fn format_layout_options(&self, options: &mut BTreeMap<String, String>) {
        let layout = &self.layout;
        options.insert("layout.root".into(), layout.root.display().to_string());
        options.insert("layout.manifest".into(), layout.manifest.clone());
        if !layout.directories.is_empty() {
            let dirs: Vec<String> = layout
                .directories
                .iter()
                .map(|d| d.display().to_string())
                .collect();
            options.insert("layout.directories".into(), dirs.join(", "));
        }
        options.insert(
            "layout.max_depth".into(),
            layout
                .max_depth
                .map_or_else(|| "unlimited".to_string(), |d| d.to_string()),
        );
        options.insert("layout.skip_dirs".into(), layout.skip_dirs.join(", "));
        options.insert("layout.group".into(), layout.group.clone());
        options.insert("layout.version".into(), layout.version.clone());
        if let Some(file) = &layout.version_file {
            options.insert("layout.version_file".into(), file.display().to_string());
        }
        options.insert("layout.artifacts".into(), layout.artifacts.join(", "));
    }

    fn format_publish_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("publish.jobs".into(), self.publish.jobs.to_string());
        options.insert(
            "publish.credentials_env_prefix".into(),
            self.publish.credentials_env_prefix.clone(),
        );
        for (module, deps) in &self.publish.depends_on {
            options.insert(format!("publish.depends_on.{module}"), deps.join(", "));
        }
    }

    fn format_aggregation_options(&self, options: &mut BTreeMap<String, String>) {
        for (owner, aggregation) in &self.aggregations {
            options.insert(
                format!("aggregations.{owner}.members"),
                aggregation.members.join(", "),
            );
        }
    }

    fn format_repository_options(&self, options: &mut BTreeMap<String, String>) {
        for repository in &self.repositories {
            let auth = if repository.requires_auth {
                "auth"
            } else {
                "anonymous"
            };
            options.insert(
                format!("repositories.{}", repository.name),
                format!("{} ({auth})", repository.url),
            );
        }
    }
}
