// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gantry.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, LayoutConfig, PublishConfig
//! Aliases:      alias name  -> [module patterns]
//! Aggregations: owner name  -> AggregationConfig { members }
//! Repositories: [[repositories]] name, url, requires_auth
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Global configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Resolve and log every upload without sending anything.
    pub dry: bool,
}

/// Module layout configuration.
///
/// With an empty `directories` list the whole root is scanned for
/// `manifest` files. Otherwise only the listed directories are modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Root directory containing the modules.
    pub root: PathBuf,
    /// Manifest file name identifying a module directory.
    pub manifest: String,
    /// Explicit module directories, relative to `root`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<PathBuf>,
    /// Maximum scan depth below `root`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Directory names never entered while scanning.
    pub skip_dirs: Vec<String>,
    /// Default group for modules whose manifest has none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    /// Default version for modules whose manifest has none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// File holding the default version, relative to `root`.
    /// Ignored when `version` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_file: Option<PathBuf>,
    /// Default artifact patterns, relative to each module directory.
    pub artifacts: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: "module.toml".to_string(),
            directories: Vec::new(),
            max_depth: Some(4),
            skip_dirs: [
                "build",
                "target",
                "node_modules",
                ".git",
                ".gradle",
                ".hg",
                ".svn",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            group: String::new(),
            version: String::new(),
            version_file: None,
            artifacts: vec!["build/libs/*".to_string()],
        }
    }
}

/// Publish run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Maximum concurrent uploads (0 = available parallelism).
    pub jobs: usize,
    /// Prefix of the credential environment variables.
    pub credentials_env_prefix: String,
    /// Explicit ordering: module -> modules it publishes after.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub depends_on: BTreeMap<String, Vec<String>>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            credentials_env_prefix: "GANTRY_AUTH".to_string(),
            depends_on: BTreeMap::new(),
        }
    }
}

/// Module aliases mapping alias names to module patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;

/// Aggregation declared for an owner module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregationConfig {
    /// Modules whose artifacts the owner re-publishes.
    pub members: Vec<String>,
}

/// Remote repository target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Unique target name used on the command line.
    pub name: String,
    /// Base URL of the repository.
    pub url: String,
    /// Whether uploads need credentials.
    #[serde(default = "default_requires_auth")]
    pub requires_auth: bool,
}

const fn default_requires_auth() -> bool {
    true
}
