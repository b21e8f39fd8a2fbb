// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module discovery.
//!
//! ```text
//! LayoutConfig --> LayoutRule + ModuleDefaults
//!                        |
//!   ModuleRegistry::discover(root)
//!     Scan:     walk root --> every <dir>/module.toml (root excluded)
//!     Explicit: root/<dir>/module.toml for each listed dir
//!                        |
//!              manifest + defaults --> ModuleDescriptor
//!                        |
//!        BTreeMap<name, Arc<ModuleDescriptor>>  (name order)
//! ```

pub mod manifest;
pub mod selector;


use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::types::LayoutConfig;
use crate::error::{ConfigError, DiscoveryError};
use crate::utility::fs::walk::{WalkOptions, find_named_files};

use manifest::ModuleManifest;

/// A discovered sub-project.
///
/// Immutable after discovery and shared as `Arc<ModuleDescriptor>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Unique module name.
    pub name: String,
    /// Module directory.
    pub path: PathBuf,
    /// Publication group, e.g. `software.sava`.
    pub group: String,
    /// Publication version.
    pub version: String,
    /// Artifact glob patterns relative to `path`.
    pub artifacts: Vec<String>,
}

impl ModuleDescriptor {
    /// Group as a repository path, `software.sava` -> `software/sava`.
    #[must_use]
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

/// How module directories are recognised below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRule {
    /// Every directory containing `manifest` is a module.
    Scan {
        manifest: String,
        max_depth: Option<usize>,
        skip_dirs: Vec<String>,
    },
    /// Only the listed directories are modules.
    Explicit {
        manifest: String,
        directories: Vec<PathBuf>,
    },
}

impl LayoutRule {
    /// Builds the rule from the `[layout]` section.
    #[must_use]
    pub fn from_config(layout: &LayoutConfig) -> Self {
        if layout.directories.is_empty() {
            Self::Scan {
                manifest: layout.manifest.clone(),
                max_depth: layout.max_depth,
                skip_dirs: layout.skip_dirs.clone(),
            }
        } else {
            Self::Explicit {
                manifest: layout.manifest.clone(),
                directories: layout.directories.clone(),
            }
        }
    }

    /// Manifest file name for this rule.
    #[must_use]
    pub fn manifest(&self) -> &str {
        match self {
            Self::Scan { manifest, .. } | Self::Explicit { manifest, .. } => manifest,
        }
    }
}

/// Values used when a manifest leaves a field out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDefaults {
    pub group: String,
    pub version: String,
    pub artifacts: Vec<String>,
}

impl ModuleDefaults {
    /// Builds the defaults from the `[layout]` section.
    ///
    /// `version_file` is resolved against `root` and only read when
    /// `version` is empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the version file cannot be read.
    pub fn from_config(layout: &LayoutConfig, root: &Path) -> Result<Self, ConfigError> {
        let version = match (&layout.version_file, layout.version.is_empty()) {
            (Some(file), true) => {
                let path = root.join(file);
                let content =
                    std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
                        path: path.display().to_string(),
                        source,
                    })?;
                content.trim().to_string()
            }
            _ => layout.version.clone(),
        };

        Ok(Self {
            group: layout.group.clone(),
            version,
            artifacts: layout.artifacts.clone(),
        })
    }
}

/// Set of discovered modules, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    root: PathBuf,
    modules: BTreeMap<String, Arc<ModuleDescriptor>>,
}

impl ModuleRegistry {
    /// Discovers every module below `root`.
    ///
    /// Traversal is read-only.
    ///
    /// # Errors
    ///
    /// Returns a `DiscoveryError` if the root does not exist, nothing was
    /// found, a listed directory has no manifest, a manifest is invalid, a
    /// module has no group or version, or two modules share a name.
    pub fn discover(
        root: &Path,
        rule: &LayoutRule,
        defaults: &ModuleDefaults,
    ) -> Result<Self, DiscoveryError> {
        if !root.is_dir() {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let manifests = match rule {
            LayoutRule::Scan {
                manifest,
                max_depth,
                skip_dirs,
            } => scan_manifests(root, manifest, *max_depth, skip_dirs)?,
            LayoutRule::Explicit {
                manifest,
                directories,
            } => explicit_manifests(root, manifest, directories)?,
        };

        let mut registry = Self {
            root: root.to_path_buf(),
            modules: BTreeMap::new(),
        };
        for manifest_path in manifests {
            let descriptor = load_descriptor(&manifest_path, defaults)?;
            registry.insert(descriptor)?;
        }

        if registry.is_empty() {
            return Err(DiscoveryError::NoModules {
                root: root.to_path_buf(),
            });
        }

        info!(
            root = %root.display(),
            count = registry.len(),
            "discovered modules"
        );
        Ok(registry)
    }

    /// Builds a registry from already known descriptors.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::DuplicateModule` if two descriptors share a
    /// name.
    pub fn from_descriptors(
        root: impl Into<PathBuf>,
        descriptors: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<Self, DiscoveryError> {
        let mut registry = Self {
            root: root.into(),
            modules: BTreeMap::new(),
        };
        for descriptor in descriptors {
            registry.insert(descriptor)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, descriptor: ModuleDescriptor) -> Result<(), DiscoveryError> {
        match self.modules.entry(descriptor.name.clone()) {
            Entry::Occupied(existing) => Err(DiscoveryError::DuplicateModule {
                name: descriptor.name,
                first: existing.get().path.clone(),
                second: descriptor.path,
            }),
            Entry::Vacant(slot) => {
                debug!(
                    module = %descriptor.name,
                    path = %descriptor.path.display(),
                    version = %descriptor.version,
                    "registered module"
                );
                slot.insert(Arc::new(descriptor));
                Ok(())
            }
        }
    }

    /// Root the modules were discovered under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up a module by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ModuleDescriptor>> {
        self.modules.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// All modules in name order.
    pub fn modules(&self) -> impl Iterator<Item = &Arc<ModuleDescriptor>> {
        self.modules.values()
    }

    /// All module names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn scan_manifests(
    root: &Path,
    manifest: &str,
    max_depth: Option<usize>,
    skip_dirs: &[String],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let options = WalkOptions::builder()
        .maybe_with_max_depth(max_depth)
        .with_skip_dirs(skip_dirs.to_vec())
        .build();

    let found =
        find_named_files(root, manifest, &options).map_err(|e| DiscoveryError::WalkFailed {
            root: root.to_path_buf(),
            message: format!("{e:#}"),
        })?;

    // A manifest directly in the root describes the workspace, not a module
    Ok(found
        .into_iter()
        .filter(|path| path.parent().is_some_and(|dir| dir != root))
        .collect())
}

fn explicit_manifests(
    root: &Path,
    manifest: &str,
    directories: &[PathBuf],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    directories
        .iter()
        .map(|dir| {
            let dir = root.join(dir);
            let path = dir.join(manifest);
            if path.is_file() {
                Ok(path)
            } else {
                Err(DiscoveryError::MissingManifest {
                    dir,
                    manifest: manifest.to_string(),
                })
            }
        })
        .collect()
}

fn load_descriptor(
    manifest_path: &Path,
    defaults: &ModuleDefaults,
) -> Result<ModuleDescriptor, DiscoveryError> {
    let section = ModuleManifest::load(manifest_path)?.module;
    let dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let name = match section.name {
        Some(name) => name,
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if name.trim().is_empty() {
        return Err(missing_field(manifest_path, "name"));
    }

    let group = non_empty(section.group, &defaults.group)
        .ok_or_else(|| missing_field(manifest_path, "group"))?;
    let version = non_empty(section.version, &defaults.version)
        .ok_or_else(|| missing_field(manifest_path, "version"))?;
    let artifacts = section
        .artifacts
        .unwrap_or_else(|| defaults.artifacts.clone());

    Ok(ModuleDescriptor {
        name,
        path: dir,
        group,
        version,
        artifacts,
    })
}

fn non_empty(value: Option<String>, fallback: &str) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| (!fallback.trim().is_empty()).then(|| fallback.to_string()))
}

fn missing_field(path: &Path, field: &str) -> DiscoveryError {
    DiscoveryError::MissingField {
        path: path.to_path_buf(),
        field: field.to_string(),
    }
}
