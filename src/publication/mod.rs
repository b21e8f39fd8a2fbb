// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publication units.
//!
//! ```text
//! aggregate(owner, members)          (pure, validated against registry)
//!        |
//!        v
//! PublicationUnit { owner, members }  owner not in members
//!        |
//! collect_artifacts()                (I/O, at publish time)
//!   owner, then members by name
//!     each pattern --> wax glob below module dir
//!        |
//!        v
//! Artifact { module, local_path, remote_path }
//!   remote_path = group/as/dirs/name/version/file
//!   two files with one remote_path --> PublishError::Artifacts
//! ```


use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ConfigError, PublishError};
use crate::module::{ModuleDescriptor, ModuleRegistry};
use crate::utility::fs::walk::{WalkOptions, find_files};

/// One file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Module the file belongs to.
    pub module: String,
    /// File on disk.
    pub local_path: PathBuf,
    /// Path below the repository URL.
    pub remote_path: String,
}

/// An owner module plus the modules whose artifacts it re-publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationUnit {
    owner: Arc<ModuleDescriptor>,
    members: BTreeMap<String, Arc<ModuleDescriptor>>,
}

impl PublicationUnit {
    /// A unit publishing a single module.
    #[must_use]
    pub const fn single(owner: Arc<ModuleDescriptor>) -> Self {
        Self {
            owner,
            members: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn owner(&self) -> &Arc<ModuleDescriptor> {
        &self.owner
    }

    /// Member names in order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Owner first, then members by name.
    pub fn modules(&self) -> impl Iterator<Item = &Arc<ModuleDescriptor>> {
        std::iter::once(&self.owner).chain(self.members.values())
    }

    /// The same unit without the members matching `published_separately`.
    #[must_use]
    pub fn excluding<F>(&self, published_separately: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        Self {
            owner: Arc::clone(&self.owner),
            members: self
                .members
                .iter()
                .filter(|(name, _)| !published_separately(name))
                .map(|(name, module)| (name.clone(), Arc::clone(module)))
                .collect(),
        }
    }

    /// Expands every module's artifact patterns.
    ///
    /// Results are in module order, then path order. Blocking.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Artifacts` if a module directory cannot be
    /// walked, a pattern is invalid, or two files map to the same remote
    /// path.
    pub fn collect_artifacts(&self) -> Result<Vec<Artifact>, PublishError> {
        let options = WalkOptions::for_artifacts();
        let mut artifacts: Vec<Artifact> = Vec::new();
        let mut remote_paths: BTreeMap<String, PathBuf> = BTreeMap::new();

        for module in self.modules() {
            let mut files = BTreeSet::new();
            for pattern in &module.artifacts {
                let found = find_files(&module.path, pattern, &options).map_err(|e| {
                    PublishError::Artifacts {
                        module: module.name.clone(),
                        message: format!("{e:#}"),
                    }
                })?;
                files.extend(found);
            }

            tracing::debug!(module = %module.name, count = files.len(), "collected artifacts");
            for path in files {
                let artifact = artifact_for(module, path);
                if let Some(previous) =
                    remote_paths.insert(artifact.remote_path.clone(), artifact.local_path.clone())
                {
                    return Err(PublishError::Artifacts {
                        module: module.name.clone(),
                        message: format!(
                            "'{}' and '{}' both upload to '{}'",
                            previous.display(),
                            artifact.local_path.display(),
                            artifact.remote_path
                        ),
                    });
                }
                artifacts.push(artifact);
            }
        }

        Ok(artifacts)
    }
}

fn artifact_for(module: &ModuleDescriptor, local_path: PathBuf) -> Artifact {
    let file_name = local_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let remote_path = format!(
        "{}/{}/{}/{file_name}",
        module.group_path(),
        module.name,
        module.version
    );

    Artifact {
        module: module.name.clone(),
        local_path,
        remote_path,
    }
}

/// Builds publication units from registry modules.
pub struct PublicationAggregator<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> PublicationAggregator<'a> {
    #[must_use]
    pub const fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Groups `members` under `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAggregation` if the owner or a member is
    /// not a discovered module, or if the owner lists itself.
    pub fn aggregate<S: AsRef<str>>(
        &self,
        owner: &str,
        members: &[S],
    ) -> Result<PublicationUnit, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidAggregation {
            owner: owner.to_string(),
            reason,
        };

        let owner_module = self
            .registry
            .get(owner)
            .ok_or_else(|| invalid("owner is not a discovered module".to_string()))?;

        let mut unit = PublicationUnit::single(Arc::clone(owner_module));
        for member in members {
            let member = member.as_ref();
            if member == owner {
                return Err(invalid("a module cannot aggregate itself".to_string()));
            }
            let module = self
                .registry
                .get(member)
                .ok_or_else(|| invalid(format!("member '{member}' is not a discovered module")))?;
            unit.members.insert(member.to_string(), Arc::clone(module));
        }

        Ok(unit)
    }
}
