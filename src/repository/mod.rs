// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named remote repository targets.
//!
//! ```text
//! [[repositories]] --> from_config --> register (declaration order)
//!                                         |
//!                  name unique, url absolute http(s)
//!                                         |
//!                    resolve(name) --> Arc<RepositoryTarget>
//! ```
//!
//! Credentials are never stored here; see [`crate::credentials`].


use std::sync::Arc;

use reqwest::Url;

use crate::config::types::RepositoryConfig;
use crate::error::ConfigError;

/// A remote package repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub name: String,
    pub url: Url,
    pub requires_auth: bool,
}

impl RepositoryTarget {
    /// Creates a target, validating the URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `url` is not an absolute
    /// `http` or `https` URL.
    pub fn new(
        name: impl Into<String>,
        url: &str,
        requires_auth: bool,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let invalid = |message: String| ConfigError::InvalidValue {
            section: "repositories".to_string(),
            key: format!("{name}.url"),
            message,
        };

        let parsed = Url::parse(url).map_err(|e| invalid(format!("'{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "'{url}': unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            name,
            url: parsed,
            requires_auth,
        })
    }

    /// Full URL of a file below this repository.
    #[must_use]
    pub fn file_url(&self, remote_path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            remote_path.trim_start_matches('/')
        )
    }
}

/// Registry of repository targets, kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    targets: Vec<Arc<RepositoryTarget>>,
}

impl RepositoryRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Builds the registry from `[[repositories]]` entries.
    ///
    /// # Errors
    ///
    /// Returns the first registration error.
    pub fn from_config(repositories: &[RepositoryConfig]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for repository in repositories {
            registry.register(RepositoryTarget::new(
                &repository.name,
                &repository.url,
                repository.requires_auth,
            )?)?;
        }
        Ok(registry)
    }

    /// Adds a target.
    ///
    /// The registry is unchanged when this fails.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateTarget` if the name is taken.
    pub fn register(&mut self, target: RepositoryTarget) -> Result<(), ConfigError> {
        if self.get(&target.name).is_some() {
            return Err(ConfigError::DuplicateTarget { name: target.name });
        }
        tracing::debug!(repository = %target.name, url = %target.url, "registered repository");
        self.targets.push(Arc::new(target));
        Ok(())
    }

    /// Looks up a target by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownTarget` if no target has that name.
    pub fn resolve(&self, name: &str) -> Result<Arc<RepositoryTarget>, ConfigError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
            })
    }

    fn get(&self, name: &str) -> Option<&Arc<RepositoryTarget>> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Targets in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = &Arc<RepositoryTarget>> {
        self.targets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
