// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolves `--module` arguments to module names.
//!
//! ```text
//! input ["github-packages", "solana-*"]
//!   expand_aliases: "github-packages" --> [solana-programs]
//!   match_pattern:  "solana-*"        --> [solana-idl, solana-programs]
//!   union, name order
//! ```

use std::collections::BTreeSet;

use wax::{Glob, Program};

use super::ModuleRegistry;
use crate::config::types::Aliases;
use crate::error::ConfigError;

/// Looks up modules by name, glob pattern, or alias.
pub struct ModuleSelector<'a> {
    registry: &'a ModuleRegistry,
    aliases: &'a Aliases,
}

impl<'a> ModuleSelector<'a> {
    #[must_use]
    pub const fn new(registry: &'a ModuleRegistry, aliases: &'a Aliases) -> Self {
        Self { registry, aliases }
    }

    /// Expands aliases, recursively.
    ///
    /// An alias that refers back to itself is expanded once.
    #[must_use]
    pub fn expand_aliases(&self, specs: &[String]) -> Vec<String> {
        let mut result = Vec::new();
        let mut visiting = BTreeSet::new();
        self.expand_into(specs, &mut visiting, &mut result);
        result
    }

    fn expand_into(
        &self,
        specs: &[String],
        visiting: &mut BTreeSet<String>,
        result: &mut Vec<String>,
    ) {
        for spec in specs {
            match self.aliases.get(spec) {
                Some(targets) => {
                    if visiting.insert(spec.clone()) {
                        self.expand_into(targets, visiting, result);
                        visiting.remove(spec);
                    }
                }
                None => result.push(spec.clone()),
            }
        }
    }

    /// Matches one name or glob against the registry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the pattern is not a valid glob.
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>, ConfigError> {
        if self.registry.contains(pattern) {
            return Ok(vec![pattern.to_string()]);
        }

        let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
            section: "cli".to_string(),
            key: "--module".to_string(),
            message: format!("invalid pattern '{pattern}': {e}"),
        })?;

        Ok(self
            .registry
            .names()
            .filter(|name| glob.is_match(*name))
            .map(str::to_string)
            .collect())
    }

    /// Resolves specs to a set of module names.
    ///
    /// No specs selects every module.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownModule` for a spec that matches nothing
    /// and `ConfigError::InvalidValue` for a malformed glob.
    pub fn resolve(&self, specs: &[String]) -> Result<BTreeSet<String>, ConfigError> {
        if specs.is_empty() {
            return Ok(self.registry.names().map(str::to_string).collect());
        }

        let mut selected = BTreeSet::new();
        for pattern in self.expand_aliases(specs) {
            let matches = self.match_pattern(&pattern)?;
            if matches.is_empty() {
                return Err(ConfigError::UnknownModule { name: pattern });
            }
            selected.extend(matches);
        }

        tracing::debug!(count = selected.len(), "resolved module selection");
        Ok(selected)
    }
}
