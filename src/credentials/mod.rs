// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository credentials.
//!
//! ```text
//! CredentialProvider::get("github-packages")
//!   Env:    GANTRY_AUTH_GITHUB_PACKAGES_USERNAME
//!           GANTRY_AUTH_GITHUB_PACKAGES_PASSWORD
//!   Static: in-memory map (tests, embedding)
//! ```
//!
//! Passwords stay wrapped in [`SecretString`] until the uploader builds the
//! request, so they never reach a log line.


use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;

/// Username and password for one repository.
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Source of credentials, keyed by repository target name.
pub trait CredentialProvider: Send + Sync {
    /// Credentials for `target`, or `None` if none are configured.
    fn get(&self, target: &str) -> Option<Credentials>;
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads `<PREFIX>_<TARGET>_USERNAME` and `<PREFIX>_<TARGET>_PASSWORD`.
///
/// The target name is upper-cased and every non-alphanumeric character
/// becomes `_`.
pub struct EnvCredentialProvider {
    prefix: String,
    lookup: Lookup,
}

impl EnvCredentialProvider {
    /// Provider backed by the process environment.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Provider backed by a custom variable lookup.
    #[must_use]
    pub fn with_lookup<F>(prefix: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            prefix: prefix.into(),
            lookup: Box::new(lookup),
        }
    }

    /// Variable names consulted for `target`, as `(username, password)`.
    #[must_use]
    pub fn variable_names(&self, target: &str) -> (String, String) {
        let key: String = target
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        (
            format!("{}_{key}_USERNAME", self.prefix),
            format!("{}_{key}_PASSWORD", self.prefix),
        )
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn get(&self, target: &str) -> Option<Credentials> {
        let (user_var, pass_var) = self.variable_names(target);
        let username = (self.lookup)(&user_var).filter(|v| !v.is_empty())?;
        let Some(password) = (self.lookup)(&pass_var) else {
            tracing::debug!(variable = %pass_var, "username set but password missing");
            return None;
        };
        Some(Credentials::new(username, password))
    }
}

impl fmt::Debug for EnvCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentialProvider")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Credentials held in memory.
#[derive(Clone, Default)]
pub struct StaticCredentialProvider {
    entries: BTreeMap<String, (String, String)>,
}

impl StaticCredentialProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds credentials for `target`, replacing any existing entry.
    #[must_use]
    pub fn with(
        mut self,
        target: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(target.into(), (username.into(), password.into()));
        self
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get(&self, target: &str) -> Option<Credentials> {
        self.entries
            .get(target)
            .map(|(username, password)| Credentials::new(username.as_str(), password.as_str()))
    }
}

impl fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("targets", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
