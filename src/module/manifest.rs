// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module manifest parsing.
//!
//! ```text
//! <module dir>/module.toml
//!   [module]
//!   name      = "solana-programs"     (default: directory name)
//!   group     = "software.sava"       (default: layout.group)
//!   version   = "1.4.0"               (default: layout.version)
//!   artifacts = ["build/libs/*.jar"]  (default: layout.artifacts)
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::DiscoveryError;

/// Parsed contents of a module manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleManifest {
    pub module: ManifestSection,
}

/// The `[module]` table. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSection {
    pub name: Option<String>,
    pub group: Option<String>,
    pub version: Option<String>,
    pub artifacts: Option<Vec<String>>,
}

impl ModuleManifest {
    /// Reads and parses a manifest file.
    ///
    /// An empty file is a valid manifest that takes every value from the
    /// layout defaults.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::InvalidManifest` if the file cannot be read
    /// or is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self, DiscoveryError> {
        let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|message| DiscoveryError::InvalidManifest {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parses manifest content.
    ///
    /// # Errors
    ///
    /// Returns the parser message when the content is not valid TOML or has
    /// unknown keys.
    pub fn parse(content: &str) -> Result<Self, String> {
        use config::{File, FileFormat};

        config::Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| e.to_string())
    }
}
