// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             GantryError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+-----+------+
//!   |      |      |       |      |     |      |
//!   v      v      v       v      v     v      v
//! Bail  Config Discovery Task Publish  Fs  Io/Other
//!        Box    Box      Box   Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    ParseError, UnknownTarget, DuplicateTarget,
//!             InvalidAggregation, CyclicDependency, UnknownModule
//!   Discovery RootNotFound, NoModules, MissingManifest, DuplicateModule
//!   Task      DuplicateTask, UnknownDependency, InvalidTransition
//!   Publish   NoCredentials, NoArtifacts, Upload
//!   Fs        NotFound, PermissionDenied, IoError
//!
//! Exit codes: Config/Discovery => 2, everything else => 1
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GantryError`].
pub type GantryResult<T> = std::result::Result<T, GantryError>;

/// Exit code for a run where every task succeeded.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for a run where at least one task failed.
pub const EXIT_TASK_FAILED: u8 = 1;

/// Exit code for configuration or discovery errors.
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GantryError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Module discovery error.
    #[error("discovery error: {0}")]
    Discovery(Box<DiscoveryError>),

    /// Task graph or task state error.
    #[error("task error: {0}")]
    Task(Box<TaskError>),

    /// Publish operation error.
    #[error("publish error: {0}")]
    Publish(Box<PublishError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GantryError {
    /// Process exit code for this error.
    ///
    /// Everything detected before the first upload (configuration, discovery,
    /// graph construction) maps to [`EXIT_CONFIG_ERROR`].
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Discovery(_) | Self::Task(_) => EXIT_CONFIG_ERROR,
            _ => EXIT_TASK_FAILED,
        }
    }
}

/// Create a fatal [`GantryError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> GantryError {
    GantryError::Bailed(message.into().into_boxed_str())
}

/// Exit code for an `anyhow` error coming out of a command handler.
///
/// Walks the error chain looking for a [`GantryError`]; anything else is
/// treated as a configuration problem because command handlers only fail
/// before publishing starts.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(gantry) = cause.downcast_ref::<GantryError>() {
            return gantry.exit_code();
        }
        if cause.is::<ConfigError>() || cause.is::<DiscoveryError>() || cause.is::<TaskError>() {
            return EXIT_CONFIG_ERROR;
        }
    }
    EXIT_CONFIG_ERROR
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GantryError {
                fn from(err: $error) -> Self {
                    GantryError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    DiscoveryError => Discovery,
    TaskError => Task,
    PublishError => Publish,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
///
/// All of these are fatal and abort a run before anything is published.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),

    /// Repository target is not registered.
    #[error("unknown publish target '{name}'")]
    UnknownTarget { name: String },

    /// Repository target registered twice.
    #[error("publish target '{name}' is already registered")]
    DuplicateTarget { name: String },

    /// Aggregation references missing modules or contains its owner.
    #[error("invalid aggregation for '{owner}': {reason}")]
    InvalidAggregation { owner: String, reason: String },

    /// Task dependencies form a cycle.
    #[error("cyclic task dependency: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Module name or pattern matched no discovered module.
    #[error("unknown module '{name}'")]
    UnknownModule { name: String },
}

// --- Discovery Errors ---

/// Module discovery errors.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Root directory does not exist.
    #[error("root directory does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Walking the root found no module.
    #[error("no modules found under {}", root.display())]
    NoModules { root: PathBuf },

    /// A declared module directory has no manifest.
    #[error("module directory {} has no {manifest}", dir.display())]
    MissingManifest { dir: PathBuf, manifest: String },

    /// Manifest could not be parsed.
    #[error("failed to parse manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    /// Manifest and layout defaults both lack a required field.
    #[error("module manifest {} does not define '{field}' and no default is configured", path.display())]
    MissingField { path: PathBuf, field: String },

    /// Two modules resolved to the same name.
    #[error("duplicate module '{name}' at {} and {}", first.display(), second.display())]
    DuplicateModule {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Walk of the root directory failed.
    #[error("failed to walk {}: {message}", root.display())]
    WalkFailed { root: PathBuf, message: String },
}

// --- Task Errors ---

/// Task graph and task state errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A task with this id was already added to the graph.
    #[error("task '{0}' is already defined")]
    DuplicateTask(String),

    /// A task depends on an id that is not part of the graph.
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    /// Task was not found.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// Illegal state machine transition.
    #[error("task '{task}' cannot move from {from} to {to}")]
    InvalidTransition {
        task: String,
        from: String,
        to: String,
    },
}

// --- Publish Errors ---

/// Per-task publish errors.
///
/// These never abort a run; the dispatcher turns them into a `Failed`
/// status for the affected task.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Target requires authentication but the provider has nothing.
    #[error("no credentials available for target '{target}'")]
    NoCredentials { target: String },

    /// No artifact matched the unit's patterns.
    #[error("no artifacts found for '{unit}'")]
    NoArtifacts { unit: String },

    /// Artifact patterns could not be expanded.
    #[error("failed to collect artifacts for module '{module}': {message}")]
    Artifacts { module: String, message: String },

    /// Remote repository rejected the upload.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Error reported by the remote repository protocol.
///
/// `code` is the HTTP status for rejected requests, `0` for transport
/// failures that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upload failed ({code}): {message}")]
pub struct UploadError {
    pub code: u16,
    pub message: String,
}

impl UploadError {
    /// Creates an upload error.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an upload error for a failure without an HTTP response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
