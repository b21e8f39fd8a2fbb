// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish, plan and list command arguments.
//!
//! ```text
//! --module accepts a module name, a glob such as 'solana-*', or an alias
//! from [aliases]. Without --module every discovered module is selected.
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PublishArgs {
    /// Repository target name from [[repositories]].
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Modules to publish (names, globs, or aliases).
    #[arg(short = 'm', long = "module", value_name = "SPEC", action = clap::ArgAction::Append)]
    pub modules: Vec<String>,

    /// Maximum concurrent uploads, overrides publish.jobs.
    #[arg(short = 'j', long = "jobs", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Writes the run report as JSON to this file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Shows upload progress bars.
    #[arg(long = "progress")]
    pub progress: bool,
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Repository target name from [[repositories]].
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Modules to plan (names, globs, or aliases).
    #[arg(short = 'm', long = "module", value_name = "SPEC", action = clap::ArgAction::Append)]
    pub modules: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Lists repository targets instead of modules.
    #[arg(short = 't', long = "targets")]
    pub targets: bool,

    /// Lists aliases instead of modules.
    #[arg(short = 'a', long = "aliases")]
    pub aliases: bool,
}
