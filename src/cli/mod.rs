// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gantry using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gantry [global options] <command>
//! publish <target> [--module SPEC]... [--jobs N] [--report FILE]
//! plan <target> [--module SPEC]...
//! list [--targets] [--aliases]
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod publish;


use crate::cli::global::GlobalOptions;
use crate::cli::publish::{ListArgs, PlanArgs, PublishArgs};
use clap::{Parser, Subcommand};

/// Multi-module publish orchestrator
///
/// Discovers modules under a root directory and publishes their artifacts
/// to remote package repositories.
#[derive(Debug, Parser)]
#[command(
    name = "gantry",
    author,
    version,
    about = "Multi-module publish orchestrator",
    long_about = "gantry Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Discovers the modules of a multi-module build and publishes\n\
                  their artifacts to remote package repositories.\n\n\
                  Invoking `gantry publish central` publishes every module. Do\n\
                  `gantry publish central --module <name>...` to publish specific\n\
                  modules. See `gantry <command> --help` for more information.",
    after_help = "CONFIG FILES:\n\n\
                  gantry loads every --ini file in order, then `gantry.toml` from\n\
                  the current directory if it exists, then GANTRY__SECTION__KEY\n\
                  environment variables, then --set overrides. Later sources\n\
                  override earlier ones.\n\n\
                  EXIT STATUS:\n\n\
                  0 every task succeeded, 1 a task failed or the run was aborted,\n\
                  2 configuration or discovery error."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by gantry.
    Inis,

    /// Publishes modules to a repository target.
    Publish(PublishArgs),

    /// Prints the ordered publish tasks without running them.
    Plan(PlanArgs),

    /// Lists discovered modules, targets, or aliases.
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
