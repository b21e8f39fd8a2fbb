// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use gantry::cli::global::GlobalOptions;
use gantry::cli::publish::{ListArgs, PlanArgs, PublishArgs};
use gantry::cli::{Cli, Command};

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["gantry", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["gantry", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Publish Command
// =============================================================================

fn publish_args(args: &[&str]) -> PublishArgs {
    let argv = ["gantry", "publish"].iter().chain(args).copied();
    match Cli::try_parse_from(argv).unwrap().command {
        Some(Command::Publish(args)) => args,
        other => panic!("expected publish command, got {other:?}"),
    }
}

#[test]
fn cli_publish_defaults() {
    let args = publish_args(&["central"]);
    insta::assert_debug_snapshot!(args, @r#"
    PublishArgs {
        target: "central",
        modules: [],
        jobs: None,
        report: None,
        progress: false,
    }
    "#);
}

#[test]
fn cli_publish_with_everything() {
    let args = publish_args(&[
        "central",
        "-m",
        "core",
        "--module",
        "solana-*",
        "-j",
        "2",
        "--report",
        "out/run.json",
        "--progress",
    ]);
    insta::assert_debug_snapshot!(args, @r#"
    PublishArgs {
        target: "central",
        modules: [
            "core",
            "solana-*",
        ],
        jobs: Some(
            2,
        ),
        report: Some(
            "out/run.json",
        ),
        progress: true,
    }
    "#);
}

#[test]
fn cli_publish_rejects_non_numeric_jobs() {
    assert!(Cli::try_parse_from(["gantry", "publish", "central", "--jobs", "many"]).is_err());
}

// =============================================================================
// Plan / List Commands
// =============================================================================

#[test]
fn cli_plan_command() {
    let cli = Cli::try_parse_from(["gantry", "plan", "central", "-m", "aggregation"]).unwrap();
    let Some(Command::Plan(PlanArgs { target, modules })) = cli.command else {
        panic!("expected plan command");
    };
    assert_eq!(target, "central");
    assert_eq!(modules, ["aggregation"]);
}

#[test]
fn cli_list_defaults_to_modules() {
    let cli = Cli::try_parse_from(["gantry", "list"]).unwrap();
    let Some(Command::List(ListArgs { targets, aliases })) = cli.command else {
        panic!("expected list command");
    };
    assert!(!targets);
    assert!(!aliases);
}

#[test]
fn cli_list_aliases_short_flag() {
    let cli = Cli::try_parse_from(["gantry", "list", "-a"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::List(ListArgs { aliases: true, .. }))
    ));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_before_subcommand() {
    let cli = Cli::try_parse_from(["gantry", "--dry", "-l", "4", "publish", "central"]).unwrap();
    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(4));
}

#[test]
fn cli_global_defaults_produce_no_overrides() {
    let global = GlobalOptions::default();
    assert!(global.to_config_overrides().is_empty());
}

#[test]
fn cli_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["gantry", "build"]).is_err());
}
