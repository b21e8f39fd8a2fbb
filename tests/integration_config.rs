// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests layered TOML files and command-line overrides.

use std::path::{Path, PathBuf};

use clap::Parser;
use gantry::cli::Cli;
use gantry::config::Config;
use gantry::config::loader::ConfigLoader;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full_workspace() {
    let toml = r#"
[global]
dry = true

[layout]
root = "/work/sava"
manifest = "gantry-module.toml"
max_depth = 2
group = "software.sava"
version_file = "gradle/version"
artifacts = ["build/libs/*.jar", "build/publications/*.pom"]

[publish]
jobs = 3
credentials_env_prefix = "SAVA"
depends_on = { solana-programs = ["core"] }

[aliases]
github-packages = ["solana-programs", "core"]

[aggregations.aggregation]
members = ["solana-programs", "core"]

[[repositories]]
name = "central"
url = "https://central.example.org/maven2"

[[repositories]]
name = "local"
url = "http://localhost:8081/releases"
requires_auth = false
"#;
    let config = Config::parse(toml).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.layout.root, PathBuf::from("/work/sava"));
    assert_eq!(config.layout.max_depth, Some(2));
    assert_eq!(config.jobs(), 3);
    assert_eq!(config.publish.credentials_env_prefix, "SAVA");
    assert_eq!(config.publish.depends_on["solana-programs"], ["core"]);
    assert_eq!(
        config.aggregations["aggregation"].members,
        ["solana-programs", "core"]
    );
    assert_eq!(config.repositories.len(), 2);
    assert!(config.repositories[0].requires_auth);
    assert!(!config.repositories[1].requires_auth);
}

#[test]
fn config_parse_rejects_unknown_section() {
    assert!(Config::parse("[tasks]\nfoo = 1\n").is_err());
}

#[test]
fn config_parse_rejects_repository_without_url() {
    assert!(Config::parse("[[repositories]]\nname = \"central\"\n").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let tmp = tempfile::tempdir().unwrap();
    let base = write(
        tmp.path(),
        "base.toml",
        "[layout]\ngroup = \"org.base\"\nversion = \"1.0\"\n[publish]\njobs = 1\n",
    );
    let local = write(tmp.path(), "local.toml", "[layout]\nversion = \"2.0\"\n");

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();

    assert_eq!(config.layout.group, "org.base");
    assert_eq!(config.layout.version, "2.0");
    assert_eq!(config.publish.jobs, 1);
}

#[test]
fn config_missing_optional_file_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .add_toml_file_optional(tmp.path().join("gantry.toml"))
        .build()
        .unwrap();
    assert_eq!(config.layout.manifest, "module.toml");
}

#[test]
fn config_cli_flags_win_over_files() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write(
        tmp.path(),
        "gantry.toml",
        "[global]\ndry = false\n[layout]\nroot = \"/from/file\"\ngroup = \"org.file\"\n",
    );
    let file_arg = file.display().to_string();

    let cli = Cli::try_parse_from([
        "gantry",
        "-i",
        file_arg.as_str(),
        "--dry",
        "--root",
        "/from/cli",
        "-s",
        "layout.group=org.cli",
        "-s",
        "publish.jobs=4",
        "list",
    ])
    .unwrap();

    let mut loader = ConfigLoader::new();
    for ini in &cli.global.inis {
        loader = loader.add_toml_file(ini);
    }
    let config = loader
        .set_overrides(cli.global.to_config_overrides())
        .unwrap()
        .build()
        .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.layout.root, PathBuf::from("/from/cli"));
    assert_eq!(config.layout.group, "org.cli");
    assert_eq!(config.publish.jobs, 4);
}

#[test]
fn config_format_loaded_files() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write(tmp.path(), "a.toml", "");

    let loader = ConfigLoader::new().add_toml_file(&file);
    let lines = loader.format_loaded_files();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("1. ["));
    assert!(lines[0].ends_with("a.toml"));
}
