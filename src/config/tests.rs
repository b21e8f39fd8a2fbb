// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use std::path::PathBuf;

const SAMPLE: &str = r#"
[global]
dry = true

[layout]
root = "workspace"
group = "software.sava"
version = "1.4.0"
directories = ["solana-programs", "aggregation"]

[publish]
jobs = 2
depends_on = { aggregation = ["solana-programs"] }

[aliases]
github-packages = ["solana-programs"]

[aggregations.aggregation]
members = ["solana-programs"]

[[repositories]]
name = "central"
url = "https://central.example.org/maven2"

[[repositories]]
name = "local"
url = "http://localhost:8081/releases"
requires_auth = false
"#;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert_eq!(config.layout.root, PathBuf::from("."));
    assert_eq!(config.layout.manifest, "module.toml");
    assert_eq!(config.layout.max_depth, Some(4));
    assert_eq!(config.layout.artifacts, vec!["build/libs/*".to_string()]);
    assert_eq!(config.publish.jobs, 0);
    assert_eq!(config.publish.credentials_env_prefix, "GANTRY_AUTH");
    assert!(config.repositories.is_empty());
    assert!(config.aggregations.is_empty());
}

#[test]
fn test_parse_sample() {
    let config = Config::parse(SAMPLE).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.layout.root, PathBuf::from("workspace"));
    assert_eq!(config.layout.group, "software.sava");
    assert_eq!(config.layout.directories.len(), 2);
    assert_eq!(config.publish.jobs, 2);
    assert_eq!(config.jobs(), 2);
    assert_eq!(
        config.publish.depends_on.get("aggregation"),
        Some(&vec!["solana-programs".to_string()])
    );
    assert_eq!(
        config.aggregations["aggregation"].members,
        vec!["solana-programs".to_string()]
    );

    let names: Vec<_> = config.repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["central", "local"]);
    assert!(config.repositories[0].requires_auth);
    assert!(!config.repositories[1].requires_auth);
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("[layout]\nmanifests = \"x.toml\"\n");
    assert!(result.is_err());
}

#[test]
fn test_empty_manifest_rejected() {
    let err = Config::parse("[layout]\nmanifest = \"\"\n").unwrap_err();
    assert!(err.to_string().contains("manifest"));
}

#[test]
fn test_empty_alias_rejected() {
    let err = Config::parse("[aliases]\nnothing = []\n").unwrap_err();
    assert!(err.to_string().contains("nothing"));
}

#[test]
fn test_jobs_defaults_to_parallelism() {
    let config = Config::default();
    assert!(config.jobs() >= 1);
}

#[test]
fn test_set_overrides() {
    let config = ConfigLoader::new()
        .add_toml_str(SAMPLE)
        .set_overrides(["layout.group=org.example", "global.dry=false"])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.layout.group, "org.example");
    assert!(!config.global.dry);
}

#[test]
fn test_set_override_without_equals() {
    let result = ConfigLoader::new().set_overrides(["layout.group"]);
    assert!(result.is_err());
}

#[test]
fn test_loader_tracks_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gantry.toml");
    std::fs::write(&path, "[global]\ndry = true\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&path)
        .add_toml_file_optional(dir.path().join("missing.toml"));

    assert_eq!(loader.loaded_files().len(), 1);
    let lines = loader.format_loaded_files();
    assert!(lines[0].starts_with("1. [file] "));

    let config = loader.build().unwrap();
    assert!(config.global.dry);
}

#[test]
fn test_missing_required_file() {
    let result = ConfigLoader::new()
        .add_toml_file("/definitely/not/here/gantry.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_format_options() {
    let config = Config::parse(SAMPLE).unwrap();
    let options = config.format_options();

    let find = |key: &str| {
        options
            .iter()
            .find(|line| line.starts_with(key))
            .cloned()
            .unwrap_or_default()
    };

    assert!(find("aggregations.aggregation.members").ends_with("= solana-programs"));
    assert!(find("repositories.central").ends_with("= https://central.example.org/maven2 (auth)"));
    assert!(find("repositories.local").ends_with("(anonymous)"));
    assert!(find("publish.depends_on.aggregation").ends_with("= solana-programs"));

    let mut sorted = options.clone();
    sorted.sort();
    assert_eq!(options, sorted);
}

#[test]
fn test_keys_keep_their_case() {
    let config = Config::parse(
        "[aliases]\nRelease = [\"Core\"]\n[aggregations.Agg]\nmembers = [\"Core\"]\n[publish]\ndepends_on = { Agg = [\"Core\"] }\n",
    )
    .unwrap();

    assert!(config.aggregations.contains_key("Agg"));
    assert_eq!(config.aliases["Release"], ["Core"]);
    assert_eq!(config.publish.depends_on["Agg"], ["Core"]);
}
