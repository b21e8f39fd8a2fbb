// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::build_plan;
use crate::config::Config;
use crate::error::{ConfigError, GantryError};
use crate::module::{ModuleDescriptor, ModuleRegistry};
use crate::repository::RepositoryRegistry;
use crate::task::TaskId;

const CONFIG: &str = r#"
[aliases]
github-packages = ["solana-programs"]

[aggregations.aggregation]
members = ["solana-programs", "core"]

[publish]
depends_on = { tools = ["core"] }

[[repositories]]
name = "central"
url = "https://central.example.org/maven2"
"#;

fn modules() -> ModuleRegistry {
    ModuleRegistry::from_descriptors(
        "/repo",
        ["aggregation", "core", "solana-programs", "tools"].map(|name| ModuleDescriptor {
            name: name.to_string(),
            path: PathBuf::from("/repo").join(name),
            group: "software.sava".to_string(),
            version: "1.0".to_string(),
            artifacts: vec!["build/libs/*".to_string()],
        }),
    )
    .unwrap()
}

fn plan(config: &str, selection: &[&str]) -> Result<Vec<(String, Vec<String>)>, GantryError> {
    let config = Config::parse(config).unwrap();
    let repositories = RepositoryRegistry::from_config(&config.repositories).unwrap();
    let selection: Vec<String> = selection.iter().map(|s| (*s).to_string()).collect();

    let graph = build_plan(&config, &modules(), &repositories, "central", &selection)?;
    Ok(graph
        .build()?
        .into_iter()
        .map(|task| {
            (
                task.id.to_string(),
                task.depends_on.iter().map(ToString::to_string).collect(),
            )
        })
        .collect())
}

#[test]
fn test_plan_all_modules() {
    let tasks = plan(CONFIG, &[]).unwrap();

    let ids: Vec<_> = tasks.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "core:publish",
            "solana-programs:publish",
            "aggregation:publish",
            "tools:publish"
        ]
    );
    assert_eq!(
        tasks[2].1,
        ["core:publish", "solana-programs:publish"]
    );
    assert_eq!(tasks[3].1, ["core:publish"]);
}

#[test]
fn test_plan_aggregation_unit_contains_members() {
    let config = Config::parse(CONFIG).unwrap();
    let repositories = RepositoryRegistry::from_config(&config.repositories).unwrap();
    let graph = build_plan(
        &config,
        &modules(),
        &repositories,
        "central",
        &["aggregation".to_string()],
    )
    .unwrap();

    assert_eq!(graph.len(), 1);
    let task = graph.get(&TaskId::publish("aggregation")).unwrap();
    let members: Vec<_> = task.unit.member_names().collect();
    assert_eq!(members, ["core", "solana-programs"]);
    // Members outside the selection add no edges
    assert!(task.depends_on.is_empty());
    assert_eq!(task.target.name, "central");
}

#[test]
fn test_plan_alias_selection() {
    let tasks = plan(CONFIG, &["github-packages"]).unwrap();
    assert_eq!(tasks, [("solana-programs:publish".to_string(), Vec::new())]);
}

#[test]
fn test_plan_unknown_target() {
    let config = Config::parse(CONFIG).unwrap();
    let repositories = RepositoryRegistry::from_config(&config.repositories).unwrap();
    let err = build_plan(&config, &modules(), &repositories, "nexus", &[]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    insta::assert_snapshot!(err.to_string(), @"config error: unknown publish target 'nexus'");
}

#[test]
fn test_plan_unknown_module_selection() {
    let err = plan(CONFIG, &["ghost"]).unwrap_err();
    let GantryError::Config(config) = err else {
        panic!("expected config error");
    };
    assert!(matches!(*config, ConfigError::UnknownModule { ref name } if name == "ghost"));
}

#[test]
fn test_plan_self_aggregation_rejected() {
    let config = format!("{CONFIG}\n[aggregations.core]\nmembers = [\"core\"]\n");
    let err = plan(&config, &[]).unwrap_err();
    assert!(err.to_string().contains("invalid aggregation for 'core'"));
}

#[test]
fn test_plan_unknown_depends_on() {
    let config = CONFIG.replace(r#"tools = ["core"]"#, r#"tools = ["ghost"]"#);
    let err = plan(&config, &[]).unwrap_err();
    assert!(err.to_string().contains("unknown module 'ghost'"));
}

#[test]
fn test_plan_depends_on_cycle() {
    let config = CONFIG.replace(
        r#"depends_on = { tools = ["core"] }"#,
        r#"depends_on = { tools = ["core"], core = ["tools"] }"#,
    );
    let err = plan(&config, &[]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: cyclic task dependency: core:publish -> tools:publish -> core:publish");
}

#[test]
fn test_plan_members_with_own_task_leave_owner_unit() {
    let config = Config::parse(CONFIG).unwrap();
    let repositories = RepositoryRegistry::from_config(&config.repositories).unwrap();
    let members_of = |selection: &[&str]| {
        let selection: Vec<String> = selection.iter().map(|s| (*s).to_string()).collect();
        let graph =
            build_plan(&config, &modules(), &repositories, "central", &selection).unwrap();
        let task = graph.get(&TaskId::publish("aggregation")).unwrap();
        let members: Vec<String> = task.unit.member_names().map(str::to_string).collect();
        let deps: Vec<String> = task.depends_on.iter().map(ToString::to_string).collect();
        (members, deps)
    };

    let (members, deps) = members_of(&[]);
    assert!(members.is_empty());
    assert_eq!(deps, ["core:publish", "solana-programs:publish"]);

    let (members, deps) = members_of(&["aggregation", "core"]);
    assert_eq!(members, ["solana-programs"]);
    assert_eq!(deps, ["core:publish"]);
}
