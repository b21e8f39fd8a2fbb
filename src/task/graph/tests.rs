// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::sync::Arc;

use super::TaskGraph;
use crate::error::{ConfigError, GantryError, TaskError};
use crate::module::ModuleDescriptor;
use crate::publication::PublicationUnit;
use crate::repository::RepositoryTarget;
use crate::task::{PublishTask, TaskId};

fn task(id: &str, deps: &[&str]) -> PublishTask {
    let target = Arc::new(RepositoryTarget::new("central", "https://repo.example.org", false).unwrap());
    let unit = Arc::new(PublicationUnit::single(Arc::new(ModuleDescriptor {
        name: id.to_string(),
        path: PathBuf::from(id),
        group: "org.example".to_string(),
        version: "1.0".to_string(),
        artifacts: Vec::new(),
    })));
    deps.iter()
        .fold(PublishTask::new(id, target, unit), |task, dep| task.depends_on(*dep))
}

fn graph(tasks: &[(&str, &[&str])]) -> TaskGraph {
    let mut graph = TaskGraph::new();
    for (id, deps) in tasks {
        graph.add_task(task(id, deps)).unwrap();
    }
    graph
}

fn ids(order: &[PublishTask]) -> Vec<&str> {
    order.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_build_respects_dependencies() {
    let graph = graph(&[
        ("aggregation", &["solana-programs", "core"]),
        ("solana-programs", &["core"]),
        ("core", &[]),
    ]);

    let order = graph.build().unwrap();
    assert_eq!(ids(&order), ["core", "solana-programs", "aggregation"]);
}

#[test]
fn test_build_tie_break_is_declaration_order() {
    let graph = graph(&[("zeta", &[]), ("alpha", &[]), ("mid", &["zeta"]), ("beta", &[])]);

    let order = graph.build().unwrap();
    assert_eq!(ids(&order), ["zeta", "alpha", "mid", "beta"]);
}

#[test]
fn test_every_task_after_its_dependencies() {
    let graph = graph(&[
        ("e", &["d", "b"]),
        ("d", &["c"]),
        ("c", &["a"]),
        ("b", &["a"]),
        ("a", &[]),
        ("f", &[]),
    ]);

    let order = graph.build().unwrap();
    let position = |id: &str| order.iter().position(|t| t.id.as_str() == id).unwrap();
    for task in &order {
        for dep in &task.depends_on {
            assert!(position(dep.as_str()) < position(task.id.as_str()));
        }
    }
    assert_eq!(order.len(), 6);
}

#[test]
fn test_build_is_idempotent() {
    let graph = graph(&[("b", &["a"]), ("a", &[]), ("c", &[])]);
    let first = ids(&graph.build().unwrap()).join(",");
    let second = ids(&graph.build().unwrap()).join(",");
    assert_eq!(first, second);
}

#[test]
fn test_cycle_is_named() {
    let graph = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"]), ("d", &[])]);

    let err = graph.build().unwrap_err();
    let GantryError::Config(config) = err else {
        panic!("expected config error, got {err:?}");
    };
    let ConfigError::CyclicDependency { cycle } = *config else {
        panic!("expected cyclic dependency");
    };
    assert_eq!(cycle, ["a", "b", "c", "a"]);
}

#[test]
fn test_cycle_downstream_task() {
    // "d" is stuck behind the cycle but is not part of it
    let graph = graph(&[("d", &["a"]), ("a", &["b"]), ("b", &["a"])]);

    let err = graph.build().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: cyclic task dependency: a -> b -> a");
}

#[test]
fn test_self_dependency() {
    let graph = graph(&[("a", &["a"])]);
    let err = graph.build().unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("a -> a"));
}

#[test]
fn test_unknown_dependency() {
    let graph = graph(&[("a", &["ghost"])]);
    let err = graph.build().unwrap_err();
    let GantryError::Task(task) = err else {
        panic!("expected task error");
    };
    assert!(matches!(
        *task,
        TaskError::UnknownDependency { ref dependency, .. } if dependency == "ghost"
    ));
}

#[test]
fn test_duplicate_task_rejected() {
    let mut graph = graph(&[("a", &[])]);
    let err = graph.add_task(task("a", &[])).unwrap_err();
    assert!(matches!(err, TaskError::DuplicateTask(ref id) if id == "a"));
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_get_and_tasks() {
    let graph = graph(&[("b", &[]), ("a", &[])]);
    assert!(graph.get(&TaskId::from("a")).is_some());
    assert!(graph.get(&TaskId::from("missing")).is_none());
    assert_eq!(ids(graph.tasks()), ["b", "a"]);
    assert!(TaskGraph::new().build().unwrap().is_empty());
}
