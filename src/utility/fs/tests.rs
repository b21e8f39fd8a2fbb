// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::walk::{WalkOptions, find_files, find_named_files};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

fn relative(root: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_find_named_files_sorted() {
    let temp = temp_dir();
    touch(temp.path(), "zeta/module.toml");
    touch(temp.path(), "alpha/module.toml");
    touch(temp.path(), "alpha/nested/module.toml");
    touch(temp.path(), "alpha/README.md");

    let found = find_named_files(temp.path(), "module.toml", &WalkOptions::default()).unwrap();

    assert_eq!(
        relative(temp.path(), &found),
        [
            "alpha/module.toml",
            "alpha/nested/module.toml",
            "zeta/module.toml"
        ]
    );
}

#[test]
fn test_find_named_files_skip_dirs() {
    let temp = temp_dir();
    touch(temp.path(), "core/module.toml");
    touch(temp.path(), "build/tmp/module.toml");
    touch(temp.path(), "core/build/module.toml");

    let options = WalkOptions::builder()
        .with_skip_dirs(vec!["build".to_string()])
        .build();
    let found = find_named_files(temp.path(), "module.toml", &options).unwrap();

    assert_eq!(relative(temp.path(), &found), ["core/module.toml"]);
}

#[test]
fn test_find_named_files_max_depth() {
    let temp = temp_dir();
    touch(temp.path(), "a/module.toml");
    touch(temp.path(), "a/b/c/module.toml");

    let options = WalkOptions::builder().with_max_depth(2).build();
    let found = find_named_files(temp.path(), "module.toml", &options).unwrap();

    assert_eq!(relative(temp.path(), &found), ["a/module.toml"]);
}

#[test]
fn test_find_named_files_missing_root() {
    let temp = temp_dir();
    let result = find_named_files(
        temp.path().join("missing"),
        "module.toml",
        &WalkOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_find_files_glob() {
    let temp = temp_dir();
    touch(temp.path(), "build/libs/core-1.0.jar");
    touch(temp.path(), "build/libs/core-1.0-sources.jar");
    touch(temp.path(), "build/tmp/core.class");
    touch(temp.path(), "src/Main.java");

    let jars = find_files(temp.path(), "build/libs/*.jar", &WalkOptions::for_artifacts()).unwrap();

    assert_eq!(
        relative(temp.path(), &jars),
        ["build/libs/core-1.0-sources.jar", "build/libs/core-1.0.jar"]
    );
}

#[test]
fn test_find_files_invalid_pattern() {
    let temp = temp_dir();
    let result = find_files(temp.path(), "build/{libs", &WalkOptions::for_artifacts());
    assert!(result.is_err());
}
