// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{
    ConfigError, DiscoveryError, EXIT_CONFIG_ERROR, EXIT_TASK_FAILED, GantryError, GantryResult,
    PublishError, TaskError, UploadError, exit_code_for,
};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "layout".to_string(),
        key: "root".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'root' in section '[layout]'");
}

#[test]
fn test_cyclic_dependency_display() {
    let err = ConfigError::CyclicDependency {
        cycle: vec![
            "a:publish".to_string(),
            "b:publish".to_string(),
            "a:publish".to_string(),
        ],
    };
    insta::assert_snapshot!(err.to_string(), @"cyclic task dependency: a:publish -> b:publish -> a:publish");
}

#[test]
fn test_upload_error_display() {
    let err = PublishError::from(UploadError::new(401, "Unauthorized"));
    insta::assert_snapshot!(err.to_string(), @"upload failed (401): Unauthorized");
    assert_eq!(UploadError::transport("connection refused").code, 0);
}

#[test]
fn test_discovery_error_display() {
    let err = DiscoveryError::NoModules {
        root: PathBuf::from("/tmp/empty"),
    };
    insta::assert_snapshot!(err.to_string(), @"no modules found under /tmp/empty");
}

#[test]
fn test_exit_codes() {
    let config: GantryError = ConfigError::UnknownTarget {
        name: "central".to_string(),
    }
    .into();
    let discovery: GantryError = DiscoveryError::NoModules {
        root: PathBuf::from("."),
    }
    .into();
    let task: GantryError = TaskError::DuplicateTask("a:publish".to_string()).into();
    let publish: GantryError = PublishError::NoCredentials {
        target: "central".to_string(),
    }
    .into();

    assert_eq!(config.exit_code(), EXIT_CONFIG_ERROR);
    assert_eq!(discovery.exit_code(), EXIT_CONFIG_ERROR);
    assert_eq!(task.exit_code(), EXIT_CONFIG_ERROR);
    assert_eq!(publish.exit_code(), EXIT_TASK_FAILED);
}

#[test]
fn test_exit_code_for_anyhow_chain() {
    let err = anyhow::Error::new(GantryError::from(ConfigError::UnknownModule {
        name: "nope".to_string(),
    }))
    .context("planning publish run");
    assert_eq!(exit_code_for(&err), EXIT_CONFIG_ERROR);

    let err = anyhow::Error::new(GantryError::from(PublishError::NoArtifacts {
        unit: "core".to_string(),
    }));
    assert_eq!(exit_code_for(&err), EXIT_TASK_FAILED);
}

#[test]
fn test_gantry_error_size() {
    // Box<str> variants are 16 bytes (fat pointer), plus discriminant
    let size = std::mem::size_of::<GantryError>();
    assert!(size <= 24, "GantryError is {size} bytes, expected <= 24");
}

#[test]
fn test_gantry_result_size() {
    let size = std::mem::size_of::<GantryResult<()>>();
    assert!(size <= 24, "GantryResult<()> is {size} bytes, expected <= 24");
}
