// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Publish | Plan | List | Options | Inis | Version
//!
//! exit 0  every task succeeded
//! exit 1  a task failed or was skipped
//! exit 2  configuration or discovery error
//! ```

use std::process::ExitCode;

use gantry::cli::global::GlobalOptions;
use gantry::cli::{self, Command};
use gantry::cmd::config::{run_inis_command, run_options_command};
use gantry::cmd::list::run_list_command;
use gantry::cmd::plan::run_plan_command;
use gantry::cmd::publish::run_publish_command;
use gantry::config::Config;
use gantry::config::loader::ConfigLoader;
use gantry::error::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, exit_code_for};
use gantry::logging::init_logging;
use gantry::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    ExitCode::from(dispatch_command(&cli).await)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> u8 {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(EXIT_SUCCESS)
        }
        Some(Command::Options) => load_config(&cli.global).map(|config| {
            run_options_command(&config);
            EXIT_SUCCESS
        }),
        Some(Command::Inis) => build_config_loader(&cli.global).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
            EXIT_SUCCESS
        }),
        Some(Command::Publish(args)) => match load_config(&cli.global) {
            Ok(config) => run_publish_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Plan(args)) => load_config(&cli.global)
            .and_then(|config| run_plan_command(args, &config))
            .map(|()| EXIT_SUCCESS),
        Some(Command::List(args)) => load_config(&cli.global)
            .and_then(|config| run_list_command(args, &config))
            .map(|()| EXIT_SUCCESS),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Ok(EXIT_CONFIG_ERROR)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code_for(&e)
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> gantry::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .add_toml_file_optional("gantry.toml")
        .with_env_prefix("GANTRY")
        .set_overrides(global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> gantry::error::Result<Config> {
    build_config_loader(global)?.build()
}
