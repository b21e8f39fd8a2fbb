// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          publish / plan / list
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              module    repository  credentials
//!           discovery,    targets     env lookup
//!            selector
//!                 |
//!                 v
//!           publication ----> plan ----> task
//!          units, artifacts           graph, dispatcher
//!                                          |
//!                                          v
//!                                         net
//!                                     HTTP PUT upload
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod module;
pub mod net;
pub mod plan;
pub mod publication;
pub mod repository;
pub mod task;
pub mod utility;
