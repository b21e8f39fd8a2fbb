// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal.
//!
//! ```text
//! walk:  find_named_files()  manifest discovery (ignore::WalkParallel)
//!        find_files()        glob pattern matching (wax)
//!        WalkOptions         max_depth, hidden, gitignore, skip_dirs
//! ```

pub mod walk;

#[cfg(test)]
mod tests;
