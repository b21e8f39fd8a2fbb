// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the maximum depth to traverse.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the skip directories list.
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options for locating build outputs inside a module directory.
    ///
    /// Build outputs are normally git-ignored, so ignore files are not
    /// honoured here.
    #[must_use]
    pub fn for_artifacts() -> Self {
        Self::builder().with_respect_gitignore(false).build()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // filter_entry is evaluated before descending
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.depth() > 0
                && entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Runs a parallel walk and collects every file accepted by `accept`.
///
/// Results are sorted so callers get a deterministic order regardless of
/// thread scheduling.
fn collect_files<F>(root: &Path, options: &WalkOptions, accept: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // Bounded channel keeps memory flat on huge trees
    let (tx, rx) = bounded::<PathBuf>(1000);
    let accept = Arc::new(accept);

    let parallel = build_walker(root, options).build_parallel();

    std::thread::scope(|scope| {
        let collector = scope.spawn(move || rx.iter().collect::<Vec<PathBuf>>());

        parallel.run(|| {
            let tx = tx.clone();
            let accept = Arc::clone(&accept);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        if entry.file_type().is_some_and(|ft| ft.is_file()) && accept(entry.path())
                        {
                            let _ = tx.send(entry.path().to_path_buf());
                        }
                    }
                    Err(e) => warn!(error = %e, "walk error"),
                }
                ignore::WalkState::Continue
            })
        });

        // Dropping the last sender ends the collector loop
        drop(tx);

        let mut files = collector
            .join()
            .map_err(|_| anyhow::anyhow!("walk collector thread panicked"))?;
        files.sort();
        Ok(files)
    })
}

/// Finds every file called `file_name` below `root`.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use gantry::utility::fs::walk::{find_named_files, WalkOptions};
///
/// let manifests = find_named_files("/path/to/repo", "module.toml", &WalkOptions::default())?;
/// println!("Found {} manifests", manifests.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_named_files<P: AsRef<Path>>(
    root: P,
    file_name: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let file_name = file_name.to_string();
    collect_files(root.as_ref(), options, move |path| {
        path.file_name()
            .is_some_and(|name| name == std::ffi::OsStr::new(&file_name))
    })
}

/// Finds files matching a glob pattern relative to `root`.
///
/// Uses the `wax` crate for glob matching combined with
/// `ignore::WalkParallel` for traversal.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use gantry::utility::fs::walk::{find_files, WalkOptions};
///
/// let jars = find_files("/path/to/module", "build/libs/*.jar", &WalkOptions::for_artifacts())?;
/// for file in jars {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();
    let glob = Glob::new(pattern)
        .map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?
        .into_owned();
    let root_path = root.to_path_buf();

    collect_files(root, options, move |path| {
        path.strip_prefix(&root_path)
            .is_ok_and(|rel_path| glob.is_match(rel_path))
    })
}
