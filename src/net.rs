// gantry: Multi-module Publish Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote repository protocol.
//!
//! ```text
//! ArtifactUploader::upload(target, credentials, artifacts)
//!        |
//!   HttpUploader
//!     per artifact: PUT {target.url}/{remote_path}
//!                   basic auth when credentials are present
//!        |
//!        +-- 2xx       --> next artifact
//!        +-- non-2xx   --> UploadError { code: status, message: body }
//!        +-- transport --> UploadError { code: 0, message }
//!
//!   Progress display
//!     Bar     [=====>     ] 5MB/10MB   (one line per running upload)
//!     Spinner * 5MB @ 1MB/s
//!     Silent  (none)
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```

use std::sync::OnceLock;

use futures_util::future::BoxFuture;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reqwest::Client;
use secrecy::ExposeSecret;

use crate::credentials::Credentials;
use crate::error::UploadError;
use crate::publication::Artifact;
use crate::repository::RepositoryTarget;

/// Sends artifacts to a remote repository.
///
/// Object safe so the dispatcher can hold `Arc<dyn ArtifactUploader>`.
pub trait ArtifactUploader: Send + Sync {
    /// Uploads every artifact to `target`, stopping at the first error.
    fn upload<'a>(
        &'a self,
        target: &'a RepositoryTarget,
        credentials: Option<&'a Credentials>,
        artifacts: &'a [Artifact],
    ) -> BoxFuture<'a, Result<(), UploadError>>;
}

/// Global HTTP client - initialized once, reused across all uploads.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("gantry/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Pre-validated progress bar style for known upload sizes.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} {prefix:.bold} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Pre-validated spinner style.
fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {bytes} @ {binary_bytes_per_sec}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style for uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    /// Show a progress bar with speed
    Bar,
    /// Show a spinner with transferred bytes
    Spinner,
    /// No visual progress
    #[default]
    Silent,
}

/// Uploads artifacts with HTTP `PUT`, Maven deploy style.
pub struct HttpUploader {
    client: Client,
    progress_display: ProgressDisplay,
    progress: MultiProgress,
}

impl Default for HttpUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpUploader {
    /// Creates a silent uploader using the shared client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            progress_display: ProgressDisplay::default(),
            progress: MultiProgress::new(),
        }
    }

    /// Set the progress display style.
    #[must_use]
    pub const fn progress(mut self, style: ProgressDisplay) -> Self {
        self.progress_display = style;
        self
    }

    fn create_progress_bar(&self, label: &str, total_size: u64) -> Option<ProgressBar> {
        let pb = match self.progress_display {
            ProgressDisplay::Silent => return None,
            ProgressDisplay::Bar if total_size > 0 => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(bar_style());
                pb
            }
            ProgressDisplay::Bar | ProgressDisplay::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                pb
            }
        };
        pb.set_prefix(label.to_string());
        Some(self.progress.add(pb))
    }

    async fn put_artifact(
        &self,
        target: &RepositoryTarget,
        credentials: Option<&Credentials>,
        artifact: &Artifact,
    ) -> Result<u64, UploadError> {
        let body = tokio::fs::read(&artifact.local_path).await.map_err(|e| {
            UploadError::transport(format!(
                "failed to read {}: {e}",
                artifact.local_path.display()
            ))
        })?;
        let size = body.len() as u64;
        let url = target.file_url(&artifact.remote_path);

        let mut request = self.client.put(&url).body(body);
        if let Some(credentials) = credentials {
            request = request.basic_auth(
                &credentials.username,
                Some(credentials.password.expose_secret()),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::transport(format!("PUT {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            tracing::warn!(url = %url, status = status.as_u16(), "upload rejected");
            return Err(UploadError::new(status.as_u16(), message));
        }

        tracing::debug!(url = %url, bytes = size, "uploaded artifact");
        Ok(size)
    }
}

impl ArtifactUploader for HttpUploader {
    fn upload<'a>(
        &'a self,
        target: &'a RepositoryTarget,
        credentials: Option<&'a Credentials>,
        artifacts: &'a [Artifact],
    ) -> BoxFuture<'a, Result<(), UploadError>> {
        Box::pin(async move {
            let mut total_size = 0;
            if self.progress_display != ProgressDisplay::Silent {
                for artifact in artifacts {
                    if let Ok(meta) = tokio::fs::metadata(&artifact.local_path).await {
                        total_size += meta.len();
                    }
                }
            }
            let label = artifacts.first().map_or("", |a| a.module.as_str());
            let progress_bar = self.create_progress_bar(label, total_size);

            for artifact in artifacts {
                match self.put_artifact(target, credentials, artifact).await {
                    Ok(size) => {
                        if let Some(pb) = &progress_bar {
                            pb.inc(size);
                        }
                    }
                    Err(e) => {
                        if let Some(pb) = &progress_bar {
                            pb.abandon_with_message("failed");
                        }
                        return Err(e);
                    }
                }
            }

            if let Some(pb) = progress_bar {
                pb.finish_and_clear();
            }
            Ok(())
        })
    }
}
