// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Parallel injection over built pages
//!
//! Each file is read, injected on the blocking pool and written back (or
//! returned) independently. One bad page never affects the others.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::csp::{inject_csp, CspOptions};
use crate::error::{ErrorContext, Result};

/// Default number of files processed at once
pub const DEFAULT_CONCURRENCY: usize = 16;

/// What to do with an injected document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite the input file
    InPlace,
    /// Return the injected HTML in the report
    Collect,
}

/// Outcome for a single file
#[derive(Debug)]
pub struct FileReport {
    /// Input path
    pub path: PathBuf,
    /// Injected HTML in [`OutputMode::Collect`], `None` once written in place
    pub result: Result<Option<String>>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Injects policies into many files concurrently
#[derive(Debug, Clone)]
pub struct BatchInjector {
    options: Arc<CspOptions>,
    mode: OutputMode,
    concurrency: usize,
}

impl BatchInjector {
    pub fn new(options: CspOptions) -> Self {
        Self {
            options: Arc::new(options),
            mode: OutputMode::Collect,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set output mode
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum number of files in flight
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Process all paths. Reports come back in input order.
    pub async fn run(&self, paths: Vec<PathBuf>) -> Vec<FileReport> {
        let reports: Vec<FileReport> = stream::iter(paths)
            .map(|path| {
                let options = Arc::clone(&self.options);
                let mode = self.mode;

                async move {
                    let result = process(&path, options, mode).await;
                    match &result {
                        Ok(_) => tracing::debug!(path = %path.display(), "injected"),
                        Err(e) => tracing::warn!(path = %path.display(), error = %e, "injection failed"),
                    }
                    FileReport { path, result }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        tracing::info!(total = reports.len(), failed, "batch complete");
        reports
    }
}

async fn process(path: &Path, options: Arc<CspOptions>, mode: OutputMode) -> Result<Option<String>> {
    let html = tokio::fs::read_to_string(path).await.with_path(path)?;

    let injected = tokio::task::spawn_blocking(move || inject_csp(&html, &options))
        .await?
        .with_path(path)?;

    match mode {
        OutputMode::InPlace => {
            replace_file(path, injected).await.with_path(path)?;
            Ok(None)
        }
        OutputMode::Collect => Ok(Some(injected)),
    }
}

/// Sibling file the injected page is staged in before replacing the input.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.cspgen-tmp", name))
}

/// Write `contents` next to `path` and rename it over the original, so a
/// failed write never leaves a truncated page behind.
async fn replace_file(path: &Path, contents: String) -> std::io::Result<()> {
    let staging = staging_path(path);

    let written = match tokio::fs::write(&staging, contents).await {
        Ok(()) => tokio::fs::rename(&staging, path).await,
        Err(e) => Err(e),
    };
    if written.is_err() {
        let _ = tokio::fs::remove_file(&staging).await;
    }
    written
}
