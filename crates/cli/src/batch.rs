//! Sequential batch processing with a wall-clock budget per document.

use crate::output::write_outline;
use anyhow::{Context, Result};
use glob::MatchOptions;
use outliner_core::{CancelToken, LineSource, OutlineEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Success {
        output: PathBuf,
        headings: usize,
        elapsed: Duration,
    },
    Timeout {
        budget: Duration,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub name: String,
    pub status: DocumentStatus,
}

/// Per-document statuses of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Success { .. }))
    }

    pub fn timed_out(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Timeout { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.documents.iter().filter(|d| pred(&d.status)).count()
    }
}

/// `*.pdf` files (any extension case) directly inside `dir`, sorted by name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("Input directory is not valid UTF-8: {}", dir.display()))?;
    if !dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", dir.display());
    }

    let pattern = format!("{}/*.pdf", glob::Pattern::escape(dir_str));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut inputs: Vec<PathBuf> = glob::glob_with(&pattern, options)
        .with_context(|| format!("Invalid input pattern: {pattern}"))?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect();
    inputs.sort();
    Ok(inputs)
}

/// Runs documents one after another, each under its own time budget.
pub struct BatchRunner {
    engine: Arc<OutlineEngine>,
    source: Arc<dyn LineSource>,
    output_dir: PathBuf,
    timeout: Duration,
}

impl BatchRunner {
    pub fn new(
        engine: OutlineEngine,
        source: impl LineSource + 'static,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            source: Arc::new(source),
            output_dir: output_dir.into(),
            timeout,
        }
    }

    /// Process every input; one document's failure never stops the batch.
    pub async fn run(&self, inputs: &[PathBuf]) -> Result<BatchReport> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!("Failed to create output directory: {}", self.output_dir.display())
            })?;

        let mut report = BatchReport::default();
        for path in inputs {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let status = self.process_one(path).await;
            report.documents.push(DocumentReport { name, status });
        }
        Ok(report)
    }

    /// Run one document on a blocking task and give up on it once the budget
    /// is spent. The abandoned task sees the cancelled token at its next
    /// checkpoint and its result is dropped.
    pub async fn process_one(&self, path: &Path) -> DocumentStatus {
        let started = Instant::now();
        let cancel = CancelToken::new();

        let engine = Arc::clone(&self.engine);
        let source = Arc::clone(&self.source);
        let document = path.to_path_buf();
        let token = cancel.clone();
        let task = tokio::task::spawn_blocking(move || {
            engine.process(&document, source.as_ref(), &token)
        });

        let outline = match tokio::time::timeout(self.timeout, task).await {
            Err(_) => {
                cancel.cancel();
                tracing::warn!("{} exceeded {:?}, abandoning", path.display(), self.timeout);
                return DocumentStatus::Timeout {
                    budget: self.timeout,
                };
            }
            Ok(Err(join_error)) => {
                return DocumentStatus::Failed {
                    reason: format!("processing task aborted: {join_error}"),
                };
            }
            Ok(Ok(Err(e))) if e.is_cancelled() => {
                return DocumentStatus::Timeout {
                    budget: self.timeout,
                };
            }
            Ok(Ok(Err(e))) => {
                tracing::error!("{}: {}", path.display(), e);
                return DocumentStatus::Failed {
                    reason: e.to_string(),
                };
            }
            Ok(Ok(Ok(outline))) => outline,
        };

        match write_outline(&self.output_dir, path, &outline).await {
            Ok(output) => DocumentStatus::Success {
                output,
                headings: outline.outline.len(),
                elapsed: started.elapsed(),
            },
            Err(e) => DocumentStatus::Failed {
                reason: format!("failed to write output: {e}"),
            },
        }
    }
}
