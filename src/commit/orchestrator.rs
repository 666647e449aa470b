//! Per-file commit sequencing.
//!
//! Lists are processed in order: modified, new, deleted. Within a list files
//! keep the order the inspector returned. A failing file is logged and
//! skipped; the remaining files are still processed.

use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::CommitError;
use crate::git::executor::{commit_path, remove_path, short_head, stage_path};
use crate::git::{Classification, GitRunner, RepositoryInspector};
use crate::llm::MessageGenerator;

use super::message::{deletion_fallback, deletion_prompt};
use super::report::{CommittedFile, FailedFile, FileKind, RunReport};

/// Drives inspector, generator and git for every classified path.
pub struct CommitOrchestrator<'a, R, G: ?Sized> {
    inspector: &'a RepositoryInspector<R>,
    generator: &'a G,
}

impl<'a, R, G> CommitOrchestrator<'a, R, G>
where
    R: GitRunner,
    G: MessageGenerator + ?Sized,
{
    pub fn new(inspector: &'a RepositoryInspector<R>, generator: &'a G) -> Self {
        Self {
            inspector,
            generator,
        }
    }

    /// Commit every classified path, one commit per file.
    ///
    /// # Order
    ///
    /// 1. Modified files: diff, generate, `git add`, `git commit`
    /// 2. New files: content (or directory placeholder), generate, `git add`,
    ///    `git commit`
    /// 3. Deleted files: generate with the fixed-message fallback, `git rm`,
    ///    `git commit`
    ///
    /// Paths are awaited one at a time in list order. A failing path is logged,
    /// recorded in the report and skipped; nothing already staged for it is
    /// undone, and the remaining paths still run.
    pub async fn run(&self, classification: &Classification) -> RunReport {
        let mut report = RunReport::default();

        for path in &classification.modified {
            let result = self.commit_modified(path).await;
            record(&mut report, FileKind::Modified, result);
        }

        for path in &classification.new {
            let result = self.commit_new(path).await;
            record(&mut report, FileKind::New, result);
        }

        for path in &classification.deleted {
            let result = self.commit_deleted(path).await;
            record(&mut report, FileKind::Deleted, result);
        }

        report
    }

    /// Diff, describe, stage and commit a modified file.
    pub async fn commit_modified(&self, path: &Path) -> Result<CommittedFile, CommitError> {
        let diff = self
            .inspector
            .read_diff(path)
            .map_err(|source| CommitError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        let message = self.describe(path, &diff).await?;
        self.stage_and_commit(path, message, FileKind::Modified)
    }

    /// Read, describe, stage and commit an untracked file or directory.
    pub async fn commit_new(&self, path: &Path) -> Result<CommittedFile, CommitError> {
        let content = self
            .inspector
            .read_content(path)
            .map_err(|source| CommitError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        let message = self.describe(path, &content).await?;
        self.stage_and_commit(path, message, FileKind::New)
    }

    /// Remove and commit a deleted file.
    ///
    /// Generator failures fall back to a fixed message so the deletion is
    /// always recorded.
    pub async fn commit_deleted(&self, path: &Path) -> Result<CommittedFile, CommitError> {
        let message = match self.generator.generate(&deletion_prompt(path)).await {
            Ok(message) => message,
            Err(e) => {
                let fallback = deletion_fallback(path);
                warn!(
                    "Could not generate message for deleted file {}: {}. Using '{}'",
                    path.display(),
                    e,
                    fallback
                );
                fallback
            }
        };

        let runner = self.inspector.runner();
        remove_path(runner, path).map_err(|source| CommitError::RemoveFailed {
            path: path.to_path_buf(),
            source,
        })?;
        commit_path(runner, path, &message).map_err(|source| CommitError::CommitFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.committed(path, FileKind::Deleted, message))
    }

    async fn describe(&self, path: &Path, text: &str) -> Result<String, CommitError> {
        debug!("Generating message for {} ({} chars)", path.display(), text.len());
        self.generator
            .generate(text)
            .await
            .map_err(|source| CommitError::MessageFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    fn stage_and_commit(
        &self,
        path: &Path,
        message: String,
        kind: FileKind,
    ) -> Result<CommittedFile, CommitError> {
        let runner = self.inspector.runner();
        stage_path(runner, path).map_err(|source| CommitError::StageFailed {
            path: path.to_path_buf(),
            source,
        })?;
        // No unstage on failure: the path stays staged.
        commit_path(runner, path, &message).map_err(|source| CommitError::CommitFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.committed(path, kind, message))
    }

    fn committed(&self, path: &Path, kind: FileKind, message: String) -> CommittedFile {
        let commit = short_head(self.inspector.runner());
        let label = match kind {
            FileKind::Deleted => "deleted file",
            FileKind::Modified | FileKind::New => "file",
        };
        match &commit {
            Some(hash) => println!("Successfully committed {}: {} ({})", label, path.display(), hash),
            None => println!("Successfully committed {}: {}", label, path.display()),
        }

        CommittedFile {
            path: path.to_path_buf(),
            kind,
            message,
            commit,
        }
    }
}

fn record(report: &mut RunReport, kind: FileKind, result: Result<CommittedFile, CommitError>) {
    match result {
        Ok(file) => report.committed.push(file),
        Err(e) => {
            error!("Error processing {} file: {}", kind, e);
            report.failed.push(FailedFile { kind, error: e });
        }
    }
}
