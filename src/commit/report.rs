//! Outcome of a commit run.

use std::fmt;
use std::path::PathBuf;

use crate::error::CommitError;

/// Which classification list a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Modified,
    New,
    Deleted,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Modified => write!(f, "modified"),
            FileKind::New => write!(f, "new"),
            FileKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// A file that ended up in its own commit.
#[derive(Debug, Clone)]
pub struct CommittedFile {
    pub path: PathBuf,
    pub kind: FileKind,
    pub message: String,
    /// Short hash of the new commit, when it could be resolved.
    pub commit: Option<String>,
}

/// A file that was skipped after a failed step.
#[derive(Debug)]
pub struct FailedFile {
    pub kind: FileKind,
    pub error: CommitError,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub committed: Vec<CommittedFile>,
    pub failed: Vec<FailedFile>,
}

impl RunReport {
    pub fn summary(&self) -> String {
        format!(
            "Committed {} file(s), {} failed",
            self.committed.len(),
            self.failed.len()
        )
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
