//! Working-tree inspection: which files changed, and how.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RepositoryError;

use super::runner::{GitCommands, GitRunner};
use super::status::{StatusEntry, parse_name_only, parse_porcelain};

/// Changed paths split into three disjoint lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub modified: Vec<PathBuf>,
    pub new: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.new.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modified.len() + self.new.len() + self.deleted.len()
    }
}

/// Read-only view of the repository used to decide what to commit.
pub struct RepositoryInspector<R> {
    runner: R,
    commands: GitCommands,
    root: PathBuf,
}

impl<R: GitRunner> RepositoryInspector<R> {
    /// `root` is the work tree top level that status paths are relative to.
    pub fn new(runner: R, commands: GitCommands, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            commands,
            root: root.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Tracked paths with unstaged changes, in git's order.
    pub fn list_modified(&self) -> Result<Vec<PathBuf>, RepositoryError> {
        let output = self
            .runner
            .run(&[self.commands.diff.as_str(), self.commands.name_only.as_str()])?;
        Ok(parse_name_only(&output))
    }

    /// Paths git does not track yet.
    pub fn list_untracked(&self) -> Result<Vec<PathBuf>, RepositoryError> {
        Ok(self.untracked_from(&self.status_entries()?))
    }

    /// Paths deleted from the working tree or the index.
    ///
    /// Unmerged conflicts and paths that were added and then removed before
    /// ever being committed are not deletions and are left out.
    pub fn list_deleted(&self) -> Result<Vec<PathBuf>, RepositoryError> {
        Ok(self.deleted_from(&self.status_entries()?))
    }

    /// Unified diff of one modified path.
    pub fn read_diff(&self, path: &Path) -> Result<String, RepositoryError> {
        let path = path.to_string_lossy().into_owned();
        self.runner.run(&[
            self.commands.diff.as_str(),
            self.commands.no_color.as_str(),
            "--",
            path.as_str(),
        ])
    }

    /// Full content of a new file, or a placeholder for directories.
    pub fn read_content(&self, path: &Path) -> Result<String, RepositoryError> {
        let full = self.root.join(path);
        let metadata = fs::metadata(&full).map_err(|source| RepositoryError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            return Ok(format!("Directory: {} (skipped)", path.display()));
        }

        let bytes = fs::read(&full).map_err(|source| RepositoryError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Run all listings and return disjoint lists.
    ///
    /// # Steps
    ///
    /// 1. `git diff --name-only` for modified paths
    /// 2. One `git status --porcelain` call, split into untracked and deleted
    /// 3. Drop duplicates inside each list, keeping the first occurrence
    /// 4. Remove deleted and untracked paths from `modified`, since
    ///    `git diff --name-only` also reports unstaged deletions
    /// 5. Remove paths that cannot be committed on their own: unmerged
    ///    conflicts (`UD`, `DU`, `DD`, `AA`, `UU`, ...) and `AD` entries
    ///
    /// Skipped paths are logged at warn level and never touched.
    pub fn classify(&self) -> Result<Classification, RepositoryError> {
        let mut modified = self.list_modified()?;
        let entries = self.status_entries()?;
        let mut new = self.untracked_from(&entries);
        let mut deleted = self.deleted_from(&entries);

        dedup_in_order(&mut deleted);
        dedup_in_order(&mut new);
        dedup_in_order(&mut modified);

        let skipped: HashSet<&PathBuf> = entries
            .iter()
            .filter(|e| e.is_unmerged() || e.is_added_then_removed())
            .map(|e| {
                warn!(
                    "Skipping {} ({}): resolve it manually",
                    e.path.display(),
                    e.code
                );
                &e.path
            })
            .collect();

        {
            let elsewhere: HashSet<&PathBuf> = deleted.iter().chain(new.iter()).collect();
            modified.retain(|p| !elsewhere.contains(p) && !skipped.contains(p));
        }

        debug!(
            "Classified {} modified, {} new, {} deleted",
            modified.len(),
            new.len(),
            deleted.len()
        );

        Ok(Classification {
            modified,
            new,
            deleted,
        })
    }

    fn status_entries(&self) -> Result<Vec<StatusEntry>, RepositoryError> {
        let output = self
            .runner
            .run(&[self.commands.status.as_str(), self.commands.porcelain.as_str()])?;
        Ok(parse_porcelain(&output))
    }

    fn untracked_from(&self, entries: &[StatusEntry]) -> Vec<PathBuf> {
        entries
            .iter()
            .filter(|e| e.code == self.commands.untracked_marker)
            .map(|e| e.path.clone())
            .collect()
    }

    fn deleted_from(&self, entries: &[StatusEntry]) -> Vec<PathBuf> {
        entries
            .iter()
            .filter(|e| e.code != self.commands.untracked_marker)
            .filter(|e| !e.is_unmerged() && !e.is_added_then_removed())
            .filter(|e| e.has_marker(self.commands.deleted_marker))
            .map(|e| e.path.clone())
            .collect()
    }
}

fn dedup_in_order(paths: &mut Vec<PathBuf>) {
    let mut seen = HashSet::with_capacity(paths.len());
    paths.retain(|p| seen.insert(p.clone()));
}
