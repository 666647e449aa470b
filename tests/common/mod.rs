//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Repository, Signature, StatusOptions};

use commit_helper::{GenerateError, MessageGenerator};

/// A scratch git repository in a temp directory.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new repository with a local identity so the git CLI can commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable signing");

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write(&self, rel: &str, content: &str) {
        let full = self.dir.path().join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(full, content).expect("Failed to write file");
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.dir.path().join(rel)).expect("Failed to remove file");
    }

    /// Stage the given files and commit them with git2.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        for (rel, content) in files {
            self.write(rel, content);
            index.add_path(Path::new(rel)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create sig");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit");
    }

    /// Run the git CLI inside the repository.
    pub fn git(&self, args: &[&str]) -> std::process::Output {
        std::process::Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git")
    }

    /// Commit messages from HEAD backwards.
    pub fn messages(&self) -> Vec<String> {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.map(|oid| {
            let commit = self
                .repo
                .find_commit(oid.expect("Invalid oid"))
                .expect("Failed to find commit");
            commit.message().unwrap_or_default().trim().to_string()
        })
        .collect()
    }

    /// Paths touched by the HEAD~n commit (0 = HEAD).
    pub fn files_in_commit(&self, n: usize) -> Vec<PathBuf> {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        let oid = walk.nth(n).expect("Commit not found").expect("Invalid oid");
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        let tree = commit.tree().expect("Failed to get tree");
        let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .expect("Failed to diff trees");
        diff.deltas()
            .filter_map(|d| {
                d.new_file()
                    .path()
                    .or_else(|| d.old_file().path())
                    .map(Path::to_path_buf)
            })
            .collect()
    }

    /// Number of entries `git status` would report, untracked included.
    pub fn dirty_count(&self) -> usize {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        self.repo
            .statuses(Some(&mut opts))
            .expect("Failed to read status")
            .len()
    }
}

/// Generator stub that records prompts and answers from a closure.
pub struct StubGenerator<F> {
    pub prompts: Mutex<Vec<String>>,
    respond: F,
}

impl<F> StubGenerator<F>
where
    F: Fn(&str) -> Result<String, GenerateError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            respond,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl<F> MessageGenerator for StubGenerator<F>
where
    F: Fn(&str) -> Result<String, GenerateError> + Send + Sync,
{
    async fn generate(&self, text: &str) -> Result<String, GenerateError> {
        self.prompts.lock().expect("poisoned").push(text.to_string());
        (self.respond)(text)
    }
}
