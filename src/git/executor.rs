//! Repository mutations: stage, remove and commit a single path.
//!
//! Each helper maps to one git invocation through a [`GitRunner`]. Nothing is
//! rolled back on failure; a path staged before a failed commit stays staged.

use std::path::Path;

use crate::error::RepositoryError;

use super::runner::GitRunner;

/// `git add -- <path>`
pub fn stage_path<R: GitRunner>(runner: &R, path: &Path) -> Result<(), RepositoryError> {
    let path = path.to_string_lossy().into_owned();
    runner.run(&["add", "--", path.as_str()])?;
    Ok(())
}

/// `git rm --ignore-unmatch -- <path>`
///
/// `--ignore-unmatch` keeps deletions that were already staged from failing
/// here; the commit below still records them.
pub fn remove_path<R: GitRunner>(runner: &R, path: &Path) -> Result<(), RepositoryError> {
    let path = path.to_string_lossy().into_owned();
    runner.run(&["rm", "--ignore-unmatch", "--", path.as_str()])?;
    Ok(())
}

/// `git commit -m <message> -- <path>`, committing only that path.
pub fn commit_path<R: GitRunner>(
    runner: &R,
    path: &Path,
    message: &str,
) -> Result<(), RepositoryError> {
    let path = path.to_string_lossy().into_owned();
    runner.run(&["commit", "-m", message, "--", path.as_str()])?;
    Ok(())
}

/// Abbreviated hash of HEAD, if it can be resolved.
pub fn short_head<R: GitRunner>(runner: &R) -> Option<String> {
    let out = runner.run(&["rev-parse", "--short", "HEAD"]).ok()?;
    let hash = out.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeGit;

    #[test]
    fn test_stage_path_args() {
        let git = FakeGit::new();
        stage_path(&git, Path::new("src/lib.rs")).unwrap();
        assert_eq!(git.calls(), vec!["add -- src/lib.rs"]);
    }

    #[test]
    fn test_remove_path_args() {
        let git = FakeGit::new();
        remove_path(&git, Path::new("old.txt")).unwrap();
        assert_eq!(git.calls(), vec!["rm --ignore-unmatch -- old.txt"]);
    }

    #[test]
    fn test_commit_path_args() {
        let git = FakeGit::new();
        commit_path(&git, Path::new("a.txt"), "feat: add a").unwrap();
        assert_eq!(git.calls(), vec!["commit -m feat: add a -- a.txt"]);
    }

    #[test]
    fn test_commit_path_failure_carries_output() {
        let git = FakeGit::new().fail("commit", "nothing added to commit");
        let err = commit_path(&git, Path::new("a.txt"), "msg").unwrap_err();
        assert!(err.to_string().contains("nothing added to commit"));
    }

    #[test]
    fn test_short_head() {
        let git = FakeGit::new().respond("rev-parse --short HEAD", "abc1234\n");
        assert_eq!(short_head(&git), Some("abc1234".to_string()));
    }

    #[test]
    fn test_short_head_unborn() {
        let git = FakeGit::new().fail("rev-parse", "fatal: ambiguous argument 'HEAD'");
        assert_eq!(short_head(&git), None);
    }
}
