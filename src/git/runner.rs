//! Git subprocess invocation.
//!
//! Every repository query and mutation goes through [`GitRunner::run`], so tests
//! can swap the real `git` binary for a scripted transcript.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::RepositoryError;

/// Command names, flags and status markers used to query git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommands {
    pub program: String,
    pub diff: String,
    pub status: String,
    pub name_only: String,
    pub porcelain: String,
    pub no_color: String,
    /// Two-character porcelain code for untracked paths.
    pub untracked_marker: String,
    /// Porcelain status letter for deletions, in either column.
    pub deleted_marker: char,
}

impl Default for GitCommands {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            diff: "diff".to_string(),
            status: "status".to_string(),
            name_only: "--name-only".to_string(),
            porcelain: "--porcelain".to_string(),
            no_color: "--no-color".to_string(),
            untracked_marker: "??".to_string(),
            deleted_marker: 'D',
        }
    }
}

/// Runs a git command and returns its stdout.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String, RepositoryError>;
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, args: &[&str]) -> Result<String, RepositoryError> {
        (**self).run(args)
    }
}

/// Check that the git executable can be found on `PATH`.
pub fn check_git_installed(program: &str) -> Result<(), RepositoryError> {
    which::which(program).map_err(|_| RepositoryError::NotInstalled)?;
    Ok(())
}

/// Runner that shells out to the system git binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    /// Locate the work tree containing the current directory.
    ///
    /// Commands run from the top level afterwards, so the repository-relative
    /// paths reported by `diff` and `status` can be passed straight back to git.
    pub fn discover(program: impl Into<String>) -> Result<Self, RepositoryError> {
        let cwd = std::env::current_dir().map_err(|source| RepositoryError::ReadFailed {
            path: PathBuf::from("."),
            source,
        })?;
        Self::discover_from(program, cwd)
    }

    /// Same as [`SystemGit::discover`] starting from an explicit directory.
    pub fn discover_from(
        program: impl Into<String>,
        start: impl Into<PathBuf>,
    ) -> Result<Self, RepositoryError> {
        let start_git = Self::new(program, start);
        let toplevel = match start_git.run(&["rev-parse", "--show-toplevel"]) {
            Ok(out) => out.trim_end_matches(['\n', '\r']).to_string(),
            Err(RepositoryError::NonZeroExit { .. }) => {
                return Err(RepositoryError::NotARepository);
            }
            Err(e) => return Err(e),
        };

        if toplevel.is_empty() {
            return Err(RepositoryError::NotARepository);
        }

        debug!("Repository root: {}", toplevel);
        Ok(Self::new(start_git.program, toplevel))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, RepositoryError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("Running {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| RepositoryError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let combined = format!("{}\n{}", stderr.trim(), stdout.trim());
            return Err(RepositoryError::NonZeroExit {
                command,
                code: output.status.code(),
                output: combined.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
