//! Git integration: working-tree inspection and per-file commits.

pub mod executor;
pub mod inspector;
pub mod runner;
pub mod status;

#[cfg(test)]
pub(crate) mod fake;

pub use inspector::{Classification, RepositoryInspector};
pub use runner::{GitCommands, GitRunner, SystemGit, check_git_installed};
