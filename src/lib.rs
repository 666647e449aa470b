//! commit-helper - commit every changed file separately with an AI-generated message.
//!
//! # Overview
//!
//! commit-helper classifies the working tree into modified, new and deleted
//! files, asks an OpenAI chat model for a Conventional Commits subject for each
//! file's diff or content, and creates one git commit per file.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitOrchestrator, FileKind, RunReport};
pub use config::GeneratorConfig;
pub use error::{CommitError, GenerateError, RepositoryError};
pub use git::{Classification, GitCommands, GitRunner, RepositoryInspector, SystemGit};
pub use llm::{MessageGenerator, OpenAiGenerator};
