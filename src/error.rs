//! Error types for commit-helper modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git invocations and working-tree reads.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Git is not available in the PATH. Please install Git and try again.")]
    NotInstalled,

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {output}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Not a git repository (or any of the parent directories)")]
    NotARepository,

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the commit message generator.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Request to the OpenAI API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenAI API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("OpenAI API returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Generated commit message was empty")]
    EmptyMessage,
}

/// Per-file failure, tagged by the step that failed.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to read changes for {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to generate commit message for {}: {source}", path.display())]
    MessageFailed {
        path: PathBuf,
        #[source]
        source: GenerateError,
    },

    #[error("Failed to add {} to staging: {source}", path.display())]
    StageFailed {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to remove {} from git: {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to commit {}: {source}", path.display())]
    CommitFailed {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },
}

impl CommitError {
    /// Path of the file that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            CommitError::ReadFailed { path, .. }
            | CommitError::MessageFailed { path, .. }
            | CommitError::StageFailed { path, .. }
            | CommitError::RemoveFailed { path, .. }
            | CommitError::CommitFailed { path, .. } => path,
        }
    }
}
