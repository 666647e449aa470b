//! Commit message generation backends.

pub mod json;
pub mod openai;

use async_trait::async_trait;

use crate::error::GenerateError;

pub use json::parse_commit_message;
pub use openai::OpenAiGenerator;

/// Turns a diff, file content or deletion notice into a one-line commit subject.
///
/// This abstraction allows stubbing the remote model in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// A blank result is reported as [`GenerateError::EmptyMessage`], never `Ok("")`.
    async fn generate(&self, text: &str) -> Result<String, GenerateError>;
}
