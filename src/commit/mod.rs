//! One commit per changed file, with generated messages.

pub mod message;
pub mod orchestrator;
pub mod report;

pub use message::{deletion_fallback, deletion_prompt};
pub use orchestrator::CommitOrchestrator;
pub use report::{CommittedFile, FailedFile, FileKind, RunReport};
