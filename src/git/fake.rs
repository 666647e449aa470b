//! Scripted [`GitRunner`] for unit tests.

use std::cell::RefCell;

use crate::error::RepositoryError;

use super::runner::GitRunner;

/// Replays canned output for git commands and records every invocation.
///
/// Rules match on the space-joined argument list by prefix, first match wins.
/// Commands without a matching rule succeed with empty output.
#[derive(Default)]
pub(crate) struct FakeGit {
    rules: Vec<(String, Result<String, String>)>,
    calls: RefCell<Vec<String>>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.rules.push((prefix.to_string(), Ok(stdout.to_string())));
        self
    }

    pub(crate) fn fail(mut self, prefix: &str, stderr: &str) -> Self {
        self.rules.push((prefix.to_string(), Err(stderr.to_string())));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Recorded calls that start with `prefix`.
    pub(crate) fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl GitRunner for FakeGit {
    fn run(&self, args: &[&str]) -> Result<String, RepositoryError> {
        let joined = args.join(" ");
        self.calls.borrow_mut().push(joined.clone());

        let rule = self
            .rules
            .iter()
            .find(|(prefix, _)| joined.starts_with(prefix.as_str()));

        match rule {
            Some((_, Ok(stdout))) => Ok(stdout.clone()),
            Some((_, Err(stderr))) => Err(RepositoryError::NonZeroExit {
                command: format!("git {joined}"),
                code: Some(1),
                output: stderr.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
