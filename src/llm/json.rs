//! Commit message extraction from model output.
//!
//! The request asks for `{"commit_message": "..."}` under a strict schema, but
//! models still occasionally wrap the object in a markdown fence or add prose
//! around it. Extraction tolerates both and falls back to the raw text.

use serde::Deserialize;

use crate::error::GenerateError;

#[derive(Debug, Deserialize)]
struct CommitOutput {
    commit_message: String,
}

/// Pull the commit subject out of a model reply.
///
/// # Resolution order
///
/// 1. A JSON object with a `commit_message` field, found by [`extract_json`]
/// 2. Otherwise the reply text itself
///
/// Either way only the first non-empty line is kept, with whitespace and stray
/// backticks trimmed. A reply that leaves nothing is [`GenerateError::EmptyMessage`].
pub fn parse_commit_message(content: &str) -> Result<String, GenerateError> {
    let message = match serde_json::from_str::<CommitOutput>(&extract_json(content)) {
        Ok(output) => output.commit_message,
        Err(_) => content.to_string(),
    };

    first_line(&message).ok_or(GenerateError::EmptyMessage)
}

/// First non-empty line with surrounding whitespace and backticks removed.
pub fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(|line| line.trim().trim_matches('`').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Locate a JSON object inside a reply that may be fenced or surrounded by text.
///
/// Tries a markdown fence whose body starts with `{` first, then the first
/// balanced `{...}` span that parses as JSON. Falls back to the trimmed input.
pub fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(body) = fenced_block(trimmed).filter(|b| b.starts_with('{')) {
        return body.to_string();
    }

    trimmed
        .match_indices('{')
        .filter_map(|(idx, _)| balanced_object(&trimmed[idx..]))
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
        .unwrap_or(trimmed)
        .to_string()
}

/// Body of the first triple-backtick fence, minus any language tag line.
fn fenced_block(text: &str) -> Option<&str> {
    let (_, after_open) = text.split_once("```")?;
    let (body, _) = after_open.split_once("```")?;
    let body = match body.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with('{') => rest,
        _ => body,
    };
    Some(body.trim())
}

/// Prefix of `text` up to the brace closing its leading `{`, string-aware.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
