//! OpenAI chat completions backend for commit messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;

use super::MessageGenerator;
use super::json::parse_commit_message;

/// System prompt sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that receives a DIFF or a new file \
and returns a commit message for it, following the Conventional Commits standard \
(e.g. \"feat: ...\", \"fix: ...\", \"chore: ...\"). Reply with a single short subject line.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// JSON schema forcing the reply into `{"commit_message": string}`.
fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "commit_message",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "commit_message": { "type": "string" }
                },
                "required": ["commit_message"],
                "additionalProperties": false
            }
        }
    })
}

/// Generator that calls the OpenAI chat completions endpoint.
///
/// Each call sends [`SYSTEM_PROMPT`] plus the diff or file content as the user
/// message, and asks for a strict `{"commit_message": ...}` JSON schema.
/// There is no retry; a failed request is reported to the caller, which
/// decides whether to skip the file or fall back.
///
/// A missing API key is not an error at construction time. It surfaces as
/// [`GenerateError::MissingApiKey`] on the first `generate` call, before any
/// request is sent, so deletions can still be committed with their fallback
/// message.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MessageGenerator for OpenAiGenerator {
    async fn generate(&self, text: &str) -> Result<String, GenerateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerateError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            response_format: response_format(),
        };

        debug!(
            "Requesting commit message from {} ({} chars)",
            self.config.model,
            text.len()
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerateError::InvalidResponse("no choices returned".to_string()))?;

        parse_commit_message(&content)
    }
}
