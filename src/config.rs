//! Generator configuration read from the environment.

use std::env;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Environment variable to override the chat model.
pub const MODEL_ENV_VAR: &str = "COMMIT_HELPER_MODEL";

/// Environment variable to override the API base URL.
pub const API_URL_ENV_VAR: &str = "COMMIT_HELPER_API_URL";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Settings for the OpenAI-backed message generator.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// `None` makes every generation call fail instead of aborting startup.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeneratorConfig {
    /// Read settings from the environment; empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var(API_KEY_ENV_VAR),
            model: non_empty_var(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty_var(API_URL_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}
