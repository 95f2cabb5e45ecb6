//! The suggestion-service seam: free-form text in, a command string out.
//!
//! The remote service is opaque to the shell: it is asked to translate a
//! natural-language phrase into a terminal command and either returns text
//! or fails. [`CommandSuggester`] is the trait the shell depends on;
//! [`HttpSuggester`] speaks to an OpenAI-compatible chat endpoint, and
//! [`FixedSuggester`] returns canned answers for tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// Instruction sent ahead of the user's text.
const INSTRUCTION: &str = "Convert this natural language request into a single terminal command. \
     Reply with the command only.";

/// Cap on the suggestion length, in model tokens.
const MAX_TOKENS: u32 = 100;

/// Timeout for one suggestion request, so a hung call cannot hang the
/// whole session.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A service that turns a natural-language phrase into a command string.
#[async_trait]
pub trait CommandSuggester: Send + Sync {
    /// Ask for a command suggestion for `input`.
    async fn suggest(&self, input: &str) -> Result<String, ShellError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Suggester backed by an OpenAI-compatible chat-completions endpoint.
///
/// Sampling is deterministic (temperature zero), so repeated calls with
/// identical input should return identical suggestions, though the service
/// gives no hard guarantee of that.
#[derive(Clone)]
pub struct HttpSuggester {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for HttpSuggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The credential stays out of debug output.
        f.debug_struct("HttpSuggester")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HttpSuggester {
    /// Endpoint used when `WHELK_API_URL` is unset.
    pub const DEFAULT_URL: &'static str = "https://api.openai.com/v1/chat/completions";

    /// Model used when `WHELK_MODEL` is unset.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    /// Build a suggester with explicit settings.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// Returns `None` when `WHELK_API_KEY` is unset or empty: the
    /// natural-language fallback is then disabled, never a fatal error.
    /// `WHELK_API_URL` and `WHELK_MODEL` override the defaults.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("WHELK_API_KEY").ok()?;
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return None;
        }
        let url =
            std::env::var("WHELK_API_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());
        let model =
            std::env::var("WHELK_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());
        Some(Self::new(url, api_key, model))
    }
}

#[async_trait]
impl CommandSuggester for HttpSuggester {
    async fn suggest(&self, input: &str) -> Result<String, ShellError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ShellError::ServiceUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ShellError::ServiceUnavailable(e.to_string()))?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ShellError::ServiceUnavailable(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ShellError::ServiceUnavailable("empty response".to_string()))
    }
}

/// In-memory suggester for tests: returns a fixed suggestion, or fails as
/// if the service were unreachable.
#[derive(Debug, Clone, Default)]
pub struct FixedSuggester {
    suggestion: Option<String>,
}

impl FixedSuggester {
    /// Always suggest `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            suggestion: Some(text.into()),
        }
    }

    /// Always fail with [`ShellError::ServiceUnavailable`].
    pub fn unavailable() -> Self {
        Self { suggestion: None }
    }
}

#[async_trait]
impl CommandSuggester for FixedSuggester {
    async fn suggest(&self, _input: &str) -> Result<String, ShellError> {
        match &self.suggestion {
            Some(s) => Ok(s.clone()),
            None => Err(ShellError::ServiceUnavailable(
                "suggester unavailable".to_string(),
            )),
        }
    }
}
