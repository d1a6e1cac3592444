//! Remote generative backend adapter.
//!
//! Talks to any chat-completions-compatible HTTP API (`/v1/chat/completions`)
//! with a non-streaming request: the orchestrator wants exactly one
//! candidate per attempt, bounded by its own timeout. Provider-specific
//! failures are normalized to [`BackendError`] values so the orchestrator's
//! fallback chain stays a plain conditional chain.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Instant;

use super::adapter::{BackendAdapter, BackendKind, GenerationPrompt};
use super::error::BackendError;
use crate::types::{ResponseCandidate, ResponseType, TimeOfDay};

// ── Configuration ───────────────────────────────────────────────────────

/// Configuration for a remote generative backend.
#[derive(Debug, Clone)]
pub struct RemoteBackendConfig {
    /// Backend id used for health tracking and observability.
    pub id: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL for the API (no trailing slash).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Max tokens per generation.
    pub max_tokens: usize,
    /// Sampling temperature.
    pub temperature: f64,
}

impl RemoteBackendConfig {
    /// Create a config with the default public endpoint left to the
    /// caller via [`with_base_url`](Self::with_base_url).
    pub fn new(
        id: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_owned(),
            model: model.into(),
            max_tokens: 512,
            temperature: 0.7,
        }
    }

    /// Set the base URL (useful for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the max tokens per generation.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

// ── Response parsing ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Extract an error message from a provider error response body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_owned())
}

// ── Adapter ─────────────────────────────────────────────────────────────

/// Chat-completions-compatible generative backend.
pub struct RemoteBackend {
    config: RemoteBackendConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("id", &self.config.id)
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl RemoteBackend {
    /// Create a remote backend with the given configuration.
    pub fn new(config: RemoteBackendConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Build the system prompt from the classified state and context.
    fn system_prompt(prompt: &GenerationPrompt) -> String {
        let mut parts = vec![format!(
            "You are a warm, supportive companion. The user appears to be feeling {} \
             (intensity: {}). Respond with empathy in 2-4 sentences. Validate their \
             feelings, never minimize them, and do not give medical advice.",
            prompt.emotion.primary, prompt.sentiment.intensity
        )];
        if prompt.crisis.severity >= crate::types::Severity::Elevated {
            parts.push(
                "The user may be in significant distress; gently encourage reaching \
                 out to supportive people or a professional."
                    .to_owned(),
            );
        }
        if let Some(time_of_day) = prompt.context.time_of_day {
            let label = match time_of_day {
                TimeOfDay::Morning => "morning",
                TimeOfDay::Afternoon => "afternoon",
                TimeOfDay::Evening => "evening",
                TimeOfDay::Night => "late at night",
            };
            parts.push(format!("It is currently {label} for the user."));
        }
        parts.join(" ")
    }

    fn build_request(&self, prompt: &GenerationPrompt) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": Self::system_prompt(prompt) },
                { "role": "user", "content": prompt.text },
            ],
        })
    }

    /// Map an HTTP error status to the appropriate BackendError.
    fn map_http_error(&self, status: reqwest::StatusCode, body: &str) -> BackendError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => BackendError::Auth(format!(
                "{} authentication failed: {message}",
                self.config.id
            )),
            429 => BackendError::Provider(format!("{} rate limited: {message}", self.config.id)),
            _ => BackendError::Provider(format!(
                "{} HTTP {}: {message}",
                self.config.id,
                status.as_u16()
            )),
        }
    }
}

#[async_trait]
impl BackendAdapter for RemoteBackend {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Generative
    }

    async fn attempt(&self, prompt: &GenerationPrompt) -> Result<ResponseCandidate, BackendError> {
        if self.config.api_key.is_empty() {
            return Err(BackendError::Config(format!(
                "{} has no API key configured",
                self.config.id
            )));
        }

        let started = Instant::now();
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let body = self.build_request(prompt);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(format!("{} request timed out: {e}", self.config.id))
                } else {
                    BackendError::Transport(format!("{} request failed: {e}", self.config.id))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(self.map_http_error(status, &body_text));
        }

        let parsed: CompletionsResponse = response.json().await.map_err(|e| {
            BackendError::InvalidResponse(format!(
                "{} returned unparseable body: {e}",
                self.config.id
            ))
        })?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                BackendError::InvalidResponse(format!(
                    "{} returned no message content",
                    self.config.id
                ))
            })?;

        Ok(ResponseCandidate {
            message,
            response_type: ResponseType::AiSupportive,
            backend_id: self.config.id.clone(),
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
