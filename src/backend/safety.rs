//! Safety validation for externally generated candidates.
//!
//! Runs on every non-template candidate before it is accepted: length
//! bounds, empty/non-text rejection, and a pluggable disallowed-content
//! policy. The engine only enforces pass/fail — the policy decides what is
//! disallowed. A rejection is treated identically to a backend failure for
//! circuit-breaker purposes.

use std::sync::Arc;

use super::error::BackendError;
use crate::config::SafetyConfig;
use crate::types::ResponseCandidate;

/// Pluggable disallowed-content policy.
///
/// Implementations receive the lowercased candidate text and return `true`
/// when the content is permitted. All methods take `&self` so a single
/// policy can be shared across concurrent requests.
pub trait ContentPolicy: Send + Sync {
    /// True when the content is acceptable to surface to a user.
    fn permits(&self, text: &str) -> bool;
}

/// Policy that permits everything. Useful for tests and trusted backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllPolicy;

impl ContentPolicy for AllowAllPolicy {
    fn permits(&self, _text: &str) -> bool {
        true
    }
}

/// Default policy: rejects dismissive or minimizing phrases that have no
/// place in a supportive response.
#[derive(Debug, Clone)]
pub struct BlocklistPolicy {
    phrases: Vec<String>,
}

impl BlocklistPolicy {
    /// Build a policy from an explicit phrase list (matched lowercased).
    pub fn new(phrases: impl IntoIterator<Item = String>) -> Self {
        Self {
            phrases: phrases.into_iter().map(|p| p.to_lowercase()).collect(),
        }
    }
}

impl Default for BlocklistPolicy {
    fn default() -> Self {
        Self::new(
            [
                "just think positive",
                "get over it",
                "it could be worse",
                "just relax",
                "stop being dramatic",
                "snap out of it",
            ]
            .map(String::from),
        )
    }
}

impl ContentPolicy for BlocklistPolicy {
    fn permits(&self, text: &str) -> bool {
        !self.phrases.iter().any(|phrase| text.contains(phrase))
    }
}

/// Validates generated candidates before acceptance.
#[derive(Clone)]
pub struct SafetyValidator {
    config: SafetyConfig,
    policy: Arc<dyn ContentPolicy>,
}

impl std::fmt::Debug for SafetyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafetyValidator")
            .field("min_response_chars", &self.config.min_response_chars)
            .field("max_response_chars", &self.config.max_response_chars)
            .finish()
    }
}

impl SafetyValidator {
    /// Create a validator with the default blocklist policy.
    pub fn new(config: SafetyConfig) -> Self {
        Self::with_policy(config, Arc::new(BlocklistPolicy::default()))
    }

    /// Create a validator with a caller-supplied content policy.
    pub fn with_policy(config: SafetyConfig, policy: Arc<dyn ContentPolicy>) -> Self {
        Self { config, policy }
    }

    /// Validate a generated candidate.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::SafetyRejected`] when the candidate is
    /// empty, non-textual, outside the length bounds, or rejected by the
    /// content policy.
    pub fn validate(&self, candidate: &ResponseCandidate) -> Result<(), BackendError> {
        let text = candidate.message.trim();

        if text.is_empty() {
            return Err(BackendError::SafetyRejected(
                "candidate message is empty".into(),
            ));
        }
        if !text.chars().any(|c| c.is_alphabetic()) {
            return Err(BackendError::SafetyRejected(
                "candidate message contains no readable text".into(),
            ));
        }
        let chars = text.chars().count();
        if chars < self.config.min_response_chars {
            return Err(BackendError::SafetyRejected(format!(
                "candidate message too short: {chars} chars (minimum {})",
                self.config.min_response_chars
            )));
        }
        if chars > self.config.max_response_chars {
            return Err(BackendError::SafetyRejected(format!(
                "candidate message too long: {chars} chars (maximum {})",
                self.config.max_response_chars
            )));
        }
        if !self.policy.permits(&text.to_lowercase()) {
            return Err(BackendError::SafetyRejected(
                "candidate message rejected by content policy".into(),
            ));
        }

        Ok(())
    }
}
