//! Backend adapter trait.
//!
//! Defines the single [`BackendAdapter`] contract every response-producing
//! backend satisfies, and the [`GenerationPrompt`] value passed to each
//! attempt. Adapters are polymorphic behind `Arc<dyn BackendAdapter>`; the
//! orchestrator never dispatches on backend names.

use async_trait::async_trait;

use super::error::BackendError;
use crate::types::{CrisisFlag, EmotionResult, RequestContext, ResponseCandidate, SentimentScore};

/// Which family a backend belongs to.
///
/// [`Template`](BackendKind::Template) backends are the availability
/// guarantee of last resort: they always succeed and are exempt from
/// circuit-breaker gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Rule-based template selection; always available.
    Template,
    /// External generative service; may fail and is circuit-gated.
    Generative,
}

/// Everything a backend needs to produce one response candidate.
///
/// Immutable per request; the same prompt is handed to every backend in
/// the fallback chain.
#[derive(Debug, Clone)]
pub struct GenerationPrompt {
    /// The user's raw (clamped) text.
    pub text: String,
    /// Classified emotional state.
    pub emotion: EmotionResult,
    /// Sentiment polarity and intensity.
    pub sentiment: SentimentScore,
    /// Crisis determination, carrying the final (escalated) severity.
    pub crisis: CrisisFlag,
    /// Caller-supplied context.
    pub context: RequestContext,
}

/// Trait for response-producing backends.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Stable backend id (e.g. `"template"`, `"gemini"`).
    fn id(&self) -> &str;

    /// Which family this backend belongs to.
    fn kind(&self) -> BackendKind;

    /// Produce one response candidate for the prompt.
    ///
    /// The orchestrator bounds this call with a wall-clock timeout; a
    /// timed-out future is dropped and its result discarded.
    async fn attempt(&self, prompt: &GenerationPrompt) -> Result<ResponseCandidate, BackendError>;
}
