//! Solace: emotion classification and response orchestration engine.
//!
//! Turns free-form user text into a classified emotional state, a safety
//! determination, and a single supportive response chosen from multiple
//! candidate-generating backends, with guaranteed availability even when
//! any one backend is unreachable.
//!
//! # Architecture
//!
//! The pipeline is built from independent stages:
//! - **Normalizer**: lowercases, expands contractions, tokenizes
//! - **Sentiment scorer**: lexicon valence scoring with negation handling
//! - **Crisis detector**: tiered phrase scan, run before any backend call
//! - **Emotion classifier**: lexicon matches + sentiment alignment
//! - **Orchestrator**: circuit-gated backend selection with timeout and
//!   sequential failover, terminating at the always-available template
//!   backend
//! - **Coping recommender**: ranked tool suggestions from a static catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use solace::{EngineConfig, EngineRequest, SupportEngine};
//!
//! # async fn example() -> Result<(), solace::EngineError> {
//! let engine = SupportEngine::builder(EngineConfig::default()).build()?;
//! let result = engine
//!     .process(EngineRequest::from_text("I feel really overwhelmed"))
//!     .await?;
//! println!("{}: {}", result.primary_emotion, result.response_message);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod classifier;
pub mod config;
pub mod coping;
pub mod crisis;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod orchestrator;
pub mod resources;
pub mod sentiment;
pub mod types;

pub use backend::{
    BackendAdapter, BackendError, BackendHealth, BackendKind, CircuitState, ContentPolicy,
    GenerationPrompt, RemoteBackend, RemoteBackendConfig, SafetyValidator, TemplateBackend,
};
pub use classifier::EmotionClassifier;
pub use config::EngineConfig;
pub use coping::{CopingRecommendation, CopingRecommender, Difficulty, ToolFilter, ToolKind};
pub use crisis::CrisisDetector;
pub use engine::{EngineRequest, SupportEngine, SupportEngineBuilder};
pub use error::{EngineError, Result};
pub use normalize::NormalizedText;
pub use orchestrator::SelectionStrategy;
pub use sentiment::SentimentScorer;
pub use types::{
    CrisisFlag, Emotion, EmotionResult, Intensity, OrchestrationResult, PreferredBackend,
    RequestContext, ResponseCandidate, ResponseType, SafetyReport, SecondaryEmotion,
    SentimentScore, Severity, SupportResource, TimeOfDay,
};
