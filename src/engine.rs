//! The support engine: the crate's top-level entry point.
//!
//! Wires the pipeline together: normalize → {sentiment, crisis} →
//! classify → orchestrate → recommend, and assembles the externally
//! visible [`OrchestrationResult`]. The engine is cheap to share behind an
//! `Arc`; every request is processed independently, and the circuit
//! breaker registry is the only state shared between concurrent requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::backend::adapter::{BackendAdapter, BackendKind, GenerationPrompt};
use crate::backend::health::{BackendHealth, BreakerRegistry};
use crate::backend::safety::{ContentPolicy, SafetyValidator};
use crate::backend::template::{self, TemplateBackend};
use crate::classifier::EmotionClassifier;
use crate::config::EngineConfig;
use crate::coping::{CopingRecommender, ToolFilter};
use crate::crisis::CrisisDetector;
use crate::error::{EngineError, Result};
use crate::normalize::NormalizedText;
use crate::orchestrator::Orchestrator;
use crate::resources;
use crate::sentiment::SentimentScorer;
use crate::types::{
    CrisisFlag, OrchestrationResult, RequestContext, ResponseType, SafetyReport, Severity, Valence,
};

/// One inbound request from the external collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineRequest {
    /// Free-form user text. The empty string is valid.
    pub text: String,
    /// Optional caller-supplied context.
    #[serde(default)]
    pub context: Option<RequestContext>,
}

impl EngineRequest {
    /// Build a request from text alone.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }
}

/// Builder for [`SupportEngine`].
pub struct SupportEngineBuilder {
    config: EngineConfig,
    backends: Vec<Arc<dyn BackendAdapter>>,
    policy: Option<Arc<dyn ContentPolicy>>,
}

impl SupportEngineBuilder {
    /// Register a generative backend. Backends are tried in registration
    /// order within the configured strategy.
    pub fn with_backend(mut self, backend: Arc<dyn BackendAdapter>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Replace the default blocklist content policy.
    pub fn with_content_policy(mut self, policy: Arc<dyn ContentPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Assemble the engine, resolving the backend order and registering
    /// every backend with the health registry.
    pub fn build(self) -> Result<SupportEngine> {
        for backend in &self.backends {
            if backend.kind() == BackendKind::Template {
                return Err(EngineError::Config(format!(
                    "backend '{}' registers as a template backend; the engine \
                     provides its own template floor",
                    backend.id()
                )));
            }
            if backend.id() == template::TEMPLATE_BACKEND_ID {
                return Err(EngineError::Config(format!(
                    "backend id '{}' is reserved",
                    template::TEMPLATE_BACKEND_ID
                )));
            }
        }

        let template = Arc::new(TemplateBackend::new());
        let mut ids: Vec<String> = self.backends.iter().map(|b| b.id().to_owned()).collect();
        ids.sort();
        ids.dedup();
        if ids.len() != self.backends.len() {
            return Err(EngineError::Config("duplicate backend ids".into()));
        }
        ids.push(template.id().to_owned());

        let health = Arc::new(BreakerRegistry::new(self.config.breaker.clone(), ids));

        let validator = match self.policy {
            Some(policy) => SafetyValidator::with_policy(self.config.safety.clone(), policy),
            None => SafetyValidator::new(self.config.safety.clone()),
        };

        let orchestrator = Orchestrator::new(
            self.config.orchestrator.strategy,
            self.backends,
            template,
            Arc::clone(&health),
            validator,
            Duration::from_millis(self.config.orchestrator.attempt_timeout_ms),
        );

        Ok(SupportEngine {
            classifier: EmotionClassifier::new(self.config.classifier.clone()),
            detector: CrisisDetector::new(),
            scorer: SentimentScorer::new(self.config.sentiment.negation_window),
            recommender: CopingRecommender::new(self.config.recommender.clone()),
            orchestrator,
            health,
            config: self.config,
        })
    }
}

/// Emotion classification and response orchestration engine.
pub struct SupportEngine {
    config: EngineConfig,
    classifier: EmotionClassifier,
    detector: CrisisDetector,
    scorer: SentimentScorer,
    recommender: CopingRecommender,
    orchestrator: Orchestrator,
    health: Arc<BreakerRegistry>,
}

impl std::fmt::Debug for SupportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupportEngine")
            .field("strategy", &self.config.orchestrator.strategy)
            .finish()
    }
}

impl SupportEngine {
    /// Start building an engine with the given configuration.
    pub fn builder(config: EngineConfig) -> SupportEngineBuilder {
        SupportEngineBuilder {
            config,
            backends: Vec::new(),
            policy: None,
        }
    }

    /// Process one request end to end.
    ///
    /// The caller always receives a complete [`OrchestrationResult`];
    /// individual backend failures are recovered internally. The only
    /// observable error is the unreachable-by-design exhaustion of the
    /// template floor.
    pub async fn process(&self, request: EngineRequest) -> Result<OrchestrationResult> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("process_request", request_id = %request_id);
        self.process_inner(request).instrument(span).await
    }

    async fn process_inner(&self, request: EngineRequest) -> Result<OrchestrationResult> {
        let started = Instant::now();
        let context = request.context.unwrap_or_default();
        let text = self.clamp_input(&request.text);

        // Classification stage: pure, synchronous.
        let normalized = NormalizedText::new(&text);
        let sentiment = self.scorer.score(&normalized);

        // Crisis scan runs before any backend call and fails safe: a
        // detector error degrades to elevated severity, never to normal.
        let crisis = match self.detector.scan(&normalized) {
            Ok(flag) => flag,
            Err(error) => {
                tracing::warn!(%error, "crisis detector failed, degrading to elevated severity");
                CrisisFlag::degraded()
            }
        };

        let emotion = self.classifier.classify(&normalized, &sentiment);
        let severity = self.escalate(crisis.severity, &emotion, sentiment.value);

        tracing::debug!(
            primary = %emotion.primary,
            confidence = emotion.confidence,
            sentiment = sentiment.value,
            severity = %severity,
            "classified request"
        );

        // Orchestration stage: the only suspending part of the pipeline.
        let prompt = GenerationPrompt {
            text,
            emotion: emotion.clone(),
            sentiment,
            crisis: CrisisFlag {
                triggered: severity != Severity::Normal,
                severity,
                matched_phrases: crisis.matched_phrases,
            },
            context: context.clone(),
        };
        let outcome = self.orchestrator.respond(&prompt).await?;

        // Recommendation stage.
        let filter = ToolFilter {
            max_minutes: context.max_tool_minutes,
            kinds: context.preferred_tool_kinds.clone(),
            difficulty: None,
        };
        let coping_tools = self.recommender.recommend(emotion.primary, &filter);

        let follow_up_questions: Vec<String> = if severity == Severity::Crisis {
            template::CRISIS_FOLLOW_UPS.iter().map(|q| (*q).to_owned()).collect()
        } else {
            template::follow_up_questions(emotion.primary)
                .iter()
                .map(|q| (*q).to_owned())
                .collect()
        };

        let safety = SafetyReport {
            intervention_triggered: severity != Severity::Normal,
            severity,
            resources: resources::resources_for(severity, emotion.primary),
        };

        debug_assert!(
            !outcome.candidate.message.is_empty(),
            "orchestrator must never yield an empty message"
        );
        debug_assert!(
            severity != Severity::Crisis
                || outcome.candidate.response_type == ResponseType::CrisisIntervention
        );

        Ok(OrchestrationResult {
            primary_emotion: emotion.primary,
            confidence: emotion.confidence,
            secondary_emotions: emotion.secondary,
            sentiment_score: sentiment.value,
            intensity: sentiment.intensity,
            response_message: outcome.candidate.message,
            response_type: outcome.candidate.response_type,
            source_backend: outcome.candidate.backend_id,
            coping_tools,
            follow_up_questions,
            safety,
            backends_attempted: outcome.attempted,
            processing_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Read-only per-backend health snapshot for operators.
    pub fn health(&self) -> Vec<BackendHealth> {
        self.health.snapshot()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clamp oversized input instead of rejecting it.
    fn clamp_input(&self, text: &str) -> String {
        let max = self.config.limits.max_input_chars;
        if text.chars().count() <= max {
            return text.to_owned();
        }
        tracing::warn!(
            chars = text.chars().count(),
            max,
            "input exceeds limit, clamping"
        );
        text.chars().take(max).collect()
    }

    /// Escalate severity for high distress without a phrase match. Only a
    /// crisis-tier phrase match can produce crisis severity.
    fn escalate(
        &self,
        detected: Severity,
        emotion: &crate::types::EmotionResult,
        sentiment: f32,
    ) -> Severity {
        if detected != Severity::Normal {
            return detected;
        }
        let very_negative = sentiment <= self.config.safety.escalation_sentiment_floor;
        let high_distress = emotion.primary.valence() == Valence::Negative
            && matches!(
                crate::types::Intensity::from_magnitude(sentiment),
                crate::types::Intensity::High | crate::types::Intensity::Extreme
            )
            && sentiment < 0.0;
        if very_negative || high_distress {
            Severity::Elevated
        } else {
            Severity::Normal
        }
    }
}
