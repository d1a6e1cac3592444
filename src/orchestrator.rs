//! Response orchestration: backend selection, timeout, and failover.
//!
//! The orchestrator turns a classified request into exactly one response
//! candidate:
//!
//! 1. Crisis severity bypasses every adapter and returns the fixed
//!    crisis-intervention response; this path is never subject to backend
//!    health state.
//! 2. Otherwise backends are tried sequentially in the order resolved from
//!    the configured [`SelectionStrategy`] (reordered by a per-request
//!    preference). Open circuits are skipped without an attempt.
//! 3. Each attempt runs under a wall-clock timeout; a timed-out future is
//!    dropped, cancelling the call, and any late result is discarded
//!    rather than merged.
//! 4. Generated candidates must pass the safety validator; a rejection
//!    counts as a backend failure.
//! 5. If everything else fails, the template backend answers
//!    unconditionally — it is the availability guarantee of last resort
//!    and is never skipped, whatever the circuit state.
//!
//! Attempts are sequential, never raced, so the designed fallback order is
//! preserved and a backend that succeeds late cannot produce duplicate
//! externally visible effects.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::backend::adapter::{BackendAdapter, BackendKind, GenerationPrompt};
use crate::backend::error::BackendError;
use crate::backend::health::{AcquireDecision, BreakerRegistry};
use crate::backend::safety::SafetyValidator;
use crate::backend::template::{self, TemplateBackend};
use crate::error::EngineError;
use crate::types::{PreferredBackend, ResponseCandidate, Severity};

/// Preferred backend ordering, resolved once at engine construction into
/// an explicit ordered adapter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Generative backends first, template last.
    #[default]
    GenerativeFirst,
    /// Template backend only; generative backends are never called.
    RuleOnly,
    /// Generative backends only; the template floor still applies when
    /// they all fail.
    GenerativeOnly,
}

/// Outcome of orchestrating one request.
#[derive(Debug, Clone)]
pub struct OrchestratorOutcome {
    /// The chosen candidate.
    pub candidate: ResponseCandidate,
    /// Backends actually attempted, in order. Skipped backends (open
    /// circuit) are not listed. Empty on the crisis path.
    pub attempted: Vec<String>,
}

/// Selects a backend, invokes it under a timeout, and falls back on
/// failure.
pub struct Orchestrator {
    ordered: Vec<Arc<dyn BackendAdapter>>,
    template: Arc<TemplateBackend>,
    health: Arc<BreakerRegistry>,
    validator: SafetyValidator,
    attempt_timeout: Duration,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.ordered.iter().map(|b| b.id()).collect();
        f.debug_struct("Orchestrator")
            .field("ordered", &ids)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl Orchestrator {
    /// Build an orchestrator over generative backends plus the template
    /// backend, resolving the strategy into a fixed adapter order.
    pub fn new(
        strategy: SelectionStrategy,
        generative: Vec<Arc<dyn BackendAdapter>>,
        template: Arc<TemplateBackend>,
        health: Arc<BreakerRegistry>,
        validator: SafetyValidator,
        attempt_timeout: Duration,
    ) -> Self {
        let template_dyn: Arc<dyn BackendAdapter> = template.clone();
        let ordered: Vec<Arc<dyn BackendAdapter>> = match strategy {
            SelectionStrategy::RuleOnly => vec![template_dyn],
            SelectionStrategy::GenerativeOnly => generative,
            SelectionStrategy::GenerativeFirst => {
                let mut list = generative;
                list.push(template_dyn);
                list
            }
        };
        Self {
            ordered,
            template,
            health,
            validator,
            attempt_timeout,
        }
    }

    /// The resolved backend order for a request, honoring a per-request
    /// preference without disturbing the configured order for others.
    fn order_for(&self, preferred: Option<PreferredBackend>) -> Vec<Arc<dyn BackendAdapter>> {
        match preferred {
            None => self.ordered.clone(),
            Some(PreferredBackend::Template) => {
                let template: Arc<dyn BackendAdapter> = self.template.clone();
                vec![template]
            }
            Some(PreferredBackend::Generative) => {
                let mut list: Vec<Arc<dyn BackendAdapter>> = self
                    .ordered
                    .iter()
                    .filter(|b| b.kind() == BackendKind::Generative)
                    .cloned()
                    .collect();
                list.push(self.template.clone());
                list
            }
        }
    }

    /// Produce exactly one response candidate for the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Exhausted`] only if the template floor
    /// itself fails, which a correctly configured engine makes
    /// unreachable; it is logged as a fatal configuration defect.
    pub async fn respond(&self, prompt: &GenerationPrompt) -> Result<OrchestratorOutcome, EngineError> {
        // Crisis path: bypass all adapters unconditionally.
        if prompt.crisis.severity == Severity::Crisis {
            tracing::info!("crisis severity, bypassing backends");
            return Ok(OrchestratorOutcome {
                candidate: template::crisis_candidate(),
                attempted: Vec::new(),
            });
        }

        let mut attempted: Vec<String> = Vec::new();
        let mut template_attempted = false;

        for backend in self.order_for(prompt.context.preferred_backend) {
            let id = backend.id().to_owned();
            let is_template = backend.kind() == BackendKind::Template;

            // The template backend is exempt from circuit gating.
            if !is_template && self.health.try_acquire(&id) == AcquireDecision::Skip {
                tracing::debug!(backend = %id, "circuit open, skipping backend");
                continue;
            }

            attempted.push(id.clone());
            template_attempted |= is_template;

            match self.attempt_one(backend.as_ref(), prompt).await {
                Ok(candidate) => {
                    self.health.record_success(&id);
                    return Ok(OrchestratorOutcome {
                        candidate,
                        attempted,
                    });
                }
                Err(error) => {
                    self.health.record_failure(&id);
                    tracing::warn!(
                        backend = %id,
                        code = error.code(),
                        error = %error,
                        "backend attempt failed, falling back"
                    );
                }
            }
        }

        // Availability floor: the template backend answers even when the
        // configured order excluded it or every backend failed.
        if !template_attempted {
            attempted.push(self.template.id().to_owned());
            if let Ok(candidate) = self.template.attempt(prompt).await {
                self.health.record_success(self.template.id());
                return Ok(OrchestratorOutcome {
                    candidate,
                    attempted,
                });
            }
        }

        tracing::error!(
            "fatal configuration: all backends exhausted including the template floor"
        );
        Err(EngineError::Exhausted(
            "no backend produced a response candidate".into(),
        ))
    }

    /// Run one attempt under the timeout and validate generated output.
    async fn attempt_one(
        &self,
        backend: &dyn BackendAdapter,
        prompt: &GenerationPrompt,
    ) -> Result<ResponseCandidate, BackendError> {
        let candidate =
            match tokio::time::timeout(self.attempt_timeout, backend.attempt(prompt)).await {
                Ok(result) => result?,
                // The future is dropped here; the in-flight call is
                // cancelled and any late result discarded.
                Err(_elapsed) => {
                    return Err(BackendError::Timeout(format!(
                        "attempt exceeded {:?}",
                        self.attempt_timeout
                    )));
                }
            };

        // Template output is fixed and pre-vetted; only externally
        // generated candidates pass through the safety validator.
        if backend.kind() == BackendKind::Generative {
            self.validator.validate(&candidate)?;
        }

        Ok(candidate)
    }
}
