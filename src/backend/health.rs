//! Per-backend circuit breakers and the health observability surface.
//!
//! Each backend id owns a closed/open/half-open state machine:
//!
//! - **closed** (initial) — calls attempted normally; consecutive failures
//!   reaching the threshold open the circuit.
//! - **open** — calls rejected without attempting; after the configured
//!   open duration elapses the next acquisition moves to half-open.
//! - **half-open** — exactly one trial call is permitted at a time. A
//!   trial success closes the circuit and resets the counter; a trial
//!   failure reopens it and restarts the open-duration timer.
//!
//! This registry is the only process-wide mutable state in the engine. The
//! breaker map is immutable after construction; each breaker sits behind
//! its own `Mutex`, so transitions for one backend never contend with
//! another and two concurrent failures cannot race past the threshold.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::BreakerConfig;

/// Circuit state for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitState {
    /// Calls attempted normally.
    Closed,
    /// Calls rejected without attempting.
    Open,
    /// One trial call permitted.
    HalfOpen,
}

/// Outcome of asking the registry whether a backend may be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireDecision {
    /// The call may proceed (includes the single half-open trial).
    Attempt,
    /// The circuit is open (or a half-open trial is already in flight);
    /// skip this backend without attempting a call.
    Skip,
}

#[derive(Debug)]
struct Breaker {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
    successes: u64,
    failures: u64,
    last_transition: Instant,
    last_transition_at: DateTime<Utc>,
}

impl Breaker {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            opened_at: None,
            trial_in_flight: false,
            successes: 0,
            failures: 0,
            last_transition: Instant::now(),
            last_transition_at: Utc::now(),
        }
    }

    fn transition(&mut self, state: CircuitState) {
        self.state = state;
        self.last_transition = Instant::now();
        self.last_transition_at = Utc::now();
    }
}

/// Read-only health snapshot for one backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendHealth {
    /// Backend id.
    pub backend_id: String,
    /// Current circuit state.
    pub state: CircuitState,
    /// Consecutive failures since the last success.
    pub consecutive_failures: u32,
    /// Total successful calls recorded.
    pub success_count: u64,
    /// Total failed calls recorded.
    pub failure_count: u64,
    /// Successes over total traffic; 1.0 when no traffic yet.
    pub success_rate: f64,
    /// Milliseconds since the last state transition.
    pub since_transition_ms: u64,
    /// Wall-clock time of the last state transition.
    pub last_transition_at: DateTime<Utc>,
}

/// Registry of per-backend circuit breakers.
///
/// Constructed once with the full backend id set and injected into the
/// orchestrator; state mutates only through
/// [`record_success`](BreakerRegistry::record_success) and
/// [`record_failure`](BreakerRegistry::record_failure) on call completion.
#[derive(Debug)]
pub struct BreakerRegistry {
    breakers: HashMap<String, Mutex<Breaker>>,
    config: BreakerConfig,
}

impl BreakerRegistry {
    /// Build a registry for a fixed set of backend ids.
    pub fn new(config: BreakerConfig, ids: impl IntoIterator<Item = String>) -> Self {
        let breakers = ids
            .into_iter()
            .map(|id| (id, Mutex::new(Breaker::new())))
            .collect();
        Self { breakers, config }
    }

    fn open_duration(&self) -> Duration {
        Duration::from_millis(self.config.open_duration_ms)
    }

    /// Ask whether a call to `id` may proceed, performing the open →
    /// half-open transition when the open duration has elapsed.
    ///
    /// Unregistered ids are never gated.
    pub fn try_acquire(&self, id: &str) -> AcquireDecision {
        let Some(cell) = self.breakers.get(id) else {
            return AcquireDecision::Attempt;
        };
        let mut breaker = cell.lock().expect("breaker lock poisoned");

        match breaker.state {
            CircuitState::Closed => AcquireDecision::Attempt,
            CircuitState::Open => {
                let elapsed = breaker
                    .opened_at
                    .map(|at| at.elapsed())
                    .unwrap_or_default();
                if elapsed >= self.open_duration() {
                    breaker.transition(CircuitState::HalfOpen);
                    breaker.trial_in_flight = true;
                    tracing::info!(backend = id, "circuit half-open, permitting trial call");
                    AcquireDecision::Attempt
                } else {
                    AcquireDecision::Skip
                }
            }
            CircuitState::HalfOpen => {
                if breaker.trial_in_flight {
                    AcquireDecision::Skip
                } else {
                    breaker.trial_in_flight = true;
                    AcquireDecision::Attempt
                }
            }
        }
    }

    /// Record a successful call against `id`.
    pub fn record_success(&self, id: &str) {
        let Some(cell) = self.breakers.get(id) else {
            return;
        };
        let mut breaker = cell.lock().expect("breaker lock poisoned");
        breaker.successes += 1;
        breaker.consecutive_failures = 0;

        if breaker.state == CircuitState::HalfOpen {
            breaker.trial_in_flight = false;
            breaker.opened_at = None;
            breaker.transition(CircuitState::Closed);
            tracing::info!(backend = id, "circuit closed after successful trial");
        }
    }

    /// Record a failed call against `id`.
    pub fn record_failure(&self, id: &str) {
        let Some(cell) = self.breakers.get(id) else {
            return;
        };
        let mut breaker = cell.lock().expect("breaker lock poisoned");
        breaker.failures += 1;

        match breaker.state {
            CircuitState::Closed => {
                breaker.consecutive_failures += 1;
                if breaker.consecutive_failures >= self.config.failure_threshold {
                    breaker.opened_at = Some(Instant::now());
                    breaker.transition(CircuitState::Open);
                    tracing::warn!(
                        backend = id,
                        failures = breaker.consecutive_failures,
                        "circuit opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                breaker.trial_in_flight = false;
                breaker.opened_at = Some(Instant::now());
                breaker.transition(CircuitState::Open);
                tracing::warn!(backend = id, "trial call failed, circuit reopened");
            }
            CircuitState::Open => {
                // Late failure from a call that started before the circuit
                // opened; the state is unchanged.
            }
        }
    }

    /// Current circuit state for `id`, if registered.
    pub fn state(&self, id: &str) -> Option<CircuitState> {
        self.breakers
            .get(id)
            .map(|cell| cell.lock().expect("breaker lock poisoned").state)
    }

    /// Consecutive-failure count for `id`, if registered.
    pub fn consecutive_failures(&self, id: &str) -> Option<u32> {
        self.breakers
            .get(id)
            .map(|cell| cell.lock().expect("breaker lock poisoned").consecutive_failures)
    }

    /// Read-only health snapshot of every registered backend, sorted by
    /// backend id for stable output.
    pub fn snapshot(&self) -> Vec<BackendHealth> {
        let mut report: Vec<BackendHealth> = self
            .breakers
            .iter()
            .map(|(id, cell)| {
                let breaker = cell.lock().expect("breaker lock poisoned");
                let total = breaker.successes + breaker.failures;
                let success_rate = if total == 0 {
                    1.0
                } else {
                    breaker.successes as f64 / total as f64
                };
                BackendHealth {
                    backend_id: id.clone(),
                    state: breaker.state,
                    consecutive_failures: breaker.consecutive_failures,
                    success_count: breaker.successes,
                    failure_count: breaker.failures,
                    success_rate,
                    since_transition_ms: breaker.last_transition.elapsed().as_millis() as u64,
                    last_transition_at: breaker.last_transition_at,
                }
            })
            .collect();
        report.sort_by(|a, b| a.backend_id.cmp(&b.backend_id));
        report
    }
}
