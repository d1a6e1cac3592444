//! Circuit breaker and failover integration tests.
//!
//! Drives the engine with scripted backends to verify the health monitor's
//! state machine end to end: threshold opening, open-circuit skipping,
//! half-open trials, recovery, and the unconditional template floor.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use solace::backend::{BackendAdapter, BackendError, BackendKind, CircuitState, GenerationPrompt};
use solace::{
    EngineConfig, EngineRequest, ResponseCandidate, ResponseType, SupportEngine,
};

/// Install a test subscriber so breaker transitions show up under
/// `RUST_LOG=solace=debug`. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Backend that sleeps long enough to trip any test timeout.
struct HangingBackend {
    calls: AtomicU32,
}

impl HangingBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendAdapter for HangingBackend {
    fn id(&self) -> &str {
        "hanging"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Generative
    }

    async fn attempt(
        &self,
        _prompt: &GenerationPrompt,
    ) -> Result<ResponseCandidate, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(ResponseCandidate {
            message: "far too late to matter".into(),
            response_type: ResponseType::AiSupportive,
            backend_id: "hanging".into(),
            latency_ms: 60_000,
        })
    }
}

/// Backend that fails transport-level until told to recover.
struct FlakyBackend {
    calls: AtomicU32,
    fail_first: u32,
}

impl FlakyBackend {
    fn new(fail_first: u32) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            fail_first,
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendAdapter for FlakyBackend {
    fn id(&self) -> &str {
        "flaky"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Generative
    }

    async fn attempt(
        &self,
        _prompt: &GenerationPrompt,
    ) -> Result<ResponseCandidate, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            Err(BackendError::Transport("connection reset".into()))
        } else {
            Ok(ResponseCandidate {
                message: "I'm glad you told me - that sounds like a lot to carry.".into(),
                response_type: ResponseType::AiSupportive,
                backend_id: "flaky".into(),
                latency_ms: 2,
            })
        }
    }
}

fn engine_with(
    backend: Arc<dyn BackendAdapter>,
    threshold: u32,
    open_ms: u64,
    timeout_ms: u64,
) -> SupportEngine {
    let mut config = EngineConfig::default();
    config.breaker.failure_threshold = threshold;
    config.breaker.open_duration_ms = open_ms;
    config.orchestrator.attempt_timeout_ms = timeout_ms;
    SupportEngine::builder(config)
        .with_backend(backend)
        .build()
        .unwrap()
}

fn backend_state(engine: &SupportEngine, id: &str) -> CircuitState {
    engine
        .health()
        .into_iter()
        .find(|h| h.backend_id == id)
        .expect("backend registered")
        .state
}

#[tokio::test]
async fn five_timeouts_open_circuit_and_sixth_is_never_attempted() {
    init_tracing();
    let backend = HangingBackend::new();
    let engine = engine_with(backend.clone(), 5, 60_000, 20);

    // Five consecutive requests each attempt the backend, time out, and
    // fall back to the template.
    for i in 0..5u32 {
        let result = engine
            .process(EngineRequest::from_text("I feel sad today"))
            .await
            .unwrap();
        assert_eq!(result.response_type, ResponseType::TemplateSupportive);
        assert_eq!(backend.calls(), i + 1);
    }
    assert_eq!(backend_state(&engine, "hanging"), CircuitState::Open);

    // The sixth request skips the open backend entirely.
    let result = engine
        .process(EngineRequest::from_text("I feel sad today"))
        .await
        .unwrap();
    assert_eq!(result.response_type, ResponseType::TemplateSupportive);
    assert_eq!(backend.calls(), 5, "open circuit must not be attempted");
    assert_eq!(
        result.backends_attempted,
        vec!["template".to_owned()],
        "skipped backends are not listed as attempted"
    );
}

#[tokio::test]
async fn template_floor_keeps_responses_flowing_while_open() {
    let backend = HangingBackend::new();
    let engine = engine_with(backend.clone(), 2, 60_000, 20);

    for _ in 0..6 {
        let result = engine
            .process(EngineRequest::from_text("rough day at work"))
            .await
            .unwrap();
        assert!(!result.response_message.is_empty());
    }
    // Only the first two requests reached the backend.
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn half_open_trial_success_recovers_backend() {
    init_tracing();
    let backend = FlakyBackend::new(2);
    let engine = engine_with(backend.clone(), 2, 50, 1_000);

    // Two transport failures open the circuit.
    for _ in 0..2 {
        engine
            .process(EngineRequest::from_text("I feel stressed"))
            .await
            .unwrap();
    }
    assert_eq!(backend_state(&engine, "flaky"), CircuitState::Open);

    // After the open duration, one trial call is permitted; it succeeds
    // and the circuit closes.
    tokio::time::sleep(Duration::from_millis(80)).await;
    let result = engine
        .process(EngineRequest::from_text("I feel stressed"))
        .await
        .unwrap();
    assert_eq!(result.response_type, ResponseType::AiSupportive);
    assert_eq!(result.source_backend, "flaky");
    assert_eq!(backend_state(&engine, "flaky"), CircuitState::Closed);

    // The recovered backend keeps serving.
    let result = engine
        .process(EngineRequest::from_text("I feel stressed"))
        .await
        .unwrap();
    assert_eq!(result.source_backend, "flaky");
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn half_open_trial_failure_reopens_circuit() {
    init_tracing();
    let backend = FlakyBackend::new(10);
    let engine = engine_with(backend.clone(), 2, 50, 1_000);

    for _ in 0..2 {
        engine
            .process(EngineRequest::from_text("I feel stressed"))
            .await
            .unwrap();
    }
    assert_eq!(backend_state(&engine, "flaky"), CircuitState::Open);

    // Trial after the open window fails and reopens the circuit.
    tokio::time::sleep(Duration::from_millis(80)).await;
    engine
        .process(EngineRequest::from_text("I feel stressed"))
        .await
        .unwrap();
    assert_eq!(backend.calls(), 3);
    assert_eq!(backend_state(&engine, "flaky"), CircuitState::Open);

    // Still open: no further attempts inside the new window.
    engine
        .process(EngineRequest::from_text("I feel stressed"))
        .await
        .unwrap();
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn health_surface_reports_failure_counts_and_rate() {
    let backend = FlakyBackend::new(3);
    let engine = engine_with(backend.clone(), 10, 60_000, 1_000);

    for _ in 0..3 {
        engine
            .process(EngineRequest::from_text("hard week"))
            .await
            .unwrap();
    }
    engine
        .process(EngineRequest::from_text("hard week"))
        .await
        .unwrap();

    let health = engine
        .health()
        .into_iter()
        .find(|h| h.backend_id == "flaky")
        .unwrap();
    assert_eq!(health.failure_count, 3);
    assert_eq!(health.success_count, 1);
    assert_eq!(health.consecutive_failures, 0);
    assert!((health.success_rate - 0.25).abs() < 1e-9);
    assert_eq!(health.state, CircuitState::Closed);
}

#[tokio::test]
async fn late_result_from_timed_out_call_is_discarded() {
    let backend = HangingBackend::new();
    let engine = engine_with(backend.clone(), 5, 60_000, 20);

    let result = engine
        .process(EngineRequest::from_text("long night"))
        .await
        .unwrap();

    // The fallback answered; give the cancelled future time to have
    // produced a late result if it were still running.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(result.response_type, ResponseType::TemplateSupportive);
    assert_ne!(result.response_message, "far too late to matter");
    assert_eq!(backend.calls(), 1);
}
