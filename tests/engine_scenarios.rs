//! End-to-end engine scenarios.
//!
//! Exercises the full pipeline (normalize → sentiment → crisis → classify
//! → orchestrate → recommend) against the engine's behavioral guarantees.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use solace::backend::{BackendAdapter, BackendError, BackendKind, GenerationPrompt};
use solace::{
    EngineConfig, EngineRequest, Emotion, ResponseCandidate, ResponseType, Severity,
    SupportEngine, ToolKind,
};

/// Generative backend that counts invocations and always succeeds.
struct CountingBackend {
    calls: AtomicU32,
}

impl CountingBackend {
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
impl BackendAdapter for CountingBackend {
    fn id(&self) -> &str {
        "counting"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Generative
    }

    async fn attempt(
        &self,
        _prompt: &GenerationPrompt,
    ) -> Result<ResponseCandidate, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseCandidate {
            message: "I hear you, and what you're feeling makes a lot of sense.".into(),
            response_type: ResponseType::AiSupportive,
            backend_id: "counting".into(),
            latency_ms: 1,
        })
    }
}

fn template_only_engine() -> SupportEngine {
    SupportEngine::builder(EngineConfig::default())
        .build()
        .expect("engine builds")
}

#[tokio::test]
async fn overwhelmed_scenario() {
    let engine = template_only_engine();
    let result = engine
        .process(EngineRequest::from_text(
            "I feel really overwhelmed with work deadlines",
        ))
        .await
        .unwrap();

    assert_eq!(result.primary_emotion, Emotion::Overwhelmed);
    assert!(result.confidence > 0.0);
    assert!(
        result
            .coping_tools
            .iter()
            .any(|t| matches!(t.kind, ToolKind::Breathing | ToolKind::Grounding)),
        "expected a breathing or grounding tool, got {:?}",
        result.coping_tools
    );
}

#[tokio::test]
async fn hopeless_scenario_triggers_intervention() {
    let engine = template_only_engine();
    let result = engine
        .process(EngineRequest::from_text("I feel hopeless about everything"))
        .await
        .unwrap();

    assert!(matches!(
        result.safety.severity,
        Severity::Elevated | Severity::Crisis
    ));
    assert!(result.safety.intervention_triggered);
    assert!(
        result.safety.resources.iter().any(|r| r.contact == "988"),
        "elevated severity should attach crisis resources"
    );
}

#[tokio::test]
async fn empty_string_scenario() {
    let engine = template_only_engine();
    let result = engine.process(EngineRequest::from_text("")).await.unwrap();

    assert_eq!(result.primary_emotion, Emotion::Neutral);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.response_type, ResponseType::TemplateSupportive);
    assert!(!result.response_message.is_empty());
}

#[tokio::test]
async fn crisis_phrase_bypasses_generative_backends() {
    let backend = CountingBackend::new();
    let engine = SupportEngine::builder(EngineConfig::default())
        .with_backend(backend.clone())
        .build()
        .unwrap();

    let result = engine
        .process(EngineRequest::from_text(
            "I can't do this, I want to end my life",
        ))
        .await
        .unwrap();

    assert_eq!(result.response_type, ResponseType::CrisisIntervention);
    assert_eq!(result.safety.severity, Severity::Crisis);
    assert!(result.safety.intervention_triggered);
    assert_eq!(
        backend.calls(),
        0,
        "crisis path must never invoke a generative backend"
    );
    assert!(result.backends_attempted.is_empty());
    assert!(result.safety.resources.iter().any(|r| r.contact == "988"));
}

#[tokio::test]
async fn classification_is_deterministic_across_calls() {
    let engine = template_only_engine();
    let text = "I'm so stressed and anxious about my deadlines";

    let a = engine.process(EngineRequest::from_text(text)).await.unwrap();
    let b = engine.process(EngineRequest::from_text(text)).await.unwrap();

    assert_eq!(a.primary_emotion, b.primary_emotion);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.secondary_emotions, b.secondary_emotions);
    assert_eq!(a.sentiment_score, b.sentiment_score);
    assert_eq!(a.intensity, b.intensity);
    assert_eq!(a.response_message, b.response_message);
    assert_eq!(a.coping_tools, b.coping_tools);
}

#[tokio::test]
async fn response_message_is_never_empty() {
    let engine = template_only_engine();
    let inputs = [
        "",
        "ok",
        "I feel great today, everything is wonderful",
        "I'm furious, everyone keeps letting me down",
        "I don't know what to think anymore",
        "Thanks, I really appreciate everything you do",
        "Just a normal day, nothing special",
    ];

    for input in inputs {
        let result = engine
            .process(EngineRequest::from_text(input))
            .await
            .unwrap();
        assert!(
            !result.response_message.is_empty(),
            "empty response for input {input:?}"
        );
    }
}

#[tokio::test]
async fn coping_tools_are_subset_of_catalog_targets() {
    let engine = template_only_engine();
    let result = engine
        .process(EngineRequest::from_text("I am so anxious about tomorrow"))
        .await
        .unwrap();

    assert_eq!(result.primary_emotion, Emotion::Anxious);
    for tool in &result.coping_tools {
        let entry = solace::coping::tool_by_id(&tool.id).expect("tool exists in catalog");
        assert!(
            entry.targets.contains(&Emotion::Anxious),
            "{} does not target anxious",
            tool.id
        );
    }
}

#[tokio::test]
async fn output_contract_serializes_expected_fields() {
    let engine = template_only_engine();
    let result = engine
        .process(EngineRequest::from_text("I feel sad and lonely tonight"))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    for key in [
        "primary_emotion",
        "confidence",
        "secondary_emotions",
        "sentiment_score",
        "intensity",
        "response_message",
        "response_type",
        "source_backend",
        "coping_tools",
        "safety",
        "backends_attempted",
        "processing_time_ms",
    ] {
        assert!(json.get(key).is_some(), "missing output field {key}");
    }
    assert!(json["safety"].get("intervention_triggered").is_some());
    assert!(json["safety"].get("severity").is_some());
    assert!(json["safety"].get("resources").is_some());
    assert_eq!(json["primary_emotion"], "sad");
    assert_eq!(json["response_type"], "template_supportive");
}

#[tokio::test]
async fn generative_backend_answers_when_healthy() {
    let backend = CountingBackend::new();
    let engine = SupportEngine::builder(EngineConfig::default())
        .with_backend(backend.clone())
        .build()
        .unwrap();

    let result = engine
        .process(EngineRequest::from_text("I feel sad about my week"))
        .await
        .unwrap();

    assert_eq!(result.response_type, ResponseType::AiSupportive);
    assert_eq!(result.source_backend, "counting");
    assert_eq!(result.backends_attempted, vec!["counting".to_owned()]);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn positive_text_classifies_positive_family() {
    let engine = template_only_engine();
    let result = engine
        .process(EngineRequest::from_text(
            "I'm so excited, this is amazing and wonderful news!",
        ))
        .await
        .unwrap();

    assert_eq!(result.primary_emotion, Emotion::Excited);
    assert!(!result.safety.intervention_triggered);
    assert!(result.sentiment_score > 0.0);
}
