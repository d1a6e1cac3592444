//! Remote Backend Contract Tests
//!
//! Verify exact HTTP API format compliance for the chat-completions
//! backend: request format, auth header, response parsing, and error
//! mapping against a mock server.

use std::sync::Arc;

use serde_json::json;
use solace::backend::{BackendAdapter, GenerationPrompt};
use solace::types::ClassifierSource;
use solace::{
    CrisisFlag, EngineConfig, EngineRequest, EmotionResult, RemoteBackend, RemoteBackendConfig,
    RequestContext, ResponseType, SentimentScore, SupportEngine,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prompt() -> GenerationPrompt {
    GenerationPrompt {
        text: "I had a hard day at work".into(),
        emotion: EmotionResult::neutral(ClassifierSource::Lexicon),
        sentiment: SentimentScore::new(-0.2),
        crisis: CrisisFlag::clear(),
        context: RequestContext::default(),
    }
}

fn success_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn request_includes_model_messages_and_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "support-model",
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "I had a hard day at work" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(
            "That sounds like a genuinely draining day, and your tiredness makes sense.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = RemoteBackendConfig::new("remote", "test-key", "support-model")
        .with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let candidate = backend.attempt(&prompt()).await.expect("attempt succeeds");
    assert_eq!(candidate.response_type, ResponseType::AiSupportive);
    assert_eq!(candidate.backend_id, "remote");
    assert!(candidate.message.contains("draining day"));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "bad-key", "model").with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let err = backend.attempt(&prompt()).await.unwrap_err();
    assert_eq!(err.code(), "AUTH_FAILED");
    assert!(err.message().contains("Incorrect API key"));
}

#[tokio::test]
async fn rate_limit_maps_to_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "rate_limit_error" }
        })))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "key", "model").with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let err = backend.attempt(&prompt()).await.unwrap_err();
    assert_eq!(err.code(), "PROVIDER_ERROR");
    assert!(err.is_transient());
}

#[tokio::test]
async fn server_error_maps_to_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "key", "model").with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let err = backend.attempt(&prompt()).await.unwrap_err();
    assert_eq!(err.code(), "PROVIDER_ERROR");
    assert!(err.message().contains("500"));
}

#[tokio::test]
async fn empty_content_maps_to_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("   ")))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "key", "model").with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let err = backend.attempt(&prompt()).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_RESPONSE");
}

#[tokio::test]
async fn unparseable_body_maps_to_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "key", "model").with_base_url(mock_server.uri());
    let backend = RemoteBackend::new(config);

    let err = backend.attempt(&prompt()).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_RESPONSE");
}

#[tokio::test]
async fn engine_end_to_end_with_mock_remote_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(
            "Deadlines piling up like that is genuinely a lot - no wonder you feel stretched thin.",
        )))
        .mount(&mock_server)
        .await;

    let config = RemoteBackendConfig::new("remote", "key", "support-model")
        .with_base_url(mock_server.uri());
    let engine = SupportEngine::builder(EngineConfig::default())
        .with_backend(Arc::new(RemoteBackend::new(config)))
        .build()
        .unwrap();

    let result = engine
        .process(EngineRequest::from_text(
            "I feel really overwhelmed with work deadlines",
        ))
        .await
        .unwrap();

    assert_eq!(result.response_type, ResponseType::AiSupportive);
    assert_eq!(result.source_backend, "remote");
    assert!(result.response_message.contains("stretched thin"));
    assert_eq!(result.backends_attempted, vec!["remote".to_owned()]);
}

#[tokio::test]
async fn engine_falls_back_to_template_when_remote_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let config =
        RemoteBackendConfig::new("remote", "key", "model").with_base_url(mock_server.uri());
    let engine = SupportEngine::builder(EngineConfig::default())
        .with_backend(Arc::new(RemoteBackend::new(config)))
        .build()
        .unwrap();

    let result = engine
        .process(EngineRequest::from_text("I feel anxious about tomorrow"))
        .await
        .unwrap();

    assert_eq!(result.response_type, ResponseType::TemplateSupportive);
    assert_eq!(result.source_backend, "template");
    assert_eq!(
        result.backends_attempted,
        vec!["remote".to_owned(), "template".to_owned()]
    );
}
