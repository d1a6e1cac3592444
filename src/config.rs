//! Configuration types for the classification and orchestration engine.
//!
//! Every empirically tuned constant the engine relies on — confidence
//! normalization, classifier threshold, circuit-breaker threshold and open
//! duration, backend timeout, recommendation count, input clamp — is
//! exposed here rather than hard-coded. Defaults are chosen to satisfy the
//! engine's documented behavioral guarantees.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;
use crate::orchestrator::SelectionStrategy;

/// Top-level configuration for the support engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Emotion classifier settings.
    pub classifier: ClassifierConfig,
    /// Sentiment scorer settings.
    pub sentiment: SentimentConfig,
    /// Per-backend circuit breaker settings.
    pub breaker: BreakerConfig,
    /// Backend selection and timeout settings.
    pub orchestrator: OrchestratorConfig,
    /// Generated-response validation settings.
    pub safety: SafetyConfig,
    /// Coping tool recommendation settings.
    pub recommender: RecommenderConfig,
    /// Input handling limits.
    pub limits: LimitsConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read config file '{}': {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            EngineError::Config(format!(
                "failed to parse config file '{}': {e}",
                path.display()
            ))
        })
    }

    /// Write configuration atomically (temp file → fsync → rename), so a
    /// crash during write cannot corrupt the config file.
    pub fn save_atomic(&self, path: &Path) -> Result<(), EngineError> {
        use std::io::Write;

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("failed to serialize config: {e}")))?;

        let tmp_path = path.with_extension("toml.tmp");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!(
                    "failed to create config directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let mut file = std::fs::File::create(&tmp_path).map_err(|e| {
            EngineError::Config(format!(
                "failed to create temp file '{}': {e}",
                tmp_path.display()
            ))
        })?;
        file.write_all(toml_str.as_bytes())
            .map_err(|e| EngineError::Config(format!("failed to write temp file: {e}")))?;
        file.sync_all()
            .map_err(|e| EngineError::Config(format!("failed to sync temp file: {e}")))?;

        std::fs::rename(&tmp_path, path).map_err(|e| {
            EngineError::Config(format!(
                "failed to rename '{}' to '{}': {e}",
                tmp_path.display(),
                path.display()
            ))
        })
    }
}

/// Emotion classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Divisor mapping raw category scores to confidence; confidence is
    /// `min(1.0, raw / normalization_constant)`.
    pub normalization_constant: f32,
    /// Minimum raw score for a non-neutral primary category.
    pub min_category_score: f32,
    /// Maximum number of secondary emotions reported.
    pub max_secondary: usize,
    /// Maximum number of matched keywords reported.
    pub max_matched_keywords: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            normalization_constant: 4.0,
            min_category_score: 0.3,
            max_secondary: 3,
            max_matched_keywords: 5,
        }
    }
}

/// Sentiment scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// How many preceding tokens are scanned for a negation.
    pub negation_window: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self { negation_window: 3 }
    }
}

/// Circuit breaker configuration, shared by all generative backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures before a backend's circuit opens.
    pub failure_threshold: u32,
    /// How long an open circuit stays open before permitting a half-open
    /// trial call, in milliseconds.
    pub open_duration_ms: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_duration_ms: 30_000,
        }
    }
}

/// Backend selection and timeout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Preferred backend ordering, resolved once at engine construction.
    pub strategy: SelectionStrategy,
    /// Per-attempt wall-clock timeout in milliseconds. A timed-out call is
    /// cancelled and treated as a failure.
    pub attempt_timeout_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::GenerativeFirst,
            attempt_timeout_ms: 10_000,
        }
    }
}

/// Generated-response validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Minimum acceptable length for generated text, in characters.
    pub min_response_chars: usize,
    /// Maximum acceptable length for generated text, in characters.
    pub max_response_chars: usize,
    /// Sentiment value at or below which severity escalates from normal to
    /// elevated even without a phrase match.
    pub escalation_sentiment_floor: f32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            min_response_chars: 20,
            max_response_chars: 2_000,
            escalation_sentiment_floor: -0.8,
        }
    }
}

/// Coping tool recommendation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Maximum number of recommended tools.
    pub max_recommendations: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 3,
        }
    }
}

/// Input handling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Inputs longer than this many characters are clamped (never
    /// rejected) before processing.
    pub max_input_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 4_000,
        }
    }
}
