//! Core domain types for the classification and orchestration pipeline.
//!
//! Provides the closed enums and immutable per-request values shared across
//! the engine:
//! - [`Emotion`] — the fixed set of emotion categories
//! - [`Intensity`] — magnitude label derived from sentiment score
//! - [`Severity`] — safety tier produced by the crisis detector
//! - [`EmotionResult`] / [`SentimentScore`] / [`CrisisFlag`] — per-request
//!   classification values
//! - [`ResponseCandidate`] / [`ResponseType`] — backend output
//! - [`OrchestrationResult`] — the externally visible aggregate
//!
//! Every value here is created fresh per inbound request and immutable once
//! constructed. Enum serde spellings are part of the external contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coping::CopingRecommendation;

/// The closed set of emotion categories the classifier can produce.
///
/// Declaration order is the tie-break priority: when two categories score
/// identically, the earlier-declared one wins. Acute, support-relevant
/// states come first so a tie resolves toward the category that needs the
/// most targeted response; `Neutral` is last and doubles as the fallback
/// for below-threshold input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Acute overload (drowning, swamped, at capacity).
    Overwhelmed,
    /// Pressure and strain (deadlines, burnout).
    Stressed,
    /// Worry and fear (racing thoughts, panic).
    Anxious,
    /// Low mood, grief, loneliness.
    Sad,
    /// Frustration through rage.
    Angry,
    /// Uncertainty, mixed feelings.
    Confused,
    /// High positive arousal.
    Excited,
    /// Appreciation and thankfulness.
    Grateful,
    /// Calm contentment.
    Positive,
    /// No dominant emotional signal.
    Neutral,
}

impl Emotion {
    /// All categories in tie-break priority order.
    pub const ALL: [Emotion; 10] = [
        Emotion::Overwhelmed,
        Emotion::Stressed,
        Emotion::Anxious,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Confused,
        Emotion::Excited,
        Emotion::Grateful,
        Emotion::Positive,
        Emotion::Neutral,
    ];

    /// Wire spelling of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Overwhelmed => "overwhelmed",
            Emotion::Stressed => "stressed",
            Emotion::Anxious => "anxious",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Confused => "confused",
            Emotion::Excited => "excited",
            Emotion::Grateful => "grateful",
            Emotion::Positive => "positive",
            Emotion::Neutral => "neutral",
        }
    }

    /// Valence group used for sentiment-alignment boosts.
    pub fn valence(&self) -> Valence {
        match self {
            Emotion::Overwhelmed
            | Emotion::Stressed
            | Emotion::Anxious
            | Emotion::Sad
            | Emotion::Angry => Valence::Negative,
            Emotion::Excited | Emotion::Grateful | Emotion::Positive => Valence::Positive,
            Emotion::Confused | Emotion::Neutral => Valence::Balanced,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Valence group of an emotion category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Valence {
    /// Distress-side categories, boosted by negative sentiment.
    Negative,
    /// Uplift-side categories, boosted by positive sentiment.
    Positive,
    /// Categories unaffected by sentiment alignment.
    Balanced,
}

/// Intensity label derived from sentiment magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// |score| below 0.08.
    Low,
    /// |score| in [0.08, 0.20).
    Medium,
    /// |score| in [0.20, 0.40).
    High,
    /// |score| of 0.40 or above.
    Extreme,
}

impl Intensity {
    /// Bucket a sentiment magnitude into an intensity label.
    ///
    /// Thresholds assume the scorer's token-count normalization, where even
    /// strongly charged messages rarely exceed |0.5|.
    pub fn from_magnitude(magnitude: f32) -> Self {
        let m = magnitude.abs();
        if m >= 0.40 {
            Intensity::Extreme
        } else if m >= 0.20 {
            Intensity::High
        } else if m >= 0.08 {
            Intensity::Medium
        } else {
            Intensity::Low
        }
    }

    /// Wire spelling of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::Extreme => "extreme",
        }
    }

    /// Index used to key fixed template-variant tables.
    pub fn variant_index(&self) -> usize {
        match self {
            Intensity::Low => 0,
            Intensity::Medium => 1,
            Intensity::High => 2,
            Intensity::Extreme => 3,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Safety tier produced by the crisis detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No safety concern detected.
    Normal,
    /// Hopelessness or high distress without explicit self-harm language.
    Elevated,
    /// Explicit crisis language; forces the crisis response path.
    Crisis,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Normal => "normal",
            Severity::Elevated => "elevated",
            Severity::Crisis => "crisis",
        };
        write!(f, "{s}")
    }
}

/// Continuous polarity score plus its derived intensity label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Polarity in `[-1.0, 1.0]`; negative is distress-side.
    pub value: f32,
    /// Magnitude bucket of `value`.
    pub intensity: Intensity,
}

impl SentimentScore {
    /// Build a score, clamping the value into `[-1.0, 1.0]`.
    pub fn new(value: f32) -> Self {
        let clamped = value.clamp(-1.0, 1.0);
        Self {
            value: clamped,
            intensity: Intensity::from_magnitude(clamped),
        }
    }

    /// A zero score with low intensity (empty or unscoreable input).
    pub fn neutral() -> Self {
        Self::new(0.0)
    }
}

/// Which classifier produced an [`EmotionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierSource {
    /// Lexicon keyword/phrase scoring.
    Lexicon,
    /// Empty or unscoreable input; nothing was classified.
    Default,
}

/// A secondary emotion with its normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEmotion {
    /// The category.
    pub category: Emotion,
    /// Score relative to the primary, capped below 1.0.
    pub score: f32,
}

/// Output of the emotion classifier.
///
/// `confidence` is monotonic in the number and weight of matched lexicon
/// entries and capped at 1.0. `primary` is always the top-ranked category;
/// ties resolve by [`Emotion`] declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    /// Top-ranked category.
    pub primary: Emotion,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Ranked runners-up (highest first).
    pub secondary: Vec<SecondaryEmotion>,
    /// Lexicon keywords that matched the primary category.
    pub matched_keywords: Vec<String>,
    /// Which classifier produced this result.
    pub source: ClassifierSource,
}

impl EmotionResult {
    /// Neutral result with zero confidence (empty input, no matches).
    pub fn neutral(source: ClassifierSource) -> Self {
        Self {
            primary: Emotion::Neutral,
            confidence: 0.0,
            secondary: Vec::new(),
            matched_keywords: Vec::new(),
            source,
        }
    }
}

/// Output of the crisis detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisFlag {
    /// True when any crisis- or elevated-tier phrase matched.
    pub triggered: bool,
    /// Safety tier; [`Severity::Crisis`] forces the crisis response path.
    pub severity: Severity,
    /// The phrases that matched, in scan order.
    pub matched_phrases: Vec<String>,
}

impl CrisisFlag {
    /// A clear flag: nothing matched.
    pub fn clear() -> Self {
        Self {
            triggered: false,
            severity: Severity::Normal,
            matched_phrases: Vec::new(),
        }
    }

    /// Fail-safe flag used when the detector itself errors: the request is
    /// treated as elevated, never as normal.
    pub fn degraded() -> Self {
        Self {
            triggered: true,
            severity: Severity::Elevated,
            matched_phrases: Vec::new(),
        }
    }
}

/// The kind of response a backend produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Generated by an external generative backend.
    AiSupportive,
    /// Selected from the fixed rule-based template table.
    TemplateSupportive,
    /// The fixed crisis-intervention response.
    CrisisIntervention,
}

impl ResponseType {
    /// Wire spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::AiSupportive => "ai_supportive",
            ResponseType::TemplateSupportive => "template_supportive",
            ResponseType::CrisisIntervention => "crisis_intervention",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single response produced by one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCandidate {
    /// The supportive message text.
    pub message: String,
    /// What kind of response this is.
    pub response_type: ResponseType,
    /// Id of the backend that produced it.
    pub backend_id: String,
    /// Generation latency in milliseconds.
    pub latency_ms: u64,
}

/// A support resource surfaced alongside a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResource {
    /// Organization or service name.
    pub name: String,
    /// Phone number, SMS shortcode, or URL.
    pub contact: String,
    /// One-line description.
    pub description: String,
}

impl SupportResource {
    /// Build a resource from static table entries.
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            description: description.into(),
        }
    }
}

/// Safety block of the orchestration result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// True when severity is elevated or crisis.
    pub intervention_triggered: bool,
    /// Final safety tier for the request.
    pub severity: Severity,
    /// Resources appropriate to the tier and emotion.
    pub resources: Vec<SupportResource>,
}

/// Per-request preference for which backend family answers first.
///
/// A preference reorders the resolved backend list for that request only.
/// It cannot un-skip an open circuit and never removes the template floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredBackend {
    /// Try generative backends first.
    Generative,
    /// Answer from the rule-based template backend.
    Template,
}

/// Coarse time-of-day hint supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Optional caller-supplied context for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    /// Coarse local time of day.
    pub time_of_day: Option<TimeOfDay>,
    /// How many prior sessions this user has had.
    pub prior_session_count: Option<u32>,
    /// Per-request backend preference.
    pub preferred_backend: Option<PreferredBackend>,
    /// Upper bound on recommended tool duration, in minutes.
    pub max_tool_minutes: Option<u32>,
    /// Restrict recommendations to these tool kinds (empty = no filter).
    pub preferred_tool_kinds: Vec<crate::coping::ToolKind>,
}

/// The externally visible aggregate for one processed request.
///
/// Serializes to the engine's output contract; the caller always receives a
/// complete result, never a partial one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Primary emotion category.
    pub primary_emotion: Emotion,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Ranked secondary emotions.
    pub secondary_emotions: Vec<SecondaryEmotion>,
    /// Sentiment polarity in `[-1.0, 1.0]`.
    pub sentiment_score: f32,
    /// Intensity label derived from sentiment magnitude.
    pub intensity: Intensity,
    /// The chosen supportive message.
    pub response_message: String,
    /// What kind of response was chosen.
    pub response_type: ResponseType,
    /// Id of the backend that produced the message.
    pub source_backend: String,
    /// Ranked coping-tool recommendations.
    pub coping_tools: Vec<CopingRecommendation>,
    /// Gentle follow-up prompts matched to the emotion.
    pub follow_up_questions: Vec<String>,
    /// Safety determination and resources.
    pub safety: SafetyReport,
    /// Backends actually attempted, in order (skipped backends excluded).
    pub backends_attempted: Vec<String>,
    /// Total wall-clock processing time.
    pub processing_time_ms: u64,
}
