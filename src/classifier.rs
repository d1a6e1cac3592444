//! Emotion classification over lexicon matches and sentiment alignment.
//!
//! For each category the classifier sums matched keyword weights (phrases
//! count at 1.5x), compounds an intensifier boost per distinct intensifier
//! present, then aligns with sentiment polarity: negative sentiment boosts
//! distress-side categories, positive sentiment boosts uplift-side ones.
//!
//! Determinism is a designed invariant: categories are scored in a fixed
//! priority order and ties resolve to the earlier-declared category, so
//! identical input always produces the identical result. Downstream safety
//! logic depends on stable category selection.

use crate::config::ClassifierConfig;
use crate::lexicon::{self, EmotionEntry};
use crate::normalize::NormalizedText;
use crate::types::{ClassifierSource, EmotionResult, SecondaryEmotion, SentimentScore, Valence};

/// Multiplier applied to phrase matches over plain keyword matches.
const PHRASE_MULTIPLIER: f32 = 1.5;

/// Boost compounded once per distinct intensifier present in the text.
const INTENSIFIER_BOOST: f32 = 1.3;

/// Sentiment magnitude below which no alignment boost is applied.
const ALIGNMENT_DEADBAND: f32 = 0.1;

/// Minimum raw score for a category to appear among secondary emotions.
const SECONDARY_FLOOR: f32 = 0.2;

/// Cap applied to normalized secondary scores.
const SECONDARY_CAP: f32 = 0.9;

/// Lexicon-based emotion classifier.
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    config: ClassifierConfig,
}

impl EmotionClassifier {
    /// Create a classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify normalized text, combining lexicon matches with the
    /// sentiment score.
    ///
    /// Empty input yields a neutral result with confidence 0. If no
    /// category reaches the configured minimum score, the result is also
    /// neutral with confidence 0.
    pub fn classify(&self, text: &NormalizedText, sentiment: &SentimentScore) -> EmotionResult {
        if text.is_empty() {
            return EmotionResult::neutral(ClassifierSource::Default);
        }

        // Raw score per category, in fixed priority order.
        let scores: Vec<f32> = lexicon::EMOTION_TABLE
            .iter()
            .map(|entry| self.score_entry(entry, text, sentiment))
            .collect();

        // Strict `>` keeps the earlier-declared category on ties.
        let mut best_idx = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best_idx] {
                best_idx = i;
            }
        }
        let best_score = scores[best_idx];

        if best_score < self.config.min_category_score {
            return EmotionResult::neutral(ClassifierSource::Lexicon);
        }

        let entry = &lexicon::EMOTION_TABLE[best_idx];
        let confidence = (best_score / self.config.normalization_constant).min(1.0);

        let mut secondary: Vec<SecondaryEmotion> = scores
            .iter()
            .enumerate()
            .filter(|(i, score)| *i != best_idx && **score > SECONDARY_FLOOR)
            .map(|(i, score)| SecondaryEmotion {
                category: lexicon::EMOTION_TABLE[i].emotion,
                score: (score / best_score).min(SECONDARY_CAP),
            })
            .collect();
        // Stable sort: equal scores keep priority order.
        secondary.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        secondary.truncate(self.config.max_secondary);

        let matched_keywords: Vec<String> = entry
            .keywords
            .iter()
            .filter(|kw| text.contains_term(kw))
            .take(self.config.max_matched_keywords)
            .map(|kw| (*kw).to_owned())
            .collect();

        EmotionResult {
            primary: entry.emotion,
            confidence,
            secondary,
            matched_keywords,
            source: ClassifierSource::Lexicon,
        }
    }

    fn score_entry(
        &self,
        entry: &EmotionEntry,
        text: &NormalizedText,
        sentiment: &SentimentScore,
    ) -> f32 {
        let mut score = 0.0f32;

        for keyword in entry.keywords {
            if text.contains_term(keyword) {
                score += entry.weight;
            }
        }
        for phrase in entry.phrases {
            if text.contains_term(phrase) {
                score += entry.weight * PHRASE_MULTIPLIER;
            }
        }

        if score == 0.0 {
            return 0.0;
        }

        for intensifier in entry.intensifiers {
            if text.contains_term(intensifier) {
                score *= INTENSIFIER_BOOST;
            }
        }

        // Sentiment polarity alignment.
        let s = sentiment.value;
        match entry.emotion.valence() {
            Valence::Negative if s < -ALIGNMENT_DEADBAND => score *= 1.0 + s.abs(),
            Valence::Positive if s > ALIGNMENT_DEADBAND => score *= 1.0 + s,
            _ => {}
        }

        score
    }
}
