//! Lexicon-based sentiment scoring.
//!
//! Produces a continuous polarity score in `[-1.0, 1.0]` from normalized
//! text, independent of category classification. Each valenced token
//! contributes a signed weight; a negation token within a fixed lookback
//! window inverts the sign, and an intensifier immediately before the token
//! scales it. The aggregate is normalized by token count and clamped.
//!
//! Deterministic and side-effect free: the same input always yields the
//! same score.

use crate::lexicon;
use crate::normalize::NormalizedText;
use crate::types::SentimentScore;

/// Default number of preceding tokens scanned for a negation.
pub const DEFAULT_NEGATION_WINDOW: usize = 3;

/// Valence scorer over normalized token sequences.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    negation_window: usize,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self {
            negation_window: DEFAULT_NEGATION_WINDOW,
        }
    }
}

impl SentimentScorer {
    /// Create a scorer with a custom negation lookback window.
    pub fn new(negation_window: usize) -> Self {
        Self { negation_window }
    }

    /// Score normalized text. Empty input scores exactly neutral.
    pub fn score(&self, text: &NormalizedText) -> SentimentScore {
        let tokens = text.tokens();
        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let mut sum = 0.0f32;
        for (i, token) in tokens.iter().enumerate() {
            let Some(base) = lexicon::valence_of(token) else {
                continue;
            };

            let mut weight = base;

            // Intensifier directly before the valenced token.
            if i > 0 {
                if let Some(mult) = lexicon::intensifier_of(&tokens[i - 1]) {
                    weight *= mult;
                }
            }

            // Negation anywhere in the lookback window flips the sign.
            let window_start = i.saturating_sub(self.negation_window);
            if tokens[window_start..i].iter().any(|t| lexicon::is_negation(t)) {
                weight = -weight;
            }

            sum += weight;
        }

        SentimentScore::new(sum / tokens.len() as f32)
    }
}
