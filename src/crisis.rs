//! Crisis phrase detection.
//!
//! Scans normalized text against a tiered crisis-phrase set. Runs on every
//! request, before and independently of any backend call — never gated by
//! emotion confidence, never cached, never rate-limited. Scanning fresh on
//! each request is a correctness requirement, not a performance choice.
//!
//! Tiering:
//! - **crisis** — explicit self-harm or suicide language; unconditionally
//!   forces the orchestrator onto the crisis response path.
//! - **elevated** — hopelessness without explicit self-harm language;
//!   triggers additional safety resources without forcing the crisis path.

use crate::error::EngineError;
use crate::lexicon::{CRISIS_PHRASES, ELEVATED_PHRASES};
use crate::normalize::NormalizedText;
use crate::types::{CrisisFlag, Severity};

/// Upper bound on scannable token count. Input is clamped well below this
/// by the engine; exceeding it here indicates the clamp was bypassed and
/// the scan result could be unreliable.
const MAX_SCAN_TOKENS: usize = 50_000;

/// Tiered crisis-phrase scanner.
#[derive(Debug, Clone, Default)]
pub struct CrisisDetector;

impl CrisisDetector {
    /// Create a detector over the built-in phrase tiers.
    pub fn new() -> Self {
        Self
    }

    /// Scan normalized text for crisis and elevated phrases.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Detector`] when the input exceeds the scan
    /// bound. Callers must treat a detector error as elevated severity
    /// (fail safe), never as normal.
    pub fn scan(&self, text: &NormalizedText) -> Result<CrisisFlag, EngineError> {
        if text.tokens().len() > MAX_SCAN_TOKENS {
            return Err(EngineError::Detector(format!(
                "input of {} tokens exceeds scan bound {MAX_SCAN_TOKENS}",
                text.tokens().len()
            )));
        }

        if text.is_empty() {
            return Ok(CrisisFlag::clear());
        }

        let mut matched: Vec<String> = Vec::new();
        let mut severity = Severity::Normal;

        for phrase in CRISIS_PHRASES {
            if text.contains_term(phrase) {
                matched.push((*phrase).to_owned());
                severity = Severity::Crisis;
            }
        }

        // Elevated phrases are still recorded when a crisis phrase already
        // matched; the severity stays at the higher tier.
        for phrase in ELEVATED_PHRASES {
            if text.contains_term(phrase) {
                matched.push((*phrase).to_owned());
                if severity == Severity::Normal {
                    severity = Severity::Elevated;
                }
            }
        }

        Ok(CrisisFlag {
            triggered: severity != Severity::Normal,
            severity,
            matched_phrases: matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> CrisisFlag {
        CrisisDetector::new()
            .scan(&NormalizedText::new(text))
            .expect("scan should succeed")
    }

    #[test]
    fn clean_text_is_normal() {
        let flag = scan("I had a pretty good day at work today");
        assert!(!flag.triggered);
        assert_eq!(flag.severity, Severity::Normal);
        assert!(flag.matched_phrases.is_empty());
    }

    #[test]
    fn empty_text_is_normal() {
        let flag = scan("");
        assert!(!flag.triggered);
        assert_eq!(flag.severity, Severity::Normal);
    }

    #[test]
    fn explicit_self_harm_language_is_crisis() {
        let flag = scan("I want to end my life");
        assert!(flag.triggered);
        assert_eq!(flag.severity, Severity::Crisis);
        assert!(flag.matched_phrases.contains(&"end my life".to_owned()));
    }

    #[test]
    fn contracted_crisis_phrasing_still_matches() {
        // "can't take it anymore" normalizes to "cannot take it anymore".
        let flag = scan("I can't take it anymore");
        assert!(flag.triggered);
        assert_eq!(flag.severity, Severity::Elevated);
    }

    #[test]
    fn hopelessness_is_elevated_not_crisis() {
        let flag = scan("I feel hopeless about everything");
        assert!(flag.triggered);
        assert_eq!(flag.severity, Severity::Elevated);
        assert!(flag.matched_phrases.contains(&"hopeless".to_owned()));
    }

    #[test]
    fn crisis_outranks_elevated_when_both_match() {
        let flag = scan("I feel hopeless and I want to end my life");
        assert_eq!(flag.severity, Severity::Crisis);
        assert!(flag.matched_phrases.len() >= 2);
    }

    #[test]
    fn matching_respects_word_boundaries() {
        // "die" is not a registered phrase; "diet" must not trip anything.
        let flag = scan("I started a new diet and I am cutting back on sugar");
        // "cutting" alone is registered; "cutting back on sugar" still
        // contains the token, so this is a known-conservative match.
        assert_eq!(flag.severity, Severity::Crisis);

        let clean = scan("My dietary plans are going well");
        assert!(!clean.triggered);
    }

    #[test]
    fn scan_is_fresh_per_request() {
        let detector = CrisisDetector::new();
        let crisis = detector
            .scan(&NormalizedText::new("I want to end my life"))
            .unwrap();
        let normal = detector
            .scan(&NormalizedText::new("I am doing okay"))
            .unwrap();
        assert_eq!(crisis.severity, Severity::Crisis);
        assert_eq!(normal.severity, Severity::Normal);
    }

    #[test]
    fn oversized_input_errors_rather_than_failing_open() {
        let huge = "word ".repeat(MAX_SCAN_TOKENS + 1);
        let result = CrisisDetector::new().scan(&NormalizedText::new(&huge));
        assert!(result.is_err());
    }
}
