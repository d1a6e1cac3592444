//! Text normalization for classification and crisis scanning.
//!
//! Produces an immutable [`NormalizedText`] per request: lowercased,
//! contractions expanded, punctuation stripped, whitespace collapsed, and
//! tokenized. Pure computation with no failure modes; the empty string is
//! valid input and yields an empty normalized form.

/// Contraction expansions applied after lowercasing, before punctuation
/// stripping. Fixed table so normalization stays deterministic.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("couldn't", "could not"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
    ("i'm", "i am"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("you're", "you are"),
    ("we're", "we are"),
    ("they're", "they are"),
];

/// Immutable normalized view of one request's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    original: String,
    joined: String,
    tokens: Vec<String>,
}

impl NormalizedText {
    /// Normalize raw input text.
    pub fn new(text: &str) -> Self {
        let mut lower = text.to_lowercase();
        for (from, to) in CONTRACTIONS {
            if lower.contains(from) {
                lower = lower.replace(from, to);
            }
        }

        let cleaned: String = lower
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        let tokens: Vec<String> = cleaned.split_whitespace().map(str::to_owned).collect();
        let joined = tokens.join(" ");

        Self {
            original: text.to_owned(),
            joined,
            tokens,
        }
    }

    /// The raw input text as received.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Normalized form: lowercase tokens joined by single spaces.
    pub fn joined(&self) -> &str {
        &self.joined
    }

    /// The token sequence.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when no tokens survived normalization.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Word-boundary-aware containment test for a normalized term.
    ///
    /// Works for single tokens and multi-word phrases alike; `"down"` does
    /// not match inside `"download"`.
    pub fn contains_term(&self, term: &str) -> bool {
        if term.is_empty() || self.joined.is_empty() {
            return false;
        }
        let padded = format!(" {} ", self.joined);
        padded.contains(&format!(" {term} "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let norm = NormalizedText::new("I feel REALLY stressed!!!");
        assert_eq!(norm.joined(), "i feel really stressed");
        assert_eq!(norm.tokens().len(), 4);
    }

    #[test]
    fn expands_contractions() {
        let norm = NormalizedText::new("I can't cope and I don't know why");
        assert_eq!(norm.joined(), "i cannot cope and i do not know why");
    }

    #[test]
    fn expands_contractions_case_insensitively() {
        let norm = NormalizedText::new("I CAN'T take it");
        assert!(norm.contains_term("cannot take it"));
    }

    #[test]
    fn empty_string_is_valid() {
        let norm = NormalizedText::new("");
        assert!(norm.is_empty());
        assert_eq!(norm.joined(), "");
        assert!(!norm.contains_term("anything"));
    }

    #[test]
    fn whitespace_only_is_empty() {
        let norm = NormalizedText::new("   \t\n  ");
        assert!(norm.is_empty());
    }

    #[test]
    fn contains_term_respects_word_boundaries() {
        let norm = NormalizedText::new("I started a download");
        assert!(!norm.contains_term("down"));
        assert!(norm.contains_term("download"));
    }

    #[test]
    fn contains_term_matches_phrases() {
        let norm = NormalizedText::new("There is just too much to handle right now.");
        assert!(norm.contains_term("too much to handle"));
        assert!(!norm.contains_term("too little"));
    }

    #[test]
    fn preserves_original_text() {
        let raw = "I Can't Cope!";
        let norm = NormalizedText::new(raw);
        assert_eq!(norm.original(), raw);
    }

    #[test]
    fn punctuation_does_not_split_phrases_weirdly() {
        let norm = NormalizedText::new("deadlines, deadlines... deadlines");
        assert_eq!(norm.tokens().len(), 3);
        assert!(norm.contains_term("deadlines"));
    }

    #[test]
    fn normalization_is_deterministic() {
        let a = NormalizedText::new("I feel really overwhelmed with work deadlines");
        let b = NormalizedText::new("I feel really overwhelmed with work deadlines");
        assert_eq!(a, b);
    }
}
