//! Static lexicon tables for classification, sentiment, and crisis scanning.
//!
//! Loaded once at compile time and immutable thereafter. All entries are
//! stored in normalized form (lowercase, contractions expanded, no
//! punctuation) so they match [`NormalizedText`](crate::normalize::NormalizedText)
//! output directly.

use crate::types::Emotion;

/// One emotion category's keyword/phrase/intensifier sets.
#[derive(Debug)]
pub struct EmotionEntry {
    /// The category this entry scores.
    pub emotion: Emotion,
    /// Base weight contributed by each keyword match.
    pub weight: f32,
    /// Single words and short collocations; substring-matched.
    pub keywords: &'static [&'static str],
    /// Multi-word phrases; matched at 1.5x the base weight.
    pub phrases: &'static [&'static str],
    /// Intensifiers that boost this category's score when present.
    pub intensifiers: &'static [&'static str],
}

/// Per-category lexicon, in [`Emotion`] tie-break priority order.
pub const EMOTION_TABLE: &[EmotionEntry] = &[
    EmotionEntry {
        emotion: Emotion::Overwhelmed,
        weight: 1.0,
        keywords: &[
            "overwhelmed",
            "too much",
            "cannot handle",
            "drowning",
            "swamped",
            "buried",
            "crushed",
            "suffocated",
            "flooded",
            "overloaded",
            "breaking point",
            "at capacity",
        ],
        phrases: &[
            "feel overwhelmed",
            "too much to handle",
            "drowning in",
            "cannot keep up",
            "falling behind",
        ],
        intensifiers: &["completely", "totally", "absolutely", "utterly", "really", "so"],
    },
    EmotionEntry {
        emotion: Emotion::Stressed,
        weight: 1.0,
        keywords: &[
            "stressed",
            "pressure",
            "burden",
            "deadline",
            "deadlines",
            "tense",
            "exhausted",
            "burnout",
            "burned out",
            "at my limit",
        ],
        phrases: &[
            "feel stressed",
            "under pressure",
            "so much work",
            "cannot cope",
            "burning out",
        ],
        intensifiers: &["extremely", "really", "so", "very", "incredibly"],
    },
    EmotionEntry {
        emotion: Emotion::Anxious,
        weight: 1.0,
        keywords: &[
            "anxious",
            "nervous",
            "worry",
            "worried",
            "fear",
            "scared",
            "afraid",
            "panic",
            "restless",
            "uneasy",
            "apprehensive",
            "jittery",
            "what if",
            "worst case",
        ],
        phrases: &[
            "feel anxious",
            "cannot stop worrying",
            "panic attack",
            "racing thoughts",
            "heart racing",
            "cannot stop thinking",
        ],
        intensifiers: &["extremely", "really", "so", "very", "incredibly"],
    },
    EmotionEntry {
        emotion: Emotion::Sad,
        weight: 1.0,
        keywords: &[
            "sad",
            "depressed",
            "down",
            "blue",
            "melancholy",
            "gloomy",
            "unhappy",
            "miserable",
            "heartbroken",
            "disappointed",
            "crying",
            "tears",
            "empty",
            "lonely",
            "hopeless",
        ],
        phrases: &[
            "feel sad",
            "feeling down",
            "cannot stop crying",
            "feel empty",
            "so alone",
            "lost hope",
        ],
        intensifiers: &["extremely", "really", "so", "very", "deeply"],
    },
    EmotionEntry {
        emotion: Emotion::Angry,
        weight: 0.9,
        keywords: &[
            "angry",
            "mad",
            "furious",
            "rage",
            "irritated",
            "annoyed",
            "frustrated",
            "livid",
            "outraged",
            "fed up",
            "hate",
            "disgusted",
            "resentful",
        ],
        phrases: &[
            "so angry",
            "cannot stand",
            "makes me mad",
            "losing my temper",
            "want to scream",
        ],
        intensifiers: &["extremely", "really", "so", "very", "incredibly"],
    },
    EmotionEntry {
        emotion: Emotion::Confused,
        weight: 0.6,
        keywords: &[
            "confused",
            "lost",
            "uncertain",
            "unclear",
            "puzzled",
            "bewildered",
            "mixed up",
            "do not understand",
            "not sure",
            "complicated",
            "conflicted",
        ],
        phrases: &[
            "not sure what",
            "feel lost",
            "mixed feelings",
            "do not know what",
        ],
        intensifiers: &["really", "completely", "totally", "so"],
    },
    EmotionEntry {
        emotion: Emotion::Excited,
        weight: 0.8,
        keywords: &[
            "excited",
            "thrilled",
            "ecstatic",
            "elated",
            "overjoyed",
            "amazing",
            "awesome",
            "fantastic",
            "wonderful",
            "happy",
            "joy",
            "delighted",
            "pumped",
        ],
        phrases: &[
            "so excited",
            "cannot wait",
            "over the moon",
            "feel amazing",
            "best day ever",
        ],
        intensifiers: &["extremely", "really", "so", "very", "incredibly"],
    },
    EmotionEntry {
        emotion: Emotion::Grateful,
        weight: 0.8,
        keywords: &[
            "grateful",
            "thankful",
            "blessed",
            "appreciate",
            "lucky",
            "fortunate",
            "thank you",
            "thanks",
        ],
        phrases: &[
            "feel grateful",
            "so thankful",
            "feel blessed",
            "appreciate that",
            "lucky to have",
        ],
        intensifiers: &["really", "so", "very", "deeply"],
    },
    EmotionEntry {
        emotion: Emotion::Positive,
        weight: 0.7,
        keywords: &[
            "good",
            "fine",
            "okay",
            "alright",
            "decent",
            "content",
            "satisfied",
            "peaceful",
            "calm",
            "optimistic",
            "hopeful",
        ],
        phrases: &[
            "feel good",
            "doing well",
            "things are okay",
            "feeling better",
        ],
        intensifiers: &["really", "pretty", "quite", "fairly"],
    },
    EmotionEntry {
        emotion: Emotion::Neutral,
        weight: 0.5,
        keywords: &[
            "neutral",
            "normal",
            "average",
            "routine",
            "typical",
            "nothing special",
            "same as usual",
            "meh",
            "whatever",
        ],
        phrases: &[
            "pretty normal",
            "just okay",
            "not much happening",
        ],
        intensifiers: &[],
    },
];

/// Look up the lexicon entry for a category.
pub fn entry_for(emotion: Emotion) -> Option<&'static EmotionEntry> {
    EMOTION_TABLE.iter().find(|e| e.emotion == emotion)
}

// ── Crisis phrase tiers ─────────────────────────────────────────────────

/// Explicit self-harm or suicide language. Any match forces the crisis
/// response path unconditionally.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "hurt myself",
    "self harm",
    "cutting",
    "overdose",
    "want to die",
    "better off dead",
    "end it all",
    "no point in living",
    "want to disappear",
];

/// Hopelessness and exhaustion without explicit self-harm language. Raises
/// severity to elevated and attaches additional safety resources without
/// forcing the crisis path.
pub const ELEVATED_PHRASES: &[&str] = &[
    "hopeless",
    "worthless",
    "cannot go on",
    "cannot take it anymore",
    "death wish",
    "no way out",
    "give up on everything",
];

// ── Sentiment valence lexicon ───────────────────────────────────────────

/// Token-level valence weights. Positive weights are uplift-side.
pub const VALENCE_TABLE: &[(&str, f32)] = &[
    // Positive
    ("good", 0.5),
    ("great", 0.7),
    ("love", 0.8),
    ("loved", 0.7),
    ("wonderful", 0.8),
    ("amazing", 0.8),
    ("fantastic", 0.8),
    ("awesome", 0.8),
    ("excellent", 0.8),
    ("happy", 0.7),
    ("joy", 0.8),
    ("excited", 0.7),
    ("thrilled", 0.8),
    ("delighted", 0.8),
    ("grateful", 0.7),
    ("thankful", 0.7),
    ("blessed", 0.7),
    ("hopeful", 0.6),
    ("optimistic", 0.6),
    ("calm", 0.4),
    ("peaceful", 0.5),
    ("relieved", 0.5),
    ("proud", 0.6),
    ("better", 0.4),
    ("fine", 0.3),
    ("okay", 0.2),
    // Negative
    ("sad", -0.6),
    ("stressed", -0.6),
    ("anxious", -0.6),
    ("worried", -0.5),
    ("worry", -0.5),
    ("afraid", -0.6),
    ("scared", -0.6),
    ("fear", -0.6),
    ("nervous", -0.5),
    ("uneasy", -0.4),
    ("angry", -0.7),
    ("furious", -0.8),
    ("frustrated", -0.6),
    ("annoyed", -0.4),
    ("upset", -0.5),
    ("hate", -0.8),
    ("terrible", -0.8),
    ("awful", -0.8),
    ("horrible", -0.8),
    ("depressed", -0.8),
    ("miserable", -0.8),
    ("gloomy", -0.6),
    ("unhappy", -0.6),
    ("disappointed", -0.6),
    ("heartbroken", -0.9),
    ("hopeless", -0.9),
    ("worthless", -0.9),
    ("overwhelmed", -0.6),
    ("exhausted", -0.5),
    ("drowning", -0.6),
    ("lonely", -0.6),
    ("alone", -0.4),
    ("empty", -0.5),
    ("panic", -0.7),
    ("crying", -0.6),
    ("tears", -0.5),
    ("hurt", -0.5),
    ("pain", -0.5),
    ("bad", -0.5),
    ("worse", -0.6),
    ("worst", -0.8),
    ("tired", -0.3),
    ("pressure", -0.4),
    ("burden", -0.5),
    ("deadline", -0.3),
    ("deadlines", -0.3),
];

/// Tokens that invert the sign of following valence weights.
pub const NEGATION_TOKENS: &[&str] = &[
    "not", "no", "never", "cannot", "nothing", "hardly", "barely", "without",
];

/// Tokens that scale the immediately following valence weight.
pub const SENTIMENT_INTENSIFIERS: &[(&str, f32)] = &[
    ("extremely", 1.6),
    ("incredibly", 1.6),
    ("absolutely", 1.6),
    ("utterly", 1.6),
    ("completely", 1.5),
    ("totally", 1.5),
    ("deeply", 1.4),
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("quite", 1.2),
    ("pretty", 1.2),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

/// Look up a token's valence weight.
pub fn valence_of(token: &str) -> Option<f32> {
    VALENCE_TABLE
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, weight)| *weight)
}

/// Look up a token's sentiment-intensifier multiplier.
pub fn intensifier_of(token: &str) -> Option<f32> {
    SENTIMENT_INTENSIFIERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, mult)| *mult)
}

/// True if the token inverts following valence weights.
pub fn is_negation(token: &str) -> bool {
    NEGATION_TOKENS.contains(&token)
}
