//! Coping tool catalog and recommender.
//!
//! A static catalog of guided coping techniques, filtered by target-emotion
//! membership and caller constraints, then ranked by (relevance descending,
//! duration ascending) and truncated to a configurable count. Deterministic
//! given the same catalog and inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RecommenderConfig;
use crate::types::Emotion;

/// The kind of technique a coping tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Breathing,
    Grounding,
    Mindfulness,
    Journaling,
    Physical,
    Cognitive,
}

impl ToolKind {
    /// Wire spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Breathing => "breathing",
            ToolKind::Grounding => "grounding",
            ToolKind::Mindfulness => "mindfulness",
            ToolKind::Journaling => "journaling",
            ToolKind::Physical => "physical",
            ToolKind::Cognitive => "cognitive",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty rating for a coping tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One entry in the static coping tool catalog.
#[derive(Debug)]
pub struct CopingTool {
    /// Stable tool id.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Technique kind.
    pub kind: ToolKind,
    /// One-line description.
    pub description: &'static str,
    /// Emotions this tool targets; the first entry is its primary target.
    pub targets: &'static [Emotion],
    /// Expected duration in minutes.
    pub duration_minutes: u32,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Step-by-step instructions.
    pub instructions: &'static [&'static str],
}

impl CopingTool {
    /// True when the tool's target set includes the emotion.
    pub fn targets_emotion(&self, emotion: Emotion) -> bool {
        self.targets.contains(&emotion)
    }

    /// Target-emotion match score: 1.0 for the primary target, 0.75 for
    /// any other listed target, 0.0 otherwise.
    pub fn match_score(&self, emotion: Emotion) -> f32 {
        if self.targets.first() == Some(&emotion) {
            1.0
        } else if self.targets_emotion(emotion) {
            0.75
        } else {
            0.0
        }
    }
}

/// A ranked recommendation derived from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopingRecommendation {
    /// Stable tool id.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Technique kind.
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// Expected duration in minutes.
    pub duration_minutes: u32,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Target-emotion match score.
    pub match_score: f32,
}

impl From<(&CopingTool, f32)> for CopingRecommendation {
    fn from((tool, match_score): (&CopingTool, f32)) -> Self {
        Self {
            id: tool.id.to_owned(),
            name: tool.name.to_owned(),
            kind: tool.kind,
            duration_minutes: tool.duration_minutes,
            difficulty: tool.difficulty,
            match_score,
        }
    }
}

/// Caller-supplied constraints on recommendations.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Upper bound on tool duration, in minutes.
    pub max_minutes: Option<u32>,
    /// Restrict to these kinds (empty = no restriction).
    pub kinds: Vec<ToolKind>,
    /// Restrict to this difficulty.
    pub difficulty: Option<Difficulty>,
}

// ── Catalog ─────────────────────────────────────────────────────────────

/// The static tool catalog.
pub const CATALOG: &[CopingTool] = &[
    CopingTool {
        id: "breathing_478",
        name: "4-7-8 Breathing",
        kind: ToolKind::Breathing,
        description: "A calming breathing technique to reduce anxiety and stress",
        targets: &[Emotion::Stressed, Emotion::Anxious],
        duration_minutes: 5,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Find a comfortable seated position with your back straight",
            "Exhale completely through your mouth",
            "Close your mouth and inhale through your nose for 4 counts",
            "Hold your breath for 7 counts",
            "Exhale through your mouth for 8 counts",
            "Repeat this cycle 3-4 times",
        ],
    },
    CopingTool {
        id: "breathing_box",
        name: "Box Breathing",
        kind: ToolKind::Breathing,
        description: "A structured breathing pattern that promotes calm and focus",
        targets: &[Emotion::Stressed, Emotion::Anxious, Emotion::Overwhelmed],
        duration_minutes: 5,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Sit comfortably with your feet flat on the floor",
            "Exhale completely to empty your lungs",
            "Inhale through your nose for 4 counts",
            "Hold your breath for 4 counts",
            "Exhale through your mouth for 4 counts",
            "Hold empty for 4 counts",
            "Repeat for 5-10 cycles",
        ],
    },
    CopingTool {
        id: "breathing_belly",
        name: "Belly Breathing",
        kind: ToolKind::Breathing,
        description: "Deep diaphragmatic breathing to activate relaxation",
        targets: &[Emotion::Stressed, Emotion::Anxious, Emotion::Angry],
        duration_minutes: 7,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Lie down or sit with one hand on your chest, one on your belly",
            "Breathe in slowly through your nose, letting your belly rise",
            "Your chest should stay relatively still",
            "Exhale slowly through your mouth, letting your belly fall",
            "Continue for 5-10 minutes, focusing on deep belly breaths",
        ],
    },
    CopingTool {
        id: "grounding_54321",
        name: "5-4-3-2-1 Grounding",
        kind: ToolKind::Grounding,
        description: "Use your senses to ground yourself in the present moment",
        targets: &[Emotion::Anxious, Emotion::Overwhelmed, Emotion::Stressed],
        duration_minutes: 5,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Take a deep breath and look around you",
            "Name 5 things you can see",
            "Name 4 things you can touch",
            "Name 3 things you can hear",
            "Name 2 things you can smell",
            "Name 1 thing you can taste",
            "Take another deep breath and notice how you feel now",
        ],
    },
    CopingTool {
        id: "grounding_body_scan",
        name: "Body Scan Grounding",
        kind: ToolKind::Grounding,
        description: "Systematically focus on different parts of your body",
        targets: &[Emotion::Stressed, Emotion::Anxious, Emotion::Overwhelmed],
        duration_minutes: 10,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Sit or lie down comfortably and close your eyes",
            "Start by noticing your breathing",
            "Slowly move your attention from the top of your head downward",
            "Notice any sensations in each area without judging them",
            "Finish by sensing your whole body as one connected unit",
        ],
    },
    CopingTool {
        id: "mindfulness_observation",
        name: "Mindful Observation",
        kind: ToolKind::Mindfulness,
        description: "Focus completely on observing one object or element",
        targets: &[Emotion::Anxious, Emotion::Stressed, Emotion::Overwhelmed],
        duration_minutes: 5,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Choose an object near you",
            "Look at it as if you have never seen it before",
            "Notice its color, shape, texture, and size",
            "If your mind wanders, gently return to the object",
            "Spend 3-5 minutes in complete observation",
        ],
    },
    CopingTool {
        id: "mindfulness_walking",
        name: "Mindful Walking",
        kind: ToolKind::Mindfulness,
        description: "Walk slowly with complete awareness of each step",
        targets: &[
            Emotion::Stressed,
            Emotion::Anxious,
            Emotion::Sad,
            Emotion::Neutral,
            Emotion::Positive,
        ],
        duration_minutes: 10,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Find a quiet space where you can walk 10-20 steps",
            "Begin walking much slower than normal",
            "Feel your feet lifting, moving, and touching the ground",
            "Notice the shifting of weight from foot to foot",
            "Continue for 5-10 minutes, staying present with each step",
        ],
    },
    CopingTool {
        id: "journaling_emotions",
        name: "Emotion Check-In Journal",
        kind: ToolKind::Journaling,
        description: "Write about your current emotions to process and understand them",
        targets: &[
            Emotion::Sad,
            Emotion::Confused,
            Emotion::Angry,
            Emotion::Overwhelmed,
            Emotion::Neutral,
        ],
        duration_minutes: 10,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Get a piece of paper or open a document",
            "Complete this sentence: 'Right now I am feeling...'",
            "Describe where you feel the emotion in your body",
            "Write about what might have triggered it",
            "Ask yourself what this emotion needs from you",
            "End with one small thing you can do to care for yourself",
        ],
    },
    CopingTool {
        id: "journaling_gratitude",
        name: "Gratitude Practice",
        kind: ToolKind::Journaling,
        description: "Focus on positive aspects of your life through gratitude",
        targets: &[
            Emotion::Grateful,
            Emotion::Sad,
            Emotion::Stressed,
            Emotion::Positive,
            Emotion::Excited,
            Emotion::Neutral,
        ],
        duration_minutes: 5,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Write down 3 things you are grateful for today",
            "For each item, explain why you are grateful for it",
            "Include at least one small, simple thing",
            "Include one thing about yourself that you appreciate",
            "Describe how focusing on gratitude affects your mood",
        ],
    },
    CopingTool {
        id: "physical_progressive_relaxation",
        name: "Progressive Muscle Relaxation",
        kind: ToolKind::Physical,
        description: "Systematically tense and relax muscle groups to release physical stress",
        targets: &[Emotion::Stressed, Emotion::Anxious, Emotion::Angry],
        duration_minutes: 15,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Lie down or sit comfortably",
            "Curl your toes tightly for 5 seconds, then relax",
            "Work upward through calves, thighs, stomach, hands, arms, shoulders",
            "Tense your facial muscles, then relax",
            "Finally, tense your whole body for 5 seconds, then completely relax",
            "Rest in the relaxed state for a few minutes",
        ],
    },
    CopingTool {
        id: "physical_stretching",
        name: "Gentle Stretching",
        kind: ToolKind::Physical,
        description: "Simple stretches to release tension and connect with your body",
        targets: &[Emotion::Stressed, Emotion::Overwhelmed, Emotion::Sad],
        duration_minutes: 7,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Stand with feet shoulder-width apart",
            "Slowly roll your shoulders back 5 times, then forward 5 times",
            "Gently turn your head left, hold for 10 seconds, then right",
            "Reach your arms overhead and stretch toward the ceiling",
            "Slowly bend toward your toes, going only as far as comfortable",
            "End by taking 3 deep breaths with your arms at your sides",
        ],
    },
    CopingTool {
        id: "cognitive_thought_challenging",
        name: "Thought Challenging",
        kind: ToolKind::Cognitive,
        description: "Examine and challenge negative or unhelpful thoughts",
        targets: &[
            Emotion::Anxious,
            Emotion::Stressed,
            Emotion::Sad,
            Emotion::Confused,
        ],
        duration_minutes: 10,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Identify the specific thought that is bothering you",
            "Write it down exactly as it appears in your mind",
            "Ask what evidence supports and contradicts it",
            "Ask how you would respond if a friend had this thought",
            "Rewrite the thought in a more balanced, realistic way",
        ],
    },
    CopingTool {
        id: "cognitive_worry_time",
        name: "Designated Worry Time",
        kind: ToolKind::Cognitive,
        description: "Set aside specific time for worries to prevent all-day rumination",
        targets: &[Emotion::Anxious, Emotion::Overwhelmed, Emotion::Stressed],
        duration_minutes: 15,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Choose a specific 15-minute time slot each day for worrying",
            "When worries come up, defer them to that slot",
            "During worry time, write down all your concerns",
            "For each worry, ask whether you can do something about it",
            "If yes, write down one action step; if no, practice accepting uncertainty",
            "When worry time is over, return to your daily activities",
        ],
    },
];

/// Look up a catalog tool by id.
pub fn tool_by_id(id: &str) -> Option<&'static CopingTool> {
    CATALOG.iter().find(|tool| tool.id == id)
}

// ── Recommender ─────────────────────────────────────────────────────────

/// Ranks catalog tools for a primary emotion under caller constraints.
#[derive(Debug, Clone)]
pub struct CopingRecommender {
    config: RecommenderConfig,
}

impl CopingRecommender {
    /// Create a recommender with the given configuration.
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    /// Recommend tools for an emotion.
    ///
    /// Only tools whose target set includes the emotion are considered.
    /// Results are ranked by match score descending, then duration
    /// ascending (catalog order breaks remaining ties), and truncated to
    /// the configured count.
    pub fn recommend(&self, emotion: Emotion, filter: &ToolFilter) -> Vec<CopingRecommendation> {
        let mut matches: Vec<(&CopingTool, f32)> = CATALOG
            .iter()
            .filter(|tool| tool.targets_emotion(emotion))
            .filter(|tool| {
                filter
                    .max_minutes
                    .is_none_or(|max| tool.duration_minutes <= max)
            })
            .filter(|tool| filter.kinds.is_empty() || filter.kinds.contains(&tool.kind))
            .filter(|tool| filter.difficulty.is_none_or(|d| tool.difficulty == d))
            .map(|tool| (tool, tool.match_score(emotion)))
            .collect();

        // Stable sort keeps catalog order for full ties.
        matches.sort_by(|(a, a_score), (b, b_score)| {
            b_score
                .partial_cmp(a_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.duration_minutes.cmp(&b.duration_minutes))
        });
        matches.truncate(self.config.max_recommendations);

        matches.into_iter().map(CopingRecommendation::from).collect()
    }
}
