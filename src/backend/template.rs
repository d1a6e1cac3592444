//! Rule-based template backend.
//!
//! Selects a response from a fixed template table keyed by (primary
//! emotion, intensity). Always succeeds, is exempt from circuit-breaker
//! gating, and serves as the availability guarantee of last resort. Also
//! owns the fixed crisis-intervention response and the per-emotion
//! follow-up question tables.
//!
//! Selection is fully deterministic: each emotion has four
//! validation/support variants indexed by intensity, so identical input
//! always produces the identical message.

use async_trait::async_trait;

use super::adapter::{BackendAdapter, BackendKind, GenerationPrompt};
use super::error::BackendError;
use crate::types::{Emotion, Intensity, ResponseCandidate, ResponseType, Severity};

/// Backend id of the template backend.
pub const TEMPLATE_BACKEND_ID: &str = "template";

/// Backend id attached to the synthesized crisis response.
pub const CRISIS_SOURCE_ID: &str = "crisis-protocol";

// ── Template tables ─────────────────────────────────────────────────────
//
// Four variants per emotion, indexed by intensity (low → extreme).

fn validation_phrases(emotion: Emotion) -> [&'static str; 4] {
    match emotion {
        Emotion::Overwhelmed => [
            "It sounds like you have a lot on your plate right now.",
            "Feeling overwhelmed is a sign that you're dealing with a lot.",
            "It's completely normal to feel this way when facing so much at once.",
            "When everything feels like too much, those feelings are completely valid.",
        ],
        Emotion::Stressed => [
            "It sounds like you're carrying a lot right now.",
            "Feeling stressed is completely understandable given what you're going through.",
            "I can hear that you're under real pressure, and that's valid.",
            "Your feelings of stress are completely legitimate.",
        ],
        Emotion::Anxious => [
            "It's understandable that you're feeling anxious about this.",
            "I hear that you're feeling worried, and those feelings are valid.",
            "Anxiety can feel really overwhelming, and I want you to know that's okay.",
            "Anxiety is difficult to deal with, and you're not alone in feeling this way.",
        ],
        Emotion::Sad => [
            "I'm sorry you're feeling this way right now.",
            "It's okay to feel sad - these emotions are part of being human.",
            "Your sadness is valid, and it's important to acknowledge these feelings.",
            "I can hear the pain in what you're sharing, and that takes courage.",
        ],
        Emotion::Angry => [
            "It makes sense that you'd feel frustrated about this situation.",
            "It sounds like something has really upset you, and that's understandable.",
            "Feeling angry can be really intense, and it's okay to feel this way.",
            "Your feelings of anger are valid and deserve to be acknowledged.",
        ],
        Emotion::Confused => [
            "It's okay to feel uncertain - confusion is a natural part of processing things.",
            "Not knowing how to feel or what to think is completely normal.",
            "It sounds like you're working through some complex feelings.",
            "It's alright to not have everything figured out right now.",
        ],
        Emotion::Excited => [
            "It sounds like something really good is happening for you.",
            "It's great to hear such positive energy in your message.",
            "I can feel your excitement, and that's wonderful!",
            "Your excitement is contagious - thank you for sharing this joy!",
        ],
        Emotion::Grateful => [
            "It's beautiful to hear you expressing gratitude.",
            "I'm glad you're able to recognize the good things in your life.",
            "Gratitude is such a powerful and positive emotion.",
            "Your gratitude is a lovely reminder of life's positive moments.",
        ],
        Emotion::Positive => [
            "I'm so glad to hear you're feeling good.",
            "It sounds like things are going well for you right now.",
            "It's wonderful that you're in a positive headspace.",
            "Your positive energy is really uplifting.",
        ],
        Emotion::Neutral => [
            "Thank you for sharing how you're feeling right now.",
            "I appreciate you taking the time to check in.",
            "It's perfectly okay to feel neutral sometimes.",
            "I'm here to listen to whatever you're experiencing.",
        ],
    }
}

fn support_phrases(emotion: Emotion) -> [&'static str; 4] {
    match emotion {
        Emotion::Overwhelmed => [
            "Remember, you don't have to solve everything at once.",
            "Breaking things down into smaller steps can make them more manageable.",
            "It's okay to ask for help when you're feeling overwhelmed.",
            "Taking a step back and breathing can help clear your perspective.",
        ],
        Emotion::Stressed => [
            "Remember, it's okay to take things one step at a time.",
            "You don't have to handle everything perfectly - just doing your best is enough.",
            "Stress is temporary, even when it doesn't feel like it.",
            "You've handled difficult situations before, and you can get through this too.",
        ],
        Emotion::Anxious => [
            "Remember that anxious thoughts are just thoughts, not facts.",
            "You're not alone in feeling this way - anxiety affects many people.",
            "Taking things moment by moment can help when anxiety feels overwhelming.",
            "You have the strength to get through this anxious moment.",
        ],
        Emotion::Sad => [
            "It's okay to sit with these feelings for a while - they're part of healing.",
            "Even in sadness, you're showing strength by reaching out.",
            "This difficult time will pass, even though it's hard to see right now.",
            "Your feelings matter, and so do you.",
        ],
        Emotion::Angry => [
            "Sometimes anger is trying to tell us something important about our boundaries.",
            "It's okay to feel angry - the key is finding healthy ways to express it.",
            "Taking time to cool down can help you think more clearly.",
            "Your anger is valid, and it's important to process these feelings safely.",
        ],
        Emotion::Confused => [
            "Confusion often precedes clarity - you're in a process of figuring things out.",
            "It's okay to sit with uncertainty while you process your thoughts.",
            "Sometimes the best thing to do is give yourself time to think.",
            "Not having all the answers right now is perfectly human.",
        ],
        Emotion::Excited => [
            "Enjoy this feeling - you deserve to feel excited and happy.",
            "It's great to see you feeling so positive about something.",
            "Your enthusiasm is inspiring and contagious.",
            "These positive moments are so important to celebrate.",
        ],
        Emotion::Grateful => [
            "Gratitude has such a positive impact on our overall wellbeing.",
            "Your appreciation for life's moments is truly special.",
            "Gratitude can be a powerful tool for maintaining perspective.",
            "It's wonderful that you can see the good even during challenging times.",
        ],
        Emotion::Positive => [
            "These positive feelings are worth celebrating and holding onto.",
            "It's wonderful when life feels good and balanced.",
            "You deserve to feel this way - soak it in!",
            "Positive moments like these can carry us through tougher times.",
        ],
        Emotion::Neutral => [
            "Sometimes neutral is exactly where we need to be.",
            "There's peace in feeling balanced and steady.",
            "It's okay to just be where you are right now.",
            "Not every day needs to be intense - calm is valuable too.",
        ],
    }
}

/// Appended when the request carries elevated severity.
const PROFESSIONAL_HELP_ENCOURAGEMENT: &str = "While I'm here to support you, it might \
    be really helpful to talk to a counselor or therapist who can provide more \
    personalized guidance. Seeking professional help is a sign of strength, not weakness.";

/// The fixed crisis-intervention message.
const CRISIS_MESSAGE: &str = "I'm really concerned about what you've shared. Your life \
    has value, and there are people who want to help you through this difficult time. \
    Please reach out for support right now - you don't have to face this alone. \
    Mental health professionals are trained to help with exactly what you're experiencing.";

/// Follow-up questions for the crisis path.
pub const CRISIS_FOLLOW_UPS: &[&str] = &[
    "Is there someone you can call right now?",
    "Are you in a safe place?",
    "Would you like help finding local crisis resources?",
];

/// Follow-up questions matched to an emotion.
pub fn follow_up_questions(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Overwhelmed => &[
            "What feels like the most urgent thing on your plate?",
            "What's one task you could let go of or ask for help with?",
            "How have you been taking care of yourself lately?",
        ],
        Emotion::Stressed => &[
            "What's the main source of your stress right now?",
            "Have you been able to take any breaks today?",
            "What usually helps you feel less stressed?",
        ],
        Emotion::Anxious => &[
            "What thoughts are going through your mind?",
            "Is there something specific you're worried about?",
            "What has helped with your anxiety before?",
        ],
        Emotion::Sad => &[
            "What's been weighing on your heart?",
            "Is there someone you can talk to about this?",
            "What small thing might bring you a bit of comfort?",
        ],
        Emotion::Angry => &[
            "What triggered these feelings for you?",
            "How do you usually handle anger in healthy ways?",
            "What boundary might need to be set here?",
        ],
        Emotion::Excited => &[
            "What's got you feeling so excited?",
            "How do you want to celebrate or channel this energy?",
            "What are you looking forward to most?",
        ],
        Emotion::Positive => &[
            "What's contributing to your positive mood today?",
            "How can you maintain this good feeling?",
            "What are you most grateful for right now?",
        ],
        _ => &[
            "How are you taking care of yourself today?",
            "What's one thing that might help you feel better?",
            "Is there anything specific you'd like to talk about?",
        ],
    }
}

/// Build the fixed crisis-intervention candidate.
///
/// The crisis path bypasses every adapter and is never subject to backend
/// health state.
pub fn crisis_candidate() -> ResponseCandidate {
    ResponseCandidate {
        message: CRISIS_MESSAGE.to_owned(),
        response_type: ResponseType::CrisisIntervention,
        backend_id: CRISIS_SOURCE_ID.to_owned(),
        latency_ms: 0,
    }
}

/// The rule-based template backend.
#[derive(Debug, Clone, Default)]
pub struct TemplateBackend;

impl TemplateBackend {
    /// Create the template backend.
    pub fn new() -> Self {
        Self
    }

    fn compose(emotion: Emotion, intensity: Intensity, severity: Severity) -> String {
        let idx = intensity.variant_index();
        let mut message = format!(
            "{} {}",
            validation_phrases(emotion)[idx],
            support_phrases(emotion)[idx]
        );
        if severity == Severity::Elevated {
            message.push(' ');
            message.push_str(PROFESSIONAL_HELP_ENCOURAGEMENT);
        }
        message
    }
}

#[async_trait]
impl BackendAdapter for TemplateBackend {
    fn id(&self) -> &str {
        TEMPLATE_BACKEND_ID
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Template
    }

    async fn attempt(&self, prompt: &GenerationPrompt) -> Result<ResponseCandidate, BackendError> {
        let message = Self::compose(
            prompt.emotion.primary,
            prompt.sentiment.intensity,
            prompt.crisis.severity,
        );
        Ok(ResponseCandidate {
            message,
            response_type: ResponseType::TemplateSupportive,
            backend_id: TEMPLATE_BACKEND_ID.to_owned(),
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassifierSource, CrisisFlag, EmotionResult, RequestContext, SentimentScore};

    fn prompt(emotion: Emotion, sentiment: f32, severity: Severity) -> GenerationPrompt {
        let mut result = EmotionResult::neutral(ClassifierSource::Lexicon);
        result.primary = emotion;
        GenerationPrompt {
            text: "test".into(),
            emotion: result,
            sentiment: SentimentScore::new(sentiment),
            crisis: CrisisFlag {
                triggered: severity != Severity::Normal,
                severity,
                matched_phrases: Vec::new(),
            },
            context: RequestContext::default(),
        }
    }

    #[tokio::test]
    async fn always_succeeds_with_nonempty_message() {
        let backend = TemplateBackend::new();
        for emotion in Emotion::ALL {
            let candidate = backend
                .attempt(&prompt(emotion, -0.1, Severity::Normal))
                .await
                .expect("template backend never fails");
            assert!(!candidate.message.is_empty());
            assert_eq!(candidate.response_type, ResponseType::TemplateSupportive);
            assert_eq!(candidate.backend_id, TEMPLATE_BACKEND_ID);
        }
    }

    #[tokio::test]
    async fn selection_is_keyed_by_emotion_and_intensity() {
        let backend = TemplateBackend::new();
        let low = backend
            .attempt(&prompt(Emotion::Sad, -0.05, Severity::Normal))
            .await
            .unwrap();
        let extreme = backend
            .attempt(&prompt(Emotion::Sad, -0.9, Severity::Normal))
            .await
            .unwrap();
        assert_ne!(low.message, extreme.message);

        let other_emotion = backend
            .attempt(&prompt(Emotion::Angry, -0.05, Severity::Normal))
            .await
            .unwrap();
        assert_ne!(low.message, other_emotion.message);
    }

    #[tokio::test]
    async fn selection_is_deterministic() {
        let backend = TemplateBackend::new();
        let a = backend
            .attempt(&prompt(Emotion::Anxious, -0.3, Severity::Normal))
            .await
            .unwrap();
        let b = backend
            .attempt(&prompt(Emotion::Anxious, -0.3, Severity::Normal))
            .await
            .unwrap();
        assert_eq!(a.message, b.message);
    }

    #[tokio::test]
    async fn elevated_severity_appends_professional_help() {
        let backend = TemplateBackend::new();
        let normal = backend
            .attempt(&prompt(Emotion::Sad, -0.3, Severity::Normal))
            .await
            .unwrap();
        let elevated = backend
            .attempt(&prompt(Emotion::Sad, -0.3, Severity::Elevated))
            .await
            .unwrap();
        assert!(!normal.message.contains("counselor or therapist"));
        assert!(elevated.message.contains("counselor or therapist"));
    }

    #[test]
    fn crisis_candidate_is_fixed() {
        let a = crisis_candidate();
        let b = crisis_candidate();
        assert_eq!(a, b);
        assert_eq!(a.response_type, ResponseType::CrisisIntervention);
        assert_eq!(a.backend_id, CRISIS_SOURCE_ID);
        assert!(a.message.contains("Your life has value"));
    }

    #[test]
    fn follow_ups_exist_for_every_emotion() {
        for emotion in Emotion::ALL {
            assert!(!follow_up_questions(emotion).is_empty());
        }
        assert_eq!(CRISIS_FOLLOW_UPS.len(), 3);
    }

    #[test]
    fn template_kind_is_template() {
        assert_eq!(TemplateBackend::new().kind(), BackendKind::Template);
    }
}
