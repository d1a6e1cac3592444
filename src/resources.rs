//! Support resource tables.
//!
//! Static tables of external support services, selected by safety tier and
//! emotion category. Crisis resources are always attached on the crisis
//! path and for elevated severity.

use crate::types::{Emotion, Severity, SupportResource};

const CRISIS: &[(&str, &str, &str)] = &[
    (
        "988 Suicide & Crisis Lifeline",
        "988",
        "24/7 crisis support",
    ),
    (
        "Crisis Text Line",
        "Text HOME to 741741",
        "24/7 crisis support via text",
    ),
    (
        "SAMHSA National Helpline",
        "1-800-662-4357",
        "Treatment referral service",
    ),
];

const ANXIETY: &[(&str, &str, &str)] = &[
    (
        "Anxiety and Depression Association of America",
        "adaa.org",
        "Resources and support for anxiety",
    ),
    (
        "Calm",
        "calm.com",
        "Meditation and relaxation exercises",
    ),
    (
        "Headspace",
        "headspace.com",
        "Mindfulness and meditation",
    ),
];

const DEPRESSION: &[(&str, &str, &str)] = &[
    (
        "National Alliance on Mental Illness",
        "nami.org",
        "Mental health resources and support",
    ),
    (
        "Depression and Bipolar Support Alliance",
        "dbsalliance.org",
        "Peer support and resources",
    ),
    (
        "Mental Health America",
        "mhanational.org",
        "Mental health screening and resources",
    ),
];

const STRESS: &[(&str, &str, &str)] = &[
    (
        "American Psychological Association",
        "apa.org/topics/stress",
        "Stress management resources",
    ),
    (
        "Mindfulness-Based Stress Reduction",
        "palousemindfulness.com",
        "Free MBSR course",
    ),
];

const GENERAL: &[(&str, &str, &str)] = &[
    (
        "Psychology Today",
        "psychologytoday.com",
        "Find therapists and mental health professionals",
    ),
    (
        "NAMI Support Groups",
        "nami.org/Support-Education",
        "Local support groups",
    ),
];

fn build(table: &[(&str, &str, &str)]) -> Vec<SupportResource> {
    table
        .iter()
        .map(|(name, contact, description)| SupportResource::new(*name, *contact, *description))
        .collect()
}

/// Crisis hotline resources.
pub fn crisis_resources() -> Vec<SupportResource> {
    build(CRISIS)
}

/// Resources for a safety tier and primary emotion.
///
/// Crisis severity returns only crisis resources. Elevated severity
/// prepends crisis resources to the emotion-matched set (additional safety
/// resources without forcing the crisis path). Normal severity returns the
/// emotion-matched set.
pub fn resources_for(severity: Severity, emotion: Emotion) -> Vec<SupportResource> {
    match severity {
        Severity::Crisis => crisis_resources(),
        Severity::Elevated => {
            let mut resources = crisis_resources();
            resources.extend(emotion_resources(emotion));
            resources
        }
        Severity::Normal => emotion_resources(emotion),
    }
}

fn emotion_resources(emotion: Emotion) -> Vec<SupportResource> {
    match emotion {
        Emotion::Anxious => build(ANXIETY),
        Emotion::Sad => build(DEPRESSION),
        Emotion::Stressed | Emotion::Overwhelmed => build(STRESS),
        _ => build(GENERAL),
    }
}
