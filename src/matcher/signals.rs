//! Named signal checks for the template confidence heuristic
//!
//! The heuristic is an ordered list of auditable checks, each contributing a
//! score or a disqualification. Disqualifiers exist because their phrasings
//! mark fact patterns requiring exception analysis that no canned answer
//! safely covers.

use std::collections::HashSet;

use crate::config::MatcherConfig;
use crate::matcher::concepts;
use crate::models::TemplateRecord;

/// Outcome of one signal check
#[derive(Debug, Clone)]
pub struct SignalHit {
    pub name: &'static str,
    pub confidence: f32,
    pub disqualify: bool,
}

impl SignalHit {
    fn score(name: &'static str, confidence: f32) -> Self {
        Self {
            name,
            confidence,
            disqualify: false,
        }
    }

    fn disqualify(name: &'static str) -> Self {
        Self {
            name,
            confidence: 0.0,
            disqualify: true,
        }
    }
}

/// Markers of multi-step, sequential fact patterns
const SEQUENTIAL_MARKERS: &[&str] = &[
    "and then",
    "after that",
    "then i",
    "then my",
    "then it",
    "followed by",
    "next i",
];

/// Ball-in-motion phrasing (Rules 11.1-11.3 territory)
const BALL_IN_MOTION_PHRASES: &[&str] = &[
    "ball in motion",
    "while my ball was moving",
    "while it was moving",
    "while the ball was moving",
    "still moving",
    "while rolling",
    "deflected",
    "in midair",
    "stopped my ball",
];

/// Multi-player causation phrasing (Rules 9.5/9.6/8.1d territory)
const MULTI_PLAYER_PHRASES: &[&str] = &[
    "opponent",
    "another player",
    "other player",
    "my partner",
    "someone else",
    "somebody else",
    "stepped on",
    "picked up my ball",
];

/// Fixed action-verb set counted toward the complexity disqualifier
const ACTION_VERBS: &[&str] = &[
    "dropped", "hit", "played", "moved", "lifted", "marked", "replaced", "cleaned",
    "searched", "grounded", "kicked", "threw", "placed", "repaired", "swung",
];

/// Question-asking verbs used by the co-occurrence trigger tier
const QUESTION_VERBS: &[&str] = &[
    "what", "how", "can", "could", "do", "does", "is", "are", "may", "should", "which",
];

/// Phrases naming the operating facility
const FACILITY_MARKERS: &[&str] = &["columbia"];

/// Phrases asking for the official standard rather than a local ruling
const OFFICIAL_STANDARD_MARKERS: &[&str] = &[
    "official rule",
    "officially",
    "rules of golf",
    "usga",
    "standard rule",
    "general rule",
];

/// First global disqualifier that fires, if any.
///
/// These zero out every template regardless of other evidence.
pub fn global_disqualifier(normalized: &str, config: &MatcherConfig) -> Option<SignalHit> {
    if SEQUENTIAL_MARKERS.iter().any(|m| normalized.contains(m)) {
        return Some(SignalHit::disqualify("sequential_scenario"));
    }
    if BALL_IN_MOTION_PHRASES.iter().any(|m| normalized.contains(m)) {
        return Some(SignalHit::disqualify("ball_in_motion"));
    }
    if MULTI_PLAYER_PHRASES.iter().any(|m| normalized.contains(m)) {
        return Some(SignalHit::disqualify("multi_player_causation"));
    }
    if normalized.split_whitespace().count() > config.max_question_words {
        return Some(SignalHit::disqualify("excessive_length"));
    }

    let verb_count = ACTION_VERBS
        .iter()
        .filter(|verb| concepts::phrase_present(normalized, verb))
        .count();
    if verb_count > config.max_action_verbs {
        return Some(SignalHit::disqualify("action_verb_count"));
    }

    None
}

/// Critical-concept overlap for one template
pub fn concept_overlap(
    template: &TemplateRecord,
    question_concepts: &HashSet<String>,
    config: &MatcherConfig,
) -> Option<SignalHit> {
    let overlap = template
        .critical_concepts
        .iter()
        .filter(|c| question_concepts.contains(c.as_str()))
        .count();

    (overlap >= template.min_concept_matches && template.min_concept_matches > 0)
        .then(|| SignalHit::score("concept_overlap", config.concept_confidence))
}

/// Strongest trigger-phrase tier for one template.
///
/// Tier 1: verbatim containment (word-boundary for short phrases).
/// Tier 2: every phrase word present, phrase covering most of the question.
/// Tier 3: every phrase word present alongside a question-asking verb.
pub fn trigger_strength(
    normalized: &str,
    template: &TemplateRecord,
    config: &MatcherConfig,
) -> Option<SignalHit> {
    let question_len = normalized.len().max(1);
    let has_question_verb = QUESTION_VERBS
        .iter()
        .any(|verb| concepts::phrase_present(normalized, verb));

    let mut best: Option<SignalHit> = None;
    for trigger in &template.triggers {
        let hit = if concepts::phrase_present(normalized, trigger) {
            Some(SignalHit::score(
                "trigger_exact",
                config.exact_trigger_confidence,
            ))
        } else {
            let words_present = trigger
                .split_whitespace()
                .all(|word| concepts::phrase_present(normalized, word));
            if !words_present {
                None
            } else if trigger.len() as f32 / question_len as f32 >= config.span_fraction {
                Some(SignalHit::score(
                    "trigger_span",
                    config.span_trigger_confidence,
                ))
            } else if has_question_verb {
                Some(SignalHit::score(
                    "trigger_cooccurrence",
                    config.cooccurrence_confidence,
                ))
            } else {
                None
            }
        };

        if let Some(hit) = hit {
            if best.as_ref().is_none_or(|b| hit.confidence > b.confidence) {
                best = Some(hit);
            }
        }
    }

    best
}

/// Template-specific veto, if one of its veto phrases appears
pub fn template_veto(normalized: &str, template: &TemplateRecord) -> Option<SignalHit> {
    template
        .veto_phrases
        .iter()
        .any(|phrase| normalized.contains(phrase))
        .then(|| SignalHit::disqualify("template_veto"))
}

/// Template-specific boost, if one of its boost phrases appears
pub fn template_boost(
    normalized: &str,
    template: &TemplateRecord,
    config: &MatcherConfig,
) -> Option<SignalHit> {
    template
        .boost_phrases
        .iter()
        .any(|phrase| normalized.contains(phrase))
        .then(|| SignalHit::score("template_boost", config.boost_bonus))
}

/// Whether the question names the facility
pub fn names_facility(normalized: &str) -> bool {
    FACILITY_MARKERS.iter().any(|m| normalized.contains(m))
}

/// Whether the question asks for the official standard instead of a local ruling
pub fn asks_official_standard(normalized: &str) -> bool {
    OFFICIAL_STANDARD_MARKERS.iter().any(|m| normalized.contains(m))
}
