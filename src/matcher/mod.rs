//! Template Confidence Matcher
//!
//! Scores a question against the canned-answer template library with an
//! ordered list of named signal checks: concept overlap, trigger-phrase
//! tiers, global disqualifiers, template vetoes and boosts, and the
//! facility/official adjustments. Never fails; absence of a match is a
//! normal outcome.

pub mod concepts;
pub mod signals;
pub mod templates;

pub use signals::SignalHit;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::MatcherConfig;
use crate::models::TemplateRecord;

/// A template selected for a question, with the evidence that selected it
#[derive(Debug, Clone)]
pub struct TemplateMatch {
    pub template: Arc<TemplateRecord>,
    /// Final confidence in [0, 1]
    pub confidence: f32,
    /// Signal checks that contributed, in evaluation order
    pub signals: Vec<SignalHit>,
}

/// Matcher over a fixed template library
pub struct TemplateMatcher {
    templates: Vec<Arc<TemplateRecord>>,
    config: MatcherConfig,
}

impl TemplateMatcher {
    pub fn new(templates: Vec<TemplateRecord>, config: MatcherConfig) -> Self {
        Self {
            templates: templates.into_iter().map(Arc::new).collect(),
            config,
        }
    }

    /// Matcher with the built-in template library
    pub fn with_builtin(config: MatcherConfig) -> Self {
        Self::new(templates::builtin_templates(), config)
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Best template for a question, or `None` when nothing scores above zero.
    ///
    /// Ties are broken by declaration order: the first template to reach the
    /// best confidence keeps it.
    pub fn match_question(&self, question: &str) -> Option<TemplateMatch> {
        let normalized = concepts::normalize(question);
        if normalized.is_empty() {
            return None;
        }

        if let Some(hit) = signals::global_disqualifier(&normalized, &self.config) {
            debug!(signal = hit.name, "question disqualified from template matching");
            return None;
        }

        let question_concepts = concepts::extract_concepts(&normalized);
        let names_facility = signals::names_facility(&normalized);
        let asks_official = signals::asks_official_standard(&normalized);

        let mut best: Option<TemplateMatch> = None;
        for template in &self.templates {
            let candidate = self.score_template(
                template,
                &normalized,
                &question_concepts,
                names_facility,
                asks_official,
            );
            if candidate.confidence > 0.0
                && best
                    .as_ref()
                    .is_none_or(|b| candidate.confidence > b.confidence)
            {
                best = Some(candidate);
            }
        }

        if let Some(found) = &best {
            debug!(
                template = %found.template.id,
                confidence = found.confidence,
                "template matched"
            );
        }

        best
    }

    fn score_template(
        &self,
        template: &Arc<TemplateRecord>,
        normalized: &str,
        question_concepts: &HashSet<String>,
        names_facility: bool,
        asks_official: bool,
    ) -> TemplateMatch {
        let mut hits = Vec::new();

        if let Some(veto) = signals::template_veto(normalized, template) {
            hits.push(veto);
            return TemplateMatch {
                template: template.clone(),
                confidence: 0.0,
                signals: hits,
            };
        }

        let mut confidence: f32 = 0.0;

        if let Some(hit) = signals::concept_overlap(template, question_concepts, &self.config) {
            confidence = confidence.max(hit.confidence);
            hits.push(hit);
        }

        if let Some(hit) = signals::trigger_strength(normalized, template, &self.config) {
            confidence = confidence.max(hit.confidence);
            hits.push(hit);
        }

        // No positive evidence: adjustments below cannot manufacture a match
        if confidence == 0.0 {
            return TemplateMatch {
                template: template.clone(),
                confidence: 0.0,
                signals: hits,
            };
        }

        if let Some(hit) = signals::template_boost(normalized, template, &self.config) {
            confidence += hit.confidence;
            hits.push(hit);
        }

        if names_facility {
            confidence *= self.config.facility_boost;
            hits.push(SignalHit {
                name: "facility_named",
                confidence: self.config.facility_boost,
                disqualify: false,
            });
        }

        if asks_official {
            confidence *= self.config.official_penalty;
            hits.push(SignalHit {
                name: "official_standard_requested",
                confidence: self.config.official_penalty,
                disqualify: false,
            });
        }

        TemplateMatch {
            template: template.clone(),
            confidence: confidence.clamp(0.0, 1.0),
            signals: hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> TemplateMatcher {
        TemplateMatcher::with_builtin(MatcherConfig::default())
    }

    #[test]
    fn test_lost_ball_scenario_reaches_high_band() {
        let found = matcher()
            .match_question("lost my ball in the woods on the back nine")
            .expect("should match");
        assert_eq!(found.template.id, "clear_lost_ball");
        assert!(found.confidence >= 0.8, "got {}", found.confidence);
    }

    #[test]
    fn test_lost_ball_with_penalty_area_language_is_vetoed() {
        // "pond" marks a penalty-area fact pattern, a different rule family
        let found = matcher().match_question("lost my ball in the woods next to the pond");
        assert!(found.map_or(true, |m| m.template.id != "clear_lost_ball"));
    }

    #[test]
    fn test_disqualified_question_matches_nothing() {
        let found =
            matcher().match_question("ball moved after my opponent stepped on it while searching");
        assert!(found.is_none());
    }

    #[test]
    fn test_official_standard_request_is_penalized() {
        let plain = matcher()
            .match_question("lost my ball in the woods")
            .expect("should match")
            .confidence;
        let official = matcher()
            .match_question("under the rules of golf what happens, lost my ball in the woods")
            .map_or(0.0, |m| m.confidence);
        assert!(official < plain * 0.5, "penalty not applied: {official} vs {plain}");
    }

    #[test]
    fn test_no_evidence_means_no_match() {
        assert!(matcher().match_question("how is the weather today").is_none());
        assert!(matcher().match_question("").is_none());
    }

    #[test]
    fn test_tie_broken_by_declaration_order() {
        let first = TemplateRecord {
            id: "first".to_string(),
            triggers: vec!["magic phrase".to_string()],
            critical_concepts: vec![],
            min_concept_matches: 0,
            veto_phrases: vec![],
            boost_phrases: vec![],
            answer: "first answer".to_string(),
            rule_id: None,
        };
        let mut second = first.clone();
        second.id = "second".to_string();

        let matcher = TemplateMatcher::new(vec![first, second], MatcherConfig::default());
        let found = matcher.match_question("magic phrase please").unwrap();
        assert_eq!(found.template.id, "first");
    }
}
