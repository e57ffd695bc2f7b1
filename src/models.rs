//! Core data model: rule records, templates, and the caller-facing result shape

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

/// One structured condition attached to a rule.
///
/// Conditions whose situation text mentions an exception reverse or modify
/// the rule's default outcome and are rendered ahead of ordinary conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCondition {
    pub situation: String,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl RuleCondition {
    /// Whether this condition is an exception clause
    pub fn is_exception(&self) -> bool {
        self.situation.to_lowercase().contains("exception")
    }
}

/// A single rule, either club-specific or from the general rulebook.
///
/// Immutable after load; owned by the corpus for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub is_local: bool,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    /// Precomputed concatenation of title, body, and keywords used for embedding
    #[serde(skip)]
    pub search_text: String,
}

impl RuleRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        keywords: Vec<String>,
        is_local: bool,
        conditions: Vec<RuleCondition>,
    ) -> Self {
        let mut rule = Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            keywords,
            is_local,
            conditions,
            search_text: String::new(),
        };
        rule.search_text = rule.compose_search_text();
        rule
    }

    /// Rebuild the search text from title, body, and keywords
    pub fn compose_search_text(&self) -> String {
        format!("{} {} {}", self.title, self.text, self.keywords.join(" "))
    }

    /// Leading id segment before the sub-rule delimiter ("13.1c" -> "13")
    pub fn topic_prefix(&self) -> &str {
        self.id.split('.').next().unwrap_or(&self.id)
    }
}

/// A canned answer keyed by trigger phrases and critical concepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    /// Literal phrases tested for containment in the normalized question
    pub triggers: Vec<String>,
    /// Concepts that must intersect the question's extracted concept set
    #[serde(default)]
    pub critical_concepts: Vec<String>,
    /// Minimum size of the critical-concept intersection to seed confidence
    #[serde(default = "default_min_concept_matches")]
    pub min_concept_matches: usize,
    /// Phrases that force this template's confidence to zero
    #[serde(default)]
    pub veto_phrases: Vec<String>,
    /// Phrases that strengthen this template's confidence
    #[serde(default)]
    pub boost_phrases: Vec<String>,
    pub answer: String,
    /// Rule backing the canned answer, if any
    #[serde(default)]
    pub rule_id: Option<String>,
}

fn default_min_concept_matches() -> usize {
    2
}

/// Question category used to select a prompt strategy and retrieval width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Position,
    Relief,
    Penalty,
    Procedure,
    Other,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Relief => "relief",
            Self::Penalty => "penalty",
            Self::Procedure => "procedure",
            Self::Other => "other",
        }
    }
}

/// Which path produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    #[serde(rename = "template_high_confidence")]
    TemplateHigh,
    #[serde(rename = "template_medium_confidence")]
    TemplateMedium,
    #[serde(rename = "definitions_database")]
    Definition,
    #[serde(rename = "ai_with_exceptions")]
    RetrievalWithExceptions,
    #[serde(rename = "ai_unified")]
    RetrievalPlain,
    #[serde(rename = "error_fallback")]
    Error,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TemplateHigh => "template_high_confidence",
            Self::TemplateMedium => "template_medium_confidence",
            Self::Definition => "definitions_database",
            Self::RetrievalWithExceptions => "ai_with_exceptions",
            Self::RetrievalPlain => "ai_unified",
            Self::Error => "error_fallback",
        }
    }
}

/// Coarse trustworthiness label for an answer-producing path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTag {
    High,
    Medium,
    Low,
    None,
}

impl ConfidenceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Search result with relevance score; transient, produced per query
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub rule: Arc<RuleRecord>,
    /// Raw cosine similarity, always within [-1, 1]
    pub similarity: f32,
    pub is_local: bool,
}

/// The caller-facing result record.
///
/// Every question yields exactly one of these; failures surface as an
/// apologetic answer tagged [`SourceTag::Error`], never as an error value.
#[derive(Debug, Clone, Serialize)]
pub struct RulingResponse {
    pub answer: String,
    pub source: SourceTag,
    pub confidence: ConfidenceTag,
    pub rule_ids_used: Vec<String>,
    pub has_exceptions: bool,
    pub tokens_used: u32,
    /// Elapsed seconds, rounded to two decimals
    pub response_time: f64,
    pub query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_includes_keywords() {
        let rule = RuleRecord::new(
            "CCC-1",
            "Lost ball relief",
            "Alternative to stroke and distance.",
            vec!["lost".to_string(), "ball".to_string()],
            true,
            vec![],
        );
        assert!(rule.search_text.contains("Lost ball relief"));
        assert!(rule.search_text.contains("stroke and distance"));
        assert!(rule.search_text.ends_with("lost ball"));
    }

    #[test]
    fn test_topic_prefix_strips_sub_rule() {
        let rule = RuleRecord::new("13.1c", "Putting green", "", vec![], false, vec![]);
        assert_eq!(rule.topic_prefix(), "13");

        let rule = RuleRecord::new("19", "Unplayable ball", "", vec![], false, vec![]);
        assert_eq!(rule.topic_prefix(), "19");
    }

    #[test]
    fn test_exception_condition_detection() {
        let condition = RuleCondition {
            situation: "Exception: another player caused it".to_string(),
            explanation: String::new(),
            examples: vec![],
        };
        assert!(condition.is_exception());

        let condition = RuleCondition {
            situation: "Ball in general area".to_string(),
            explanation: String::new(),
            examples: vec![],
        };
        assert!(!condition.is_exception());
    }

    #[test]
    fn test_source_tag_wire_names() {
        assert_eq!(
            serde_json::to_string(&SourceTag::TemplateHigh).unwrap(),
            "\"template_high_confidence\""
        );
        assert_eq!(
            serde_json::to_string(&SourceTag::RetrievalWithExceptions).unwrap(),
            "\"ai_with_exceptions\""
        );
        assert_eq!(SourceTag::Error.as_str(), "error_fallback");
    }
}
