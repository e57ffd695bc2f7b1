//! Context Assembler
//!
//! Builds the text block handed to the generative call: capped primary
//! rules (club-specific evidence cannot be crowded out by general matches),
//! structured conditions with exception clauses rendered first, and related
//! exception rules pulled in via the rule-adjacency table. Exceptions are
//! the dominant source of wrong rulings in this domain, so exception text
//! is never truncated below ordinary conditions or demoted.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::config::RoutingConfig;
use crate::corpus::RelatedRuleMap;
use crate::corpus::RuleCorpus;
use crate::models::RuleRecord;
use crate::models::SearchResult;

/// Rule-number patterns whose presence marks an exception-prone context
/// (causation, timing, ball in motion)
const EXCEPTION_RULE_PATTERNS: &[&str] = &["8.1d", "9.3", "9.4", "9.5", "9.6", "11.", "14.2d"];

/// How many examples are rendered per exception clause
const EXAMPLES_PER_EXCEPTION: usize = 2;

/// Context shown when retrieval produced no evidence
const NO_RULES_CONTEXT: &str = "No relevant rules found.";

/// Assembled prompt context and its metadata
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub text: String,
    /// True iff any included or related rule id matches an exception pattern
    pub has_exceptions: bool,
    /// Ids of every rule whose text entered the context
    pub rule_ids: Vec<String>,
}

/// Builds prompt context from search results
pub struct ContextAssembler {
    corpus: Arc<RuleCorpus>,
    related: RelatedRuleMap,
    local_cap: usize,
    general_cap: usize,
    related_cap: usize,
    conditions_cap: usize,
}

impl ContextAssembler {
    pub fn new(corpus: Arc<RuleCorpus>, related: RelatedRuleMap, config: &RoutingConfig) -> Self {
        Self {
            corpus,
            related,
            local_cap: config.local_context_cap,
            general_cap: config.general_context_cap,
            related_cap: config.related_rules_cap,
            conditions_cap: config.conditions_per_rule_cap,
        }
    }

    /// Assemble the context block for a set of search results
    pub fn assemble(&self, results: &[SearchResult]) -> AssembledContext {
        if results.is_empty() {
            return AssembledContext {
                text: NO_RULES_CONTEXT.to_string(),
                has_exceptions: false,
                rule_ids: Vec::new(),
            };
        }

        // Independent caps per category: club evidence survives any volume
        // of general matches
        let local: Vec<&SearchResult> =
            results.iter().filter(|r| r.is_local).take(self.local_cap).collect();
        let general: Vec<&SearchResult> =
            results.iter().filter(|r| !r.is_local).take(self.general_cap).collect();

        let mut text = String::new();
        let mut rule_ids = Vec::new();

        for result in local.iter().chain(general.iter()) {
            self.render_rule(&mut text, &result.rule);
            rule_ids.push(result.rule.id.clone());
        }

        let included: HashSet<&str> = rule_ids.iter().map(String::as_str).collect();
        let related_ids = self.collect_related(&rule_ids, &included);

        let mut appended_related = Vec::new();
        if !related_ids.is_empty() {
            let mut section = String::new();
            for related_id in &related_ids {
                // A reference absent from the corpus is skipped, not an error
                if let Some(rule) = self.corpus.get(related_id) {
                    let _ = writeln!(section, "\nRule {}: {}\n{}", rule.id, rule.title, rule.text);
                    appended_related.push(rule.id.clone());
                }
            }
            if !section.is_empty() {
                text.push_str("\n--- RELATED EXCEPTION RULES ---\n");
                text.push_str(&section);
            }
        }

        rule_ids.extend(appended_related);
        let has_exceptions = rule_ids.iter().any(|id| matches_exception_pattern(id));

        debug!(
            rules = rule_ids.len(),
            has_exceptions, "assembled context ({} chars)",
            text.len()
        );

        AssembledContext {
            text,
            has_exceptions,
            rule_ids,
        }
    }

    /// Related rule ids for the included set, deduplicated, capped, in
    /// encounter order
    fn collect_related(&self, included_ids: &[String], included: &HashSet<&str>) -> Vec<String> {
        let mut related_ids: Vec<String> = Vec::new();
        for id in included_ids {
            let prefix = id.split('.').next().unwrap_or(id);
            for related in self.related.related_for(prefix) {
                if !included.contains(related) && !related_ids.iter().any(|r| r == related) {
                    related_ids.push(related.to_string());
                }
            }
        }
        related_ids.truncate(self.related_cap);
        related_ids
    }

    fn render_rule(&self, out: &mut String, rule: &RuleRecord) {
        if rule.is_local {
            let _ = writeln!(out, "COLUMBIA CC LOCAL RULE {}: {}", rule.id, rule.title);
        } else {
            let _ = writeln!(out, "Rule {}: {}", rule.id, rule.title);
        }
        // Full body text; accuracy beats brevity here
        out.push_str(&rule.text);
        out.push('\n');

        if rule.conditions.is_empty() {
            out.push('\n');
            return;
        }

        let considered = &rule.conditions[..rule.conditions.len().min(self.conditions_cap)];
        let (exceptions, ordinary): (Vec<_>, Vec<_>) =
            considered.iter().partition(|c| c.is_exception());

        // Exception clauses change the ruling and must not be buried
        if !exceptions.is_empty() {
            out.push_str("\n!! EXCEPTIONS:\n");
            for exception in exceptions {
                let _ = writeln!(out, "  * {}", exception.explanation);
                for example in exception.examples.iter().take(EXAMPLES_PER_EXCEPTION) {
                    let _ = writeln!(out, "    Example: {example}");
                }
            }
        }

        if !ordinary.is_empty() {
            out.push_str("\nConditions and Applications:\n");
            for condition in ordinary {
                let _ = writeln!(out, "- {}: {}", condition.situation, condition.explanation);
            }
        }

        out.push('\n');
    }
}

/// Whether a rule id falls in the exception-prone families.
///
/// Anchored at the start of the id: "11." covers the whole ball-in-motion
/// family, while "19.3" must not match the "9.3" pattern.
fn matches_exception_pattern(rule_id: &str) -> bool {
    EXCEPTION_RULE_PATTERNS
        .iter()
        .any(|pattern| rule_id.starts_with(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleCondition;

    fn assembler(corpus: RuleCorpus) -> ContextAssembler {
        ContextAssembler::new(
            Arc::new(corpus),
            RelatedRuleMap::standard(),
            &RoutingConfig::default(),
        )
    }

    fn result_for(rule: RuleRecord, similarity: f32) -> SearchResult {
        let is_local = rule.is_local;
        SearchResult {
            rule: Arc::new(rule),
            similarity,
            is_local,
        }
    }

    #[test]
    fn test_empty_results_yield_no_rules_context() {
        let assembled = assembler(RuleCorpus::with_builtin()).assemble(&[]);
        assert_eq!(assembled.text, NO_RULES_CONTEXT);
        assert!(!assembled.has_exceptions);
        assert!(assembled.rule_ids.is_empty());
    }

    #[test]
    fn test_exceptions_render_before_ordinary_conditions() {
        let rule = RuleRecord::new(
            "9.4",
            "Ball moved by player",
            "Replace the ball.",
            vec![],
            false,
            vec![
                RuleCondition {
                    situation: "Ball in general area".to_string(),
                    explanation: "One penalty stroke".to_string(),
                    examples: vec![],
                },
                RuleCondition {
                    situation: "Exception: movement during search".to_string(),
                    explanation: "No penalty while searching".to_string(),
                    examples: vec!["kicked in deep rough".to_string()],
                },
            ],
        );
        let corpus = RuleCorpus::new(vec![], vec![rule.clone()]).unwrap();
        let assembled = assembler(corpus).assemble(&[result_for(rule, 0.8)]);

        let exceptions_at = assembled.text.find("!! EXCEPTIONS:").expect("exception block");
        let ordinary_at = assembled
            .text
            .find("Conditions and Applications:")
            .expect("ordinary block");
        assert!(exceptions_at < ordinary_at);
        assert!(assembled.text.contains("No penalty while searching"));
    }

    #[test]
    fn test_caps_apply_per_category() {
        let corpus = RuleCorpus::with_builtin();
        let mut results = Vec::new();
        for rule in corpus.all() {
            results.push(SearchResult {
                rule: rule.clone(),
                similarity: 0.5,
                is_local: rule.is_local,
            });
        }
        let assembled = assembler(RuleCorpus::with_builtin()).assemble(&results);

        let local_count = assembled
            .rule_ids
            .iter()
            .filter(|id| id.starts_with("CCC-"))
            .count();
        // 4 club + 8 general primary; related ids are all general
        assert_eq!(local_count, 4);
    }

    #[test]
    fn test_related_rules_are_appended_and_flagged() {
        let corpus = RuleCorpus::with_builtin();
        let rule = corpus.get("13.1").unwrap().clone();
        let assembled = assembler(RuleCorpus::with_builtin()).assemble(&[SearchResult {
            rule,
            similarity: 0.9,
            is_local: false,
        }]);

        assert!(assembled.text.contains("--- RELATED EXCEPTION RULES ---"));
        // 13.1 adjacency pulls in 8.1d, an exception-prone rule
        assert!(assembled.rule_ids.iter().any(|id| id == "8.1d"));
        assert!(assembled.has_exceptions);
    }

    #[test]
    fn test_missing_related_reference_is_skipped() {
        // Corpus lacking the adjacency targets: section simply stays out
        let rule = RuleRecord::new("13.1", "Putting green", "text", vec![], false, vec![]);
        let corpus = RuleCorpus::new(vec![], vec![rule.clone()]).unwrap();
        let assembled = assembler(corpus).assemble(&[result_for(rule, 0.9)]);

        assert!(!assembled.text.contains("--- RELATED EXCEPTION RULES ---"));
        assert_eq!(assembled.rule_ids, vec!["13.1".to_string()]);
    }

    #[test]
    fn test_local_rules_render_with_club_header() {
        let corpus = RuleCorpus::with_builtin();
        let rule = corpus.get("CCC-6").unwrap().clone();
        let assembled = assembler(RuleCorpus::with_builtin()).assemble(&[SearchResult {
            rule,
            similarity: 0.7,
            is_local: true,
        }]);
        assert!(assembled.text.contains("COLUMBIA CC LOCAL RULE CCC-6:"));
    }
}
