//! Routing Controller: the per-question decision pipeline
//!
//! Re-entered once per incoming question, holding no state across questions
//! except the shared embedding caches. Confident canned answers terminate
//! the pipeline before any paid service is invoked; failures in the
//! retrieval or generation stages downgrade to a fixed fallback result and
//! never propagate to the caller.

pub mod intent;

pub use intent::IntentClassifier;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::config::AppConfig;
use crate::config::RoutingConfig;
use crate::context::ContextAssembler;
use crate::corpus::RelatedRuleMap;
use crate::corpus::RuleCorpus;
use crate::definitions::DefinitionStore;
use crate::embeddings::EmbeddingBackend;
use crate::embeddings::EmbeddingCache;
use crate::errors::Result;
use crate::llm::prompts;
use crate::llm::CompletionBackend;
use crate::matcher::TemplateMatcher;
use crate::models::ConfidenceTag;
use crate::models::Intent;
use crate::models::RulingResponse;
use crate::models::SearchResult;
use crate::models::SourceTag;
use crate::search::SearchEngine;

/// Fixed fallback answer for upstream failures
const ERROR_ANSWER: &str =
    "I encountered an error processing your question. Please try rephrasing it.";

/// Note appended to medium-confidence canned answers
const UNCERTAINTY_NOTE: &str =
    "Note: this answer matched your question with moderate confidence. If your situation \
     involves unusual circumstances, please verify with the pro shop or rephrase with more \
     detail.";

/// Pipeline states, logged as the controller advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TemplateCheck,
    IntentClassify,
    Retrieve,
    AssembleContext,
    Generate,
    Done,
    Error,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::TemplateCheck => "template_check",
            Self::IntentClassify => "intent_classify",
            Self::Retrieve => "retrieve",
            Self::AssembleContext => "assemble_context",
            Self::Generate => "generate",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

/// End-to-end question answering service
pub struct RulingService {
    matcher: TemplateMatcher,
    definitions: DefinitionStore,
    classifier: IntentClassifier,
    search: SearchEngine,
    assembler: ContextAssembler,
    completions: Arc<dyn CompletionBackend>,
    corpus: Arc<RuleCorpus>,
    config: RoutingConfig,
}

impl RulingService {
    /// Build the service over explicit components
    pub fn from_parts(
        corpus: Arc<RuleCorpus>,
        embeddings: Arc<EmbeddingCache>,
        completions: Arc<dyn CompletionBackend>,
        config: RoutingConfig,
    ) -> Self {
        let matcher = TemplateMatcher::with_builtin(config.matcher.clone());
        let definitions = DefinitionStore::with_builtin();
        let classifier = IntentClassifier::new(completions.clone());
        let search = SearchEngine::new(corpus.clone(), embeddings, config.precedence_factor);
        let assembler = ContextAssembler::new(corpus.clone(), RelatedRuleMap::standard(), &config);

        Self {
            matcher,
            definitions,
            classifier,
            search,
            assembler,
            completions,
            corpus,
            config,
        }
    }

    pub fn corpus(&self) -> &RuleCorpus {
        &self.corpus
    }

    /// Build the service with the built-in corpus, precomputing the rule
    /// embedding table (startup cost, before any request is served)
    pub async fn bootstrap(
        config: &AppConfig,
        embeddings_backend: Arc<dyn EmbeddingBackend>,
        completions: Arc<dyn CompletionBackend>,
    ) -> Result<Self> {
        let corpus = Arc::new(RuleCorpus::with_builtin());
        let cache = Arc::new(EmbeddingCache::precompute(embeddings_backend, &corpus).await?);
        Ok(Self::from_parts(
            corpus,
            cache,
            completions,
            config.routing.clone(),
        ))
    }

    pub fn template_count(&self) -> usize {
        self.matcher.template_count()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.definitions
    }

    /// Answer a question.
    ///
    /// Always returns a well-formed result; the worst case is the fixed
    /// apology tagged `error` with confidence `none`.
    pub async fn answer(&self, question: &str) -> RulingResponse {
        let start = Instant::now();
        let query_id = format!("q_{}", Utc::now().timestamp_millis());
        info!(
            "[{query_id}] Query started: {}",
            question.chars().take(100).collect::<String>()
        );

        debug!(stage = Stage::TemplateCheck.as_str(), query_id = %query_id);
        if let Some(found) = self.matcher.match_question(question) {
            if found.confidence >= self.config.template_high_threshold {
                let response = RulingResponse {
                    answer: found.template.answer.clone(),
                    source: SourceTag::TemplateHigh,
                    confidence: ConfidenceTag::High,
                    rule_ids_used: found.template.rule_id.iter().cloned().collect(),
                    has_exceptions: false,
                    tokens_used: 0,
                    response_time: 0.0,
                    query_id,
                    intent: None,
                    template_id: Some(found.template.id.clone()),
                };
                return self.finish(response, start);
            }
            if found.confidence >= self.config.template_medium_threshold {
                let response = RulingResponse {
                    answer: format!("{}\n\n{UNCERTAINTY_NOTE}", found.template.answer),
                    source: SourceTag::TemplateMedium,
                    confidence: ConfidenceTag::Medium,
                    rule_ids_used: found.template.rule_id.iter().cloned().collect(),
                    has_exceptions: false,
                    tokens_used: 0,
                    response_time: 0.0,
                    query_id,
                    intent: None,
                    template_id: Some(found.template.id.clone()),
                };
                return self.finish(response, start);
            }
        }

        if self.config.enable_definitions && DefinitionStore::is_definition_query(question) {
            if let Some(definition) = self.definitions.lookup(question) {
                let response = RulingResponse {
                    answer: DefinitionStore::format_answer(definition),
                    source: SourceTag::Definition,
                    confidence: ConfidenceTag::High,
                    rule_ids_used: definition
                        .related_rules
                        .iter()
                        .map(|r| (*r).to_string())
                        .collect(),
                    has_exceptions: false,
                    tokens_used: 0,
                    response_time: 0.0,
                    query_id,
                    intent: None,
                    template_id: None,
                };
                return self.finish(response, start);
            }
        }

        debug!(stage = Stage::IntentClassify.as_str(), query_id = %query_id);
        let (intent, intent_tokens) = self.classifier.classify(question).await;

        debug!(stage = Stage::Retrieve.as_str(), query_id = %query_id);
        let results = self.search.search(question, self.top_n_for(intent)).await;

        debug!(stage = Stage::AssembleContext.as_str(), query_id = %query_id);
        let assembled = self.assembler.assemble(&results);

        debug!(stage = Stage::Generate.as_str(), query_id = %query_id);
        let prompt = prompts::ruling_prompt(intent, question, &assembled.text);
        match self
            .completions
            .complete(&prompt, self.config.max_output_tokens, self.config.temperature)
            .await
        {
            Ok(completion) => {
                let source = if assembled.has_exceptions {
                    SourceTag::RetrievalWithExceptions
                } else {
                    SourceTag::RetrievalPlain
                };
                let response = RulingResponse {
                    answer: completion.text,
                    source,
                    confidence: assess_confidence(&results),
                    rule_ids_used: assembled.rule_ids,
                    has_exceptions: assembled.has_exceptions,
                    tokens_used: intent_tokens + completion.tokens_used,
                    response_time: 0.0,
                    query_id,
                    intent: Some(intent),
                    template_id: None,
                };
                self.finish(response, start)
            }
            Err(e) => {
                debug!(stage = Stage::Error.as_str(), query_id = %query_id);
                error!("[{query_id}] Generation failed: {e}");
                let response = RulingResponse {
                    answer: ERROR_ANSWER.to_string(),
                    source: SourceTag::Error,
                    confidence: ConfidenceTag::None,
                    rule_ids_used: Vec::new(),
                    has_exceptions: false,
                    tokens_used: intent_tokens,
                    response_time: 0.0,
                    query_id,
                    intent: Some(intent),
                    template_id: None,
                };
                self.finish(response, start)
            }
        }
    }

    /// Intent-dependent retrieval width: relief questions need more
    /// supporting rules, position questions fewer
    fn top_n_for(&self, intent: Intent) -> usize {
        match intent {
            Intent::Position => self.config.top_n_position,
            Intent::Relief => self.config.top_n_relief,
            Intent::Penalty => self.config.top_n_penalty,
            Intent::Procedure => self.config.top_n_procedure,
            Intent::Other => self.config.top_n_other,
        }
    }

    /// Stamp timing and emit the structured completion event
    fn finish(&self, mut response: RulingResponse, start: Instant) -> RulingResponse {
        debug!(stage = Stage::Done.as_str(), query_id = %response.query_id);
        response.response_time = round2(start.elapsed().as_secs_f64());

        info!(
            target: "linkslogic::query",
            query_id = %response.query_id,
            source = response.source.as_str(),
            confidence = response.confidence.as_str(),
            tokens_used = response.tokens_used,
            response_time = response.response_time,
            has_exceptions = response.has_exceptions,
            rules = response.rule_ids_used.len(),
            "query completed"
        );

        response
    }
}

/// Confidence label from search result quality
fn assess_confidence(results: &[SearchResult]) -> ConfidenceTag {
    let Some(best) = results.first() else {
        return ConfidenceTag::Low;
    };
    let has_local = results.iter().take(3).any(|r| r.is_local);

    if (has_local && best.similarity > 0.6) || best.similarity > 0.7 {
        ConfidenceTag::High
    } else if best.similarity > 0.5 {
        ConfidenceTag::Medium
    } else {
        ConfidenceTag::Low
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_assessment_bands() {
        let corpus = RuleCorpus::with_builtin();
        let local = corpus.get("CCC-6").unwrap().clone();
        let general = corpus.get("17.1").unwrap().clone();

        let result = |rule: &Arc<crate::models::RuleRecord>, sim: f32| SearchResult {
            rule: rule.clone(),
            similarity: sim,
            is_local: rule.is_local,
        };

        assert_eq!(assess_confidence(&[]), ConfidenceTag::Low);
        assert_eq!(
            assess_confidence(&[result(&local, 0.65)]),
            ConfidenceTag::High
        );
        assert_eq!(
            assess_confidence(&[result(&general, 0.75)]),
            ConfidenceTag::High
        );
        assert_eq!(
            assess_confidence(&[result(&general, 0.55)]),
            ConfidenceTag::Medium
        );
        assert_eq!(
            assess_confidence(&[result(&general, 0.3)]),
            ConfidenceTag::Low
        );
    }

    #[test]
    fn test_round2() {
        assert!((round2(1.23456) - 1.23).abs() < f64::EPSILON);
        assert!((round2(0.005) - 0.01).abs() < f64::EPSILON);
    }
}
