//! End-to-end pipeline tests over the built-in corpus with mock services

use std::sync::Arc;

use async_trait::async_trait;
use linkslogic::config::AppConfig;
use linkslogic::corpus::RuleCorpus;
use linkslogic::embeddings::EmbeddingBackend;
use linkslogic::llm::Completion;
use linkslogic::llm::CompletionBackend;
use linkslogic::models::ConfidenceTag;
use linkslogic::models::SourceTag;
use linkslogic::router::RulingService;
use linkslogic::Result;

struct UnitEmbedder;

#[async_trait]
impl EmbeddingBackend for UnitEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_many(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimension(&self) -> usize {
        2
    }
}

struct EchoCompletion;

#[async_trait]
impl CompletionBackend for EchoCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<Completion> {
        let text = if prompt.starts_with("Golf question type?") {
            "B".to_string()
        } else {
            "According to the Rules of Golf, Rule 9.5, the ball must be replaced.".to_string()
        };
        Ok(Completion {
            text,
            tokens_used: 42,
        })
    }
}

async fn build_service() -> RulingService {
    let config = AppConfig::default();
    RulingService::bootstrap(&config, Arc::new(UnitEmbedder), Arc::new(EchoCompletion))
        .await
        .expect("bootstrap succeeds with mock services")
}

#[tokio::test]
async fn test_bootstrap_precomputes_all_rule_embeddings() {
    let service = build_service().await;
    let corpus = service.corpus();
    assert!(corpus.club_count() >= 7);
    assert!(corpus.general_count() >= 20);
    assert!(service.template_count() >= 10);
    assert!(service.definition_count() >= 12);
}

#[tokio::test]
async fn test_template_path_end_to_end() {
    let service = build_service().await;
    let response = service
        .answer("I lost my ball in the woods on the back nine")
        .await;

    assert_eq!(response.source, SourceTag::TemplateHigh);
    assert_eq!(response.tokens_used, 0);
    assert_eq!(response.rule_ids_used, vec!["CCC-1".to_string()]);
}

#[tokio::test]
async fn test_retrieval_path_end_to_end() {
    let service = build_service().await;
    let response = service
        .answer("ball moved after my opponent stepped on it while searching")
        .await;

    assert_eq!(response.source, SourceTag::RetrievalWithExceptions);
    assert!(response.has_exceptions);
    assert!(response.answer.contains("Rule 9.5"));
    assert_eq!(response.tokens_used, 84);
    // Club evidence leads the context even with uniform similarity
    assert!(response.rule_ids_used[0].starts_with("CCC-"));
}

#[tokio::test]
async fn test_pipeline_never_panics_on_odd_input() {
    let service = build_service().await;
    let very_long = "long ".repeat(200);
    for question in ["", "   ", "?????", "a", very_long.as_str()] {
        let response = service.answer(question).await;
        assert!(!response.answer.is_empty());
    }
}

#[tokio::test]
async fn test_confidence_is_high_when_local_rules_lead() {
    let service = build_service().await;
    let response = service
        .answer("my opponent kicked my ball into the bushes, now what")
        .await;

    // Uniform similarity of 1.0 with local rules in the top results
    assert_eq!(response.confidence, ConfidenceTag::High);
}

#[tokio::test]
async fn test_corpus_integrity() {
    let corpus = RuleCorpus::with_builtin();
    for rule in corpus.all() {
        assert!(!rule.id.is_empty());
        assert!(!rule.title.is_empty());
        assert!(!rule.search_text.is_empty());
        assert_eq!(rule.is_local, rule.id.starts_with("CCC-"));
    }
}
