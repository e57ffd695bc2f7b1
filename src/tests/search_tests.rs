//! Similarity search properties

use std::sync::Arc;

use crate::corpus::RuleCorpus;
use crate::embeddings::EmbeddingCache;
use crate::models::RuleRecord;
use crate::search::SearchEngine;
use crate::search::TopicalBoost;
use crate::tests::arc;
use crate::tests::MarkerEmbedder;

/// Rule whose embedding yields the given cosine (via the simNNN marker)
fn rule_with_sim(id: &str, sim_marker: &str) -> RuleRecord {
    RuleRecord::new(id, format!("rule {sim_marker}"), "body", vec![], false, vec![])
}

async fn engine_for(corpus: RuleCorpus) -> SearchEngine {
    let corpus = Arc::new(corpus);
    let cache = EmbeddingCache::precompute(arc(MarkerEmbedder), &corpus)
        .await
        .unwrap();
    SearchEngine::new(corpus, Arc::new(cache), 1.5)
}

#[tokio::test]
async fn test_precedence_boost_is_monotone() {
    // Local rules at several raw similarities against a spread of general
    // rules: no general rule of strictly lower raw similarity may outrank a
    // local rule
    let corpus = RuleCorpus::new(
        vec![rule_with_sim("CCC-A", "sim200"), rule_with_sim("CCC-B", "sim400")],
        vec![
            rule_with_sim("30.1", "sim500"),
            rule_with_sim("30.2", "sim300"),
            rule_with_sim("30.3", "sim100"),
        ],
    )
    .unwrap();

    let results = engine_for(corpus).await.search("query", 10).await;
    assert_eq!(results.len(), 5);

    for (local_pos, local) in results.iter().enumerate().filter(|(_, r)| r.is_local) {
        for (general_pos, general) in results.iter().enumerate().filter(|(_, r)| !r.is_local) {
            if general.similarity < local.similarity {
                assert!(
                    local_pos < general_pos,
                    "local {} (raw {}) ranked below general {} (raw {})",
                    local.rule.id,
                    local.similarity,
                    general.rule.id,
                    general.similarity
                );
            }
        }
    }
}

#[tokio::test]
async fn test_spec_scenario_forty_local_beats_fifty_general() {
    // Club-specific at 0.40 (key 0.60) must outrank general at 0.50
    let corpus = RuleCorpus::new(
        vec![rule_with_sim("CCC-A", "sim400")],
        vec![rule_with_sim("30.1", "sim500")],
    )
    .unwrap();

    let results = engine_for(corpus).await.search("query", 10).await;
    assert_eq!(results[0].rule.id, "CCC-A");
    assert!((results[0].similarity - 0.40).abs() < 1e-3);
    assert!((results[1].similarity - 0.50).abs() < 1e-3);
}

#[tokio::test]
async fn test_topical_boost_reorders_without_changing_set() {
    let corpus = Arc::new(
        RuleCorpus::new(
            vec![rule_with_sim("CCC-6", "sim200"), rule_with_sim("CCC-9", "sim400")],
            vec![],
        )
        .unwrap(),
    );
    let cache = Arc::new(
        EmbeddingCache::precompute(arc(MarkerEmbedder), &corpus)
            .await
            .unwrap(),
    );
    let engine = SearchEngine::with_boosts(
        corpus.clone(),
        cache.clone(),
        1.5,
        vec![TopicalBoost {
            phrase: "purple line".to_string(),
            rule_id: "CCC-6".to_string(),
            factor: 3.0,
        }],
    );

    // Without the phrase, the higher-similarity rule leads
    let plain = engine.search("query", 10).await;
    assert_eq!(plain[0].rule.id, "CCC-9");

    // Naming the boundary feature amplifies CCC-6 past it; same set
    let boosted = engine.search("query about the purple line", 10).await;
    assert_eq!(boosted[0].rule.id, "CCC-6");
    assert_eq!(plain.len(), boosted.len());

    // Reported similarity stays the raw cosine in both orderings
    for result in &boosted {
        assert!(result.similarity <= 1.0 && result.similarity >= -1.0);
    }
}

#[tokio::test]
async fn test_top_n_truncates_after_ranking() {
    let corpus = RuleCorpus::new(
        vec![rule_with_sim("CCC-A", "sim400")],
        vec![
            rule_with_sim("30.1", "sim500"),
            rule_with_sim("30.2", "sim300"),
        ],
    )
    .unwrap();

    let results = engine_for(corpus).await.search("query", 2).await;
    assert_eq!(results.len(), 2);
    // Best two by sort key: CCC-A (0.60) then 30.1 (0.50)
    assert_eq!(results[0].rule.id, "CCC-A");
    assert_eq!(results[1].rule.id, "30.1");
}

#[tokio::test]
async fn test_repeat_searches_share_the_query_cache() {
    let corpus = Arc::new(
        RuleCorpus::new(vec![], vec![rule_with_sim("30.1", "sim500")]).unwrap(),
    );
    let cache = Arc::new(
        EmbeddingCache::precompute(arc(MarkerEmbedder), &corpus)
            .await
            .unwrap(),
    );
    let engine = SearchEngine::new(corpus, cache.clone(), 1.5);

    engine.search("same question", 5).await;
    engine.search("same question", 5).await;
    assert_eq!(cache.cached_query_count(), 1);
}
