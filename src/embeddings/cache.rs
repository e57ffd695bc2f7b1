//! Embedding cache with an init-once rule table and a lazy query cache

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use sha2::Digest;
use sha2::Sha256;
use tracing::info;

use super::EmbeddingBackend;
use super::MAX_BATCH_SIZE;
use super::RULE_EMBED_MAX_CHARS;
use crate::corpus::RuleCorpus;
use crate::errors::Result;

/// Two-region embedding cache.
///
/// The rule table is filled once before any request is served and read-only
/// afterwards. The query cache is append-only, keyed by a content hash of
/// the query text; a race that computes the same embedding twice is benign.
/// Growth is unbounded by design (operator-controlled input space) and
/// observable via [`EmbeddingCache::cached_query_count`].
pub struct EmbeddingCache {
    backend: Arc<dyn EmbeddingBackend>,
    rule_table: HashMap<String, Vec<f32>>,
    query_cache: DashMap<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Precompute embeddings for every rule in the corpus (startup cost).
    ///
    /// # Errors
    /// - Embedding service failures during the batch calls
    pub async fn precompute(
        backend: Arc<dyn EmbeddingBackend>,
        corpus: &RuleCorpus,
    ) -> Result<Self> {
        let rules: Vec<_> = corpus.all().collect();
        let texts: Vec<String> = rules
            .iter()
            .map(|rule| rule.search_text.chars().take(RULE_EMBED_MAX_CHARS).collect())
            .collect();

        let mut rule_table = HashMap::with_capacity(rules.len());
        let mut embedded = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(MAX_BATCH_SIZE) {
            let batch = backend
                .embed_many(chunk.iter().map(String::as_str).collect())
                .await?;
            embedded.extend(batch);
        }

        for (rule, embedding) in rules.iter().zip(embedded) {
            rule_table.insert(rule.id.clone(), embedding);
        }

        info!("Precomputed embeddings for {} rules", rule_table.len());

        Ok(Self {
            backend,
            rule_table,
            query_cache: DashMap::new(),
        })
    }

    /// Cache with an empty rule table (tests and degraded startup)
    pub fn without_rules(backend: Arc<dyn EmbeddingBackend>) -> Self {
        Self {
            backend,
            rule_table: HashMap::new(),
            query_cache: DashMap::new(),
        }
    }

    /// Precomputed embedding for a rule id
    pub fn rule_embedding(&self, rule_id: &str) -> Option<&[f32]> {
        self.rule_table.get(rule_id).map(Vec::as_slice)
    }

    /// Embedding for a query text: cache hit or one embedding-service call
    pub async fn query_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let key = content_hash(text);

        if let Some(hit) = self.query_cache.get(&key) {
            return Ok(hit.clone());
        }

        let embedding = self.backend.embed(text).await?;
        self.query_cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    pub fn rule_count(&self) -> usize {
        self.rule_table.len()
    }

    pub fn cached_query_count(&self) -> usize {
        self.query_cache.len()
    }

    pub fn dimension(&self) -> usize {
        self.backend.dimension()
    }
}

/// Stable cache key for a source text
fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
