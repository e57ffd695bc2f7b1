//! Unit tests for the query-interpretation pipeline
//!
//! Shared mock services live here so every test file exercises the real
//! pipeline against deterministic backends, never the network.

pub mod context_tests;
pub mod search_tests;

use std::sync::Arc;

use async_trait::async_trait;

use crate::embeddings::EmbeddingBackend;
use crate::errors::LinksLogicError;
use crate::errors::Result;
use crate::llm::Completion;
use crate::llm::CompletionBackend;

/// Deterministic embedder: a text containing the marker `simNNN` maps to a
/// vector whose cosine against the query axis is NNN/1000; anything else
/// maps to the query axis itself.
pub struct MarkerEmbedder;

pub fn marker_vector(text: &str) -> Vec<f32> {
    if let Some(pos) = text.find("sim") {
        let digits: String = text[pos + 3..].chars().take(3).collect();
        if digits.len() == 3 {
            if let Ok(n) = digits.parse::<u32>() {
                let cos = (n as f32 / 1000.0).min(1.0);
                return vec![cos, (1.0 - cos * cos).max(0.0).sqrt()];
            }
        }
    }
    vec![1.0, 0.0]
}

#[async_trait]
impl EmbeddingBackend for MarkerEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(marker_vector(text))
    }

    async fn embed_many(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        Ok(texts.into_iter().map(marker_vector).collect())
    }

    fn dimension(&self) -> usize {
        2
    }
}

/// Embedder whose every call fails
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingBackend for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(LinksLogicError::Embedding("embedding service down".to_string()))
    }

    async fn embed_many(&self, _texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        Err(LinksLogicError::Embedding("embedding service down".to_string()))
    }

    fn dimension(&self) -> usize {
        2
    }
}

/// Completion backend answering intent prompts and ruling prompts with
/// fixed replies
pub struct ScriptedCompletion {
    pub intent_reply: &'static str,
    pub answer_reply: &'static str,
    pub tokens_per_call: u32,
}

impl ScriptedCompletion {
    pub fn new(intent_reply: &'static str, answer_reply: &'static str) -> Self {
        Self {
            intent_reply,
            answer_reply,
            tokens_per_call: 50,
        }
    }
}

#[async_trait]
impl CompletionBackend for ScriptedCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<Completion> {
        let text = if prompt.starts_with("Golf question type?") {
            self.intent_reply
        } else {
            self.answer_reply
        };
        Ok(Completion {
            text: text.to_string(),
            tokens_used: self.tokens_per_call,
        })
    }
}

/// Completion backend whose every call fails
pub struct FailingCompletion;

#[async_trait]
impl CompletionBackend for FailingCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<Completion> {
        Err(LinksLogicError::Completion("completion service down".to_string()))
    }
}

/// Convenience alias used by the test files
pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
