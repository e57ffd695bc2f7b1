//! Embedding generation and caching
//!
//! The embedding service is an external collaborator consumed behind the
//! [`EmbeddingBackend`] trait. Rule embeddings are computed once at startup;
//! query embeddings are computed lazily and cached for the process lifetime.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use linkslogic::config::AppConfig;
//! use linkslogic::corpus::RuleCorpus;
//! use linkslogic::embeddings::EmbeddingCache;
//! use linkslogic::embeddings::EmbeddingClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = Arc::new(EmbeddingClient::from_config(&config)?);
//!     let corpus = RuleCorpus::with_builtin();
//!     let cache = EmbeddingCache::precompute(client, &corpus).await?;
//!     println!("{} rule embeddings ready", cache.rule_count());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;

pub use cache::EmbeddingCache;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use async_trait::async_trait;

use crate::errors::Result;

/// Default embedding dimension for text-embedding-3-small
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Maximum batch size for embedding generation
pub const MAX_BATCH_SIZE: usize = 100;

/// Rule search text is truncated to this many characters before embedding
pub const RULE_EMBED_MAX_CHARS: usize = 500;

/// Contract for the external embedding service
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts in one call
    async fn embed_many(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>>;

    /// Fixed output dimension of this backend
    fn dimension(&self) -> usize;
}
