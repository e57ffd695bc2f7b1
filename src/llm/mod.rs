//! Generative completion service
//!
//! Consumed as an opaque external collaborator behind [`CompletionBackend`].
//! Failures are error values the router downgrades to the fixed fallback
//! answer; they never reach callers as exceptions.

pub mod client;
pub mod prompts;

pub use client::CompletionClient;

use async_trait::async_trait;

use crate::errors::Result;

/// A generated completion and its token cost
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u32,
}

/// Contract for the external generative service
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Generate a completion for a prompt
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32)
        -> Result<Completion>;
}
