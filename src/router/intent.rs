//! Lightweight intent classification
//!
//! One bounded completion call deciding which prompt strategy and retrieval
//! width the pipeline uses. Classification is never fatal: any failure
//! defaults to [`Intent::Other`].

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::llm::prompts;
use crate::llm::CompletionBackend;
use crate::models::Intent;

const INTENT_MAX_TOKENS: u32 = 10;
const INTENT_TEMPERATURE: f32 = 0.1;

/// Categorical classifier over the completion service
pub struct IntentClassifier {
    backend: Arc<dyn CompletionBackend>,
}

impl IntentClassifier {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Classify a question, returning the intent and the tokens spent
    pub async fn classify(&self, question: &str) -> (Intent, u32) {
        let prompt = prompts::intent_prompt(question);
        match self
            .backend
            .complete(&prompt, INTENT_MAX_TOKENS, INTENT_TEMPERATURE)
            .await
        {
            Ok(completion) => {
                let intent = parse_intent(&completion.text);
                debug!(intent = intent.as_str(), "intent classified");
                (intent, completion.tokens_used)
            }
            Err(e) => {
                warn!("Intent classification failed, defaulting to other: {e}");
                (Intent::Other, 0)
            }
        }
    }
}

/// Map the model's multiple-choice answer onto an intent
fn parse_intent(text: &str) -> Intent {
    match text
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
    {
        Some('A') => Intent::Position,
        Some('B') => Intent::Relief,
        Some('C') => Intent::Penalty,
        Some('D') => Intent::Procedure,
        _ => Intent::Other,
    }
}
