//! Chat-completions client for OpenAI-compatible endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Completion;
use super::CompletionBackend;
use crate::config::AppConfig;
use crate::errors::LinksLogicError;
use crate::errors::Result;

/// Client for the generative completion service
pub struct CompletionClient {
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl CompletionClient {
    /// Create a new completion client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        model: String,
        endpoint: String,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LinksLogicError::Http(e.to_string()))?;

        Ok(Self {
            model,
            endpoint,
            api_key,
            client,
        })
    }

    /// Create from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.llm.model.clone(),
            config.llm.endpoint.clone(),
            config.llm.api_key.clone(),
            config.llm.request_timeout_secs,
        )
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LinksLogicError::Config("LLM API key not provided".to_string()))?;

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
            usage: Option<Usage>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        #[derive(Deserialize)]
        struct Usage {
            total_tokens: u32,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LinksLogicError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LinksLogicError::Completion(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response.json().await.map_err(|e| {
            LinksLogicError::Completion(format!("Failed to parse response: {e}"))
        })?;

        let text = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LinksLogicError::Completion("No completion in response".to_string()))?;

        Ok(Completion {
            text,
            tokens_used: result.usage.map_or(0, |u| u.total_tokens),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let client = CompletionClient::new(
            "gpt-4".to_string(),
            "https://api.openai.com/v1".to_string(),
            None,
            5,
        )
        .unwrap();

        let result = client.complete("hello", 10, 0.1).await;
        assert!(matches!(result, Err(LinksLogicError::Config(_))));
    }
}
