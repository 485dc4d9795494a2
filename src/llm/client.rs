//! Chat-completion transport

use crate::error::{Result, ScreenerError};
use crate::llm::prompts::ChatRequest;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Sends one chat request and returns the raw message content
pub trait ChatTransport {
    fn send(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// OpenAI-compatible HTTP transport
#[derive(Clone)]
pub struct OpenAiTransport {
    client: Client,
    endpoint: String,
}

impl OpenAiTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScreenerError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatTransport for OpenAiTransport {
    async fn send(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScreenerError::ProviderFailure(provider_error_message(
                status.as_u16(),
                &body,
            )));
        }

        extract_message_content(&body)
    }
}

/// Prefer the provider's own error message, fall back to status and body
pub fn provider_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => format!("HTTP status {}", status),
        Err(_) => format!("HTTP status {}: {}", status, body.trim()),
    }
}

/// Pull `choices[0].message.content` out of a completion body
pub fn extract_message_content(body: &str) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        ScreenerError::ProviderFailure(format!("Unexpected completion envelope: {}", e))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ScreenerError::MalformedResponse("response has no message content".to_string()))
}
