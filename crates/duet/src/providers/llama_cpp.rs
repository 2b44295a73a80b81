use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::base::{check_request, Completion, Provider, Usage};
use super::configs::LlamaCppProviderConfig;
use crate::errors::{DuetError, DuetResult};
use crate::models::message::Message;

pub struct LlamaCppProvider {
    client: Client,
    config: LlamaCppProviderConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: Option<i32>,
    completion_tokens: Option<i32>,
    total_tokens: Option<i32>,
}

impl From<ResponseUsage> for Usage {
    fn from(usage: ResponseUsage) -> Self {
        let total_tokens = usage
            .total_tokens
            .or(match (usage.prompt_tokens, usage.completion_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });
        Usage::new(usage.prompt_tokens, usage.completion_tokens, total_tokens)
    }
}

impl LlamaCppProvider {
    pub fn new(config: LlamaCppProviderConfig) -> DuetResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlamaCppProviderConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        )
    }

    async fn post(&self, payload: &ChatRequest<'_>) -> DuetResult<ChatResponse> {
        let response = self.client.post(self.url()).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DuetError::Server { status, body });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| DuetError::malformed(format!("unexpected response body: {}", e)))
    }
}

#[async_trait]
impl Provider for LlamaCppProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> DuetResult<Completion> {
        check_request(model, messages)?;

        let payload = ChatRequest {
            model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self.post(&payload).await?;
        let usage = response.usage.map(Usage::from).unwrap_or_default();
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DuetError::malformed("response contained no choices"))?;

        Ok(Completion::new(choice.message.content, usage))
    }
}
