use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{DuetError, DuetResult};
use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// The reply text of a single completion along with whatever usage the endpoint reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

impl Completion {
    pub fn new<S: Into<String>>(text: S, usage: Usage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Base trait for inference endpoints
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send `messages` to `model` in a single exchange and return its first reply
    async fn complete(&self, model: &str, messages: &[Message]) -> DuetResult<Completion>;
}

/// Reject requests that could never be served, before touching the network
pub fn check_request(model: &str, messages: &[Message]) -> DuetResult<()> {
    if model.is_empty() {
        return Err(DuetError::invalid_argument("model identifier must not be empty"));
    }
    if messages.is_empty() {
        return Err(DuetError::invalid_argument("at least one message is required"));
    }
    Ok(())
}
