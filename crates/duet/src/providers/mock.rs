use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{DuetError, DuetResult};
use crate::models::message::Message;
use crate::providers::base::{Completion, Provider, Usage};

type ReplyFn = dyn Fn(&str, &[Message]) -> String + Send + Sync;

/// A recorded call to the mock provider
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub model: String,
    pub messages: Vec<Message>,
}

/// A mock provider whose replies are a pure function of the model and messages
#[derive(Clone)]
pub struct MockProvider {
    reply: Arc<ReplyFn>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    failure: Option<(usize, DuetError)>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str, &[Message]) -> String + Send + Sync + 'static,
    {
        Self {
            reply: Arc::new(reply),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            delay: None,
        }
    }

    /// Reply with a fixed text per model, and an empty reply for unknown models
    pub fn with_replies(replies: &[(&str, &str)]) -> Self {
        let replies: Vec<(String, String)> = replies
            .iter()
            .map(|(model, reply)| (model.to_string(), reply.to_string()))
            .collect();
        Self::new(move |model, _| {
            replies
                .iter()
                .find(|(m, _)| m == model)
                .map(|(_, reply)| reply.clone())
                .unwrap_or_default()
        })
    }

    /// Fail with `error` on the given call, counting from 1
    pub fn failing_on(mut self, call: usize, error: DuetError) -> Self {
        self.failure = Some((call, error));
        self
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> DuetResult<Completion> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(MockCall {
                model: model.to_string(),
                messages: messages.to_vec(),
            });
            calls.len()
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some((n, error)) if *n == call => Err(error.clone()),
            _ => Ok(Completion::new(
                (self.reply)(model, messages),
                Usage::default(),
            )),
        }
    }
}
