use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::transcript::{Speaker, Transcript, TranscriptEntry};
use crate::errors::{DuetError, DuetResult};
use crate::models::message::Message;
use crate::providers::base::Provider;

pub const MODEL_1_SYSTEM_PROMPT: &str = "You are Model 1, a helpful assistant.";
pub const MODEL_2_SYSTEM_PROMPT: &str = "You are Model 2, a helpful assistant.";

/// Turn count used by the front-ends when none is given
pub const DEFAULT_TURNS: i64 = 5;
/// Upper bound the front-ends offer; the orchestrator itself only requires at least one turn
pub const MAX_RECOMMENDED_TURNS: i64 = 10;

/// Mutable state of a single run. Never outlives the run that created it.
struct ConversationState {
    transcript: Transcript,
    pending: String,
}

impl ConversationState {
    fn new(topic: &str) -> Self {
        let mut transcript = Transcript::default();
        transcript.push(TranscriptEntry::new(Speaker::Topic, topic));
        Self {
            transcript,
            pending: topic.to_string(),
        }
    }

    /// The text the next speaker responds to
    fn pending(&self) -> &str {
        &self.pending
    }

    fn record(&mut self, speaker: Speaker, reply: String) {
        self.transcript
            .push(TranscriptEntry::new(speaker, reply.as_str()));
        self.pending = reply;
    }

    fn into_transcript(self) -> Transcript {
        self.transcript
    }
}

/// Orchestrator lets two models take turns responding to each other
#[derive(Clone)]
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Run `turns` full exchanges starting from `topic`
    ///
    /// Any failure aborts the run; a transcript is only returned when every turn completed.
    pub async fn run(
        &self,
        model_a: &str,
        model_b: &str,
        topic: &str,
        turns: i64,
    ) -> DuetResult<Transcript> {
        self.run_with_cancellation(model_a, model_b, topic, turns, &CancellationToken::new())
            .await
    }

    /// Like [`Orchestrator::run`], but stops with [`DuetError::Cancelled`] as soon as `cancel`
    /// fires, including while a request is in flight
    pub async fn run_with_cancellation(
        &self,
        model_a: &str,
        model_b: &str,
        topic: &str,
        turns: i64,
        cancel: &CancellationToken,
    ) -> DuetResult<Transcript> {
        validate(model_a, model_b, turns)?;

        info!(model_a, model_b, turns, "starting conversation");
        let mut state = ConversationState::new(topic);

        for turn in 1..=turns {
            let reply_a = self
                .half_turn(model_a, MODEL_1_SYSTEM_PROMPT, state.pending(), cancel)
                .await?;
            state.record(Speaker::Model1, reply_a);

            let reply_b = self
                .half_turn(model_b, MODEL_2_SYSTEM_PROMPT, state.pending(), cancel)
                .await?;
            state.record(Speaker::Model2, reply_b);

            debug!(turn, "turn complete");
        }

        let transcript = state.into_transcript();
        info!(entries = transcript.len(), "conversation finished");
        Ok(transcript)
    }

    async fn half_turn(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> DuetResult<String> {
        if cancel.is_cancelled() {
            return Err(DuetError::Cancelled);
        }

        // Each call is a fresh exchange: no history beyond the latest utterance
        let messages = [Message::system(system), Message::user(prompt)];

        let completion = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(DuetError::Cancelled),
            result = self.provider.complete(model, &messages) => result?,
        };

        debug!(
            model,
            reply_len = completion.text.len(),
            input_tokens = ?completion.usage.input_tokens,
            output_tokens = ?completion.usage.output_tokens,
            "model replied"
        );
        Ok(completion.text)
    }
}

fn validate(model_a: &str, model_b: &str, turns: i64) -> DuetResult<()> {
    if turns < 1 {
        return Err(DuetError::invalid_argument(format!(
            "turns must be at least 1, got {}",
            turns
        )));
    }
    if model_a.is_empty() {
        return Err(DuetError::invalid_argument("model 1 identifier must not be empty"));
    }
    if model_b.is_empty() {
        return Err(DuetError::invalid_argument("model 2 identifier must not be empty"));
    }
    Ok(())
}
