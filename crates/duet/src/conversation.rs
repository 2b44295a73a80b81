//! Turn-taking between two models
//!
//! The orchestrator owns a run from start to finish: it seeds the transcript with the topic,
//! alternates Model 1 and Model 2, and hands back the finished [`Transcript`].
pub mod orchestrator;
pub mod transcript;

pub use orchestrator::Orchestrator;
pub use transcript::{Speaker, Transcript, TranscriptEntry};
