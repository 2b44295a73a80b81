//! These models represent the objects passed between the orchestrator and the inference endpoint
//!
//! The endpoint speaks the OpenAI chat completions format, so a message is just a role and a
//! single text body and serializes straight into a request.
pub mod message;
pub mod role;
