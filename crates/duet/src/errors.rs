use reqwest::StatusCode;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum DuetError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Server error: {status}: {body}")]
    Server { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Conversation cancelled")]
    Cancelled,
}

impl DuetError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        DuetError::InvalidArgument(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        DuetError::MalformedResponse(message.into())
    }
}

impl From<reqwest::Error> for DuetError {
    fn from(err: reqwest::Error) -> Self {
        DuetError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

pub type DuetResult<T> = Result<T, DuetError>;
