use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use duet::conversation::orchestrator::DEFAULT_TURNS;
use duet::conversation::TranscriptEntry;
use duet::errors::DuetError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
struct ConversationRequest {
    model_1: String,
    model_2: String,
    topic: String,
    #[serde(default = "default_turns")]
    turns: i64,
}

fn default_turns() -> i64 {
    DEFAULT_TURNS
}

#[derive(Debug, Deserialize, Serialize)]
struct ConversationResponse {
    transcript: String,
    entries: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ErrorResponse {
    error: String,
}

/// A conversation failure rendered as a JSON error body
struct ApiError(DuetError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DuetError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DuetError::Transport {
                timed_out: true, ..
            } => StatusCode::GATEWAY_TIMEOUT,
            DuetError::Transport { .. }
            | DuetError::Server { .. }
            | DuetError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            DuetError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationResponse>, ApiError> {
    // Unreadable bodies get the same JSON error shape as every other bad request
    let Json(request) =
        payload.map_err(|rejection| ApiError(DuetError::invalid_argument(rejection.body_text())))?;

    if request.turns > state.max_turns {
        return Err(ApiError(DuetError::invalid_argument(format!(
            "turns must be at most {}, got {}",
            state.max_turns, request.turns
        ))));
    }

    tracing::info!(
        model_1 = %request.model_1,
        model_2 = %request.model_2,
        turns = request.turns,
        "conversation requested"
    );

    let transcript = state
        .orchestrator
        .run(
            &request.model_1,
            &request.model_2,
            &request.topic,
            request.turns,
        )
        .await
        .map_err(|err| {
            tracing::error!("Conversation failed: {}", err);
            ApiError(err)
        })?;

    Ok(Json(ConversationResponse {
        transcript: transcript.render(),
        entries: transcript.entries().to_vec(),
    }))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/conversation", post(handler))
        .with_state(state)
}
