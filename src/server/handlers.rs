//! Route handlers and error rendering

use super::AppState;
use crate::copilot::{ChatReply, ChatRequest};
use crate::errors::CopilotError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

/// Stable user-facing message for any backend failure
pub const OFFLINE_MESSAGE: &str = "AI Copilot is currently offline. Please try again later.";

impl IntoResponse for CopilotError {
    fn into_response(self) -> Response {
        match self {
            CopilotError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            other => {
                error!(error = %other, "AI Error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": OFFLINE_MESSAGE, "details": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// `POST /api/ai/chat`
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, CopilotError> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());

    async move {
        let Json(body) = body.map_err(|rejection| {
            CopilotError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
        })?;

        let request = ChatRequest::from_json(&body)?;
        let reply = state.copilot.chat(&request).await?;
        Ok(Json(reply))
    }
    .instrument(span)
    .await
}

/// `GET /api/health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "CareBridge Backend is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
