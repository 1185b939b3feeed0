//! HTTP Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;

use pardus_core::DispatchRequest;

use crate::ollama::OllamaChatRequest;
use crate::state::AppState;

/// Error body, `{"detail": ..}` on the wire
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

type HandlerError = (StatusCode, Json<ErrorBody>);

fn handler_error(status: StatusCode, detail: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Dispatch endpoint: forwards the instruction plus tool schemas to
/// Ollama and returns its chat completion verbatim.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<Value>, HandlerError> {
    tracing::info!(
        input = %request.input,
        model = %request.model,
        tools = request.tools.len(),
        "incoming chat request"
    );

    if request.input.is_empty() {
        tracing::error!("rejecting request with empty input");
        return Err(handler_error(
            StatusCode::BAD_REQUEST,
            "input field is required",
        ));
    }

    let payload = OllamaChatRequest::from_dispatch(request);
    if let Ok(outbound) = serde_json::to_value(&payload) {
        tracing::debug!("request to Ollama: {}", outbound);
    }

    let response = state
        .client
        .post(&state.config.ollama_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("failed to send to Ollama: {}", e);
            handler_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to communicate with Ollama: {e}"),
            )
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Ollama returned error: {} {}", status, body);
        return Err(handler_error(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            format!("Ollama API error: {status}: {body}"),
        ));
    }

    let result: Value = response.json().await.map_err(|e| {
        tracing::error!("Ollama response was not JSON: {}", e);
        handler_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to communicate with Ollama: {e}"),
        )
    })?;

    tracing::debug!("response from Ollama: {}", result);
    log_completion(&result);

    Ok(Json(result))
}

/// Log what the model decided, without reshaping the passthrough value.
fn log_completion(result: &Value) {
    let Some(choice) = result
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    else {
        return;
    };

    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let tool_calls = choice
        .get("message")
        .and_then(|message| message.get("tool_calls"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    if tool_calls > 0 {
        tracing::info!(tool_calls, finish_reason, "tool calls detected");
    } else {
        tracing::info!(finish_reason, "no tool calls in response");
    }
}
