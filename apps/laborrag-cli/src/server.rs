//! HTTP boundary: `POST /ask` and `GET /healthz`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use laborrag_core::Error;
use laborrag_hybrid::RagContext;

pub const MISSING_QUESTION: &str = "질문을 입력해주세요.";

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<RagContext>,
    pub top_k: usize,
}

impl AppState {
    pub fn new(context: Arc<RagContext>) -> Self {
        let top_k = context.settings().server.top_k;
        Self { context, top_k }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ask", post(ask)).route("/healthz", get(healthz)).with_state(state)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let question = payload
        .ok()
        .and_then(|Json(req)| req.question)
        .map(|q| q.trim().to_string())
        .unwrap_or_default();
    if question.is_empty() {
        return failure(StatusCode::BAD_REQUEST, MISSING_QUESTION.to_string());
    }

    let context = Arc::clone(&state.context);
    let top_k = state.top_k;
    let outcome = tokio::task::spawn_blocking(move || context.ask(&question, top_k)).await;

    match outcome {
        Ok(Ok(answer)) => (StatusCode::OK, Json(json!({ "answer": answer, "success": true }))),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "question failed");
            failure(status_for(&err), format!("오류가 발생했습니다: {err}"))
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "answer task aborted");
            failure(StatusCode::INTERNAL_SERVER_ERROR, format!("오류가 발생했습니다: {join_err}"))
        }
    }
}

/// Status code reported for a pipeline error.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::EmptyQuery => StatusCode::BAD_REQUEST,
        e if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(status: StatusCode, message: String) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message, "success": false })))
}
