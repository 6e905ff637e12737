use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use super::{error_response, AppState};
use crate::models::context::Nl2SqlRequest;

pub async fn nl2sql_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Nl2SqlRequest>,
) -> impl IntoResponse {
    let question = payload.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "question must not be empty" })),
        )
            .into_response();
    }

    match state
        .service
        .answer(question, &payload.table_name, payload.execute)
        .await
    {
        Ok(answer) => Json(answer).into_response(),
        Err(e) => error_response(e),
    }
}
