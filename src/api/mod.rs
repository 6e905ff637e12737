pub mod chat;
pub mod tables;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::core::error::SynthesisError;
use crate::service::{Nl2SqlService, ServiceError};

pub struct AppState {
    pub service: Nl2SqlService,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/nl2sql", post(chat::nl2sql_query))
        .route("/api/tables", get(tables::list_tables))
        .route("/api/tables/{name}/headers", get(tables::table_headers))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub(crate) fn error_response(e: ServiceError) -> Response {
    let status = match &e {
        ServiceError::UnknownTable(_) => StatusCode::NOT_FOUND,
        ServiceError::Synthesis(SynthesisError::SchemaMismatch { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Synthesis(SynthesisError::PredictionUnavailable(_)) => StatusCode::BAD_GATEWAY,
        ServiceError::Synthesis(SynthesisError::SynthesisAborted(_)) => StatusCode::GATEWAY_TIMEOUT,
        ServiceError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("请求处理失败: {}", e);
    }
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
