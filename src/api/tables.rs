use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::{error_response, AppState};

/// 可查询的表名列表 (来自登记表)
pub async fn list_tables(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.list_tables().await {
        Ok(list) => {
            info!("返回表清单: {} 张", list.len());
            Json(list).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// 表头信息: 列名与类别
pub async fn table_headers(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.service.headers(&name).await {
        Ok(headers) => Json(headers).into_response(),
        Err(e) => error_response(e),
    }
}
