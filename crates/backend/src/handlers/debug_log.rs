use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::debug_log::{
    ClearLogsRequest, ClearLogsResponse, CreateLogRequest, LogsQuery, LogsResponse,
};
use serde_json::json;

use super::error::ApiError;
use crate::shared::debug_log::{self, query::LogFilter, repository};

/// GET /api/logs
pub async fn list(Query(query): Query<LogsQuery>) -> Result<Json<LogsResponse>, ApiError> {
    let filter = LogFilter::from_query(&query);
    let response = repository::get_logs(&filter).await?;
    Ok(Json(response))
}

/// POST /api/logs/clear
///
/// Without a body (or without `older_than`) every record is deleted.
pub async fn clear(
    body: Option<Json<ClearLogsRequest>>,
) -> Result<Json<ClearLogsResponse>, ApiError> {
    let older_than = body.and_then(|Json(req)| req.older_than);

    let deleted = match older_than {
        Some(days) => repository::delete_older_than(days).await?,
        None => repository::clear_logs().await?,
    };
    tracing::info!("debug log cleared: {} record(s) deleted", deleted);

    Ok(Json(ClearLogsResponse {
        cleared: true,
        stats: repository::get_stats().await?,
    }))
}

/// POST /api/logs
pub async fn create(
    Json(req): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let log = debug_log::prepare(&req, None);
    if log.message.is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }
    let id = repository::insert(log).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
