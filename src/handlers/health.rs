use crate::app_state::AppState;
use crate::handlers::shared_types::ApiError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default (no query parameters), performs a light check to confirm the web server
///   is running.
///
/// - If `mode=full` is passed as a query parameter, also round-trips to PostgreSQL to
///   verify database connectivity.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` if server (and database, in full mode) are healthy.
/// - `500 INTERNAL SERVER ERROR` with `{ "status": "error" }` if the database check fails.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> Result<(StatusCode, Json<HealthResponse>), ApiError> {
    // ---
    match params.mode.as_deref() {
        Some("full") => {
            // Full health check: round-trip to the database
            match state.repository().ping().await {
                Ok(()) => Ok((StatusCode::OK, Json(HealthResponse { status: "ok" }))),
                Err(err) => {
                    tracing::error!("health check database ping failed: {err}");
                    Ok((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(HealthResponse { status: "error" }),
                    ))
                }
            }
        }
        _ => {
            // Light health check
            Ok((StatusCode::OK, Json(HealthResponse { status: "ok" })))
        }
    }
}
