use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// GET /metrics
///
/// Renders whatever `Metrics` backend the state carries; with the noop
/// backend the body is empty but the endpoint still answers 200.
pub async fn metrics_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    // ---
    let body = app_state.metrics().render();

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
