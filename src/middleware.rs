//! Request pipeline stages applied ahead of the handlers.
//!
//! The auth stage verifies the bearer token and attaches a [`Principal`]
//! extension; requests without a valid token are rejected with 401 before a
//! protected handler ever runs. The metrics stage times every request.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::app_state::AppState;
use crate::auth::Principal;
use crate::handlers::ApiError;

/// Auth stage for protected routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // ---
    let token = extract_bearer(req.headers())?;

    let claims = state
        .tokens()
        .verify(token)
        .map_err(|_| ApiError::unauthorized("invalid or missing token"))?;

    req.extensions_mut().insert(Principal::from(claims));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    // ---
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("authorization header required"))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("malformed authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("bearer token required"))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("bearer token required"));
    }

    Ok(token)
}

/// Records duration, path, method and status for every request.
pub async fn track_requests(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let path = req.uri().path().to_owned();
    let method = req.method().clone();

    let response = next.run(req).await;

    state
        .metrics()
        .record_http_request(start, &path, method.as_str(), response.status().as_u16());

    response
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        // ---
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        // ---
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_rejected() {
        // ---
        assert!(extract_bearer(&HeaderMap::new()).is_err());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        // ---
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer(&headers).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        // ---
        let headers = headers_with("Bearer   ");
        assert!(extract_bearer(&headers).is_err());
    }
}
