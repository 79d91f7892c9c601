//! Registration and sign-in handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::{self, Claims};
use crate::domain::User;
use crate::handlers::shared_types::{is_unique_violation, ApiError};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    // ---
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    // ---
    pub token: String,
    pub user: Claims,
}

/// POST /api/register
///
/// Creates an account. The password is hashed before storage; the response
/// is the created user row without the hash.
///
/// - `201 Created` with the new user on success.
/// - `400 Bad Request` when username or password is empty.
/// - `409 Conflict` when the username is already taken.
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    // ---
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    let hashed = auth::hash_password(&req.password)?;

    let user = state
        .repository()
        .create_user(&req.username, &hashed)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("username already exists")
            } else {
                ApiError::Internal(e)
            }
        })?;

    state.metrics().record_user_registered();
    tracing::info!("registered user: {}", user.username);

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/sign-in
///
/// Verifies credentials and issues a signed bearer token embedding
/// `{userId, username}`. All failure modes (missing fields, unknown user,
/// wrong password) collapse into the same 401 so responses do not reveal
/// which usernames exist.
#[tracing::instrument(skip(state, req))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    // ---
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::unauthorized("invalid login"));
    }

    let user = state
        .repository()
        .get_user_by_username(&req.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid login"))?;

    if !auth::verify_password(&req.password, &user.hashed_password)? {
        return Err(ApiError::unauthorized("invalid login"));
    }

    let claims = Claims {
        user_id: user.user_id,
        username: user.username,
    };
    let token = state.tokens().sign(&claims)?;

    tracing::info!("signed in user: {}", claims.username);

    Ok(Json(SignInResponse {
        token,
        user: claims,
    }))
}
