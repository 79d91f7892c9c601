//! Cart handlers. The cart itself is created lazily on first add; every add
//! is an independent line item with quantity 1.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::Principal;
use crate::domain::{CartItem, CartLine, RecordWithGenre};
use crate::handlers::shared_types::{parse_positive_id, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    // ---
    pub record_id: i64,
}

/// The added record joined with its genre, plus the new cart line's id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    // ---
    #[serde(flatten)]
    pub product: RecordWithGenre,
    pub items_id: i64,
}

/// POST /api/cart/add
///
/// Adds a record to the principal's cart, creating the cart on first use.
/// Adding the same record twice yields two distinct cart lines.
///
/// - `201 Created` with the record and the new `itemsId`.
/// - `400 Bad Request` for a non-positive record id.
/// - `404 Not Found` when the record does not exist.
#[tracing::instrument(skip(state, principal, req))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<AddToCartResponse>), ApiError> {
    // ---
    if req.record_id <= 0 {
        return Err(ApiError::bad_request("recordId must be a positive integer"));
    }

    let product = state
        .repository()
        .get_record_with_genre(req.record_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "cannot find record with recordId: {}",
                req.record_id
            ))
        })?;

    let item = state
        .repository()
        .add_cart_item(principal.user_id, req.record_id)
        .await?;

    state.metrics().record_cart_item_added();
    tracing::info!(
        "added record {} to cart {} (item {})",
        req.record_id,
        item.cart_id,
        item.items_id
    );

    Ok((
        StatusCode::CREATED,
        Json(AddToCartResponse {
            product,
            items_id: item.items_id,
        }),
    ))
}

/// GET /api/cart
///
/// All of the principal's cart lines joined to their records.
#[tracing::instrument(skip(state, principal))]
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<CartLine>>, ApiError> {
    // ---
    let lines = state.repository().cart_for_user(principal.user_id).await?;
    Ok(Json(lines))
}

/// DELETE /api/cart/remove/{itemsId}
///
/// Deletes one cart line, scoped to the principal's own cart. Removing an
/// already-removed (or someone else's) item returns `null` rather than an
/// error, so removal is idempotent-to-empty.
#[tracing::instrument(skip(state, principal))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(items_id): Path<String>,
) -> Result<Json<Option<CartItem>>, ApiError> {
    // ---
    let items_id = parse_positive_id(&items_id, "itemsId")?;

    let removed = state
        .repository()
        .remove_cart_item(principal.user_id, items_id)
        .await?;

    Ok(Json(removed))
}
