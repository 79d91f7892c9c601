//! Listing and genre handlers: create a listing (authenticated, with an
//! uploaded image) and the public browse/read endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;

use crate::app_state::AppState;
use crate::auth::Principal;
use crate::domain::{Genre, NewRecord, Record, RecordWithGenre};
use crate::handlers::shared_types::{parse_positive_id, ApiError};

/// Collected multipart fields for a new listing.
#[derive(Default)]
struct ListingForm {
    // ---
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    condition: Option<String>,
    price: Option<String>,
    info: Option<String>,
    image: Option<(Option<String>, axum::body::Bytes)>,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    // ---
    value.ok_or_else(|| ApiError::bad_request(format!("{name} is required")))
}

/// POST /api/create-listing
///
/// Multipart form: an `image` file plus the text fields
/// `artist`, `album`, `genre`, `condition`, `price`, `info`.
/// The seller is always the authenticated principal.
///
/// - `201 Created` with the persisted record.
/// - `400 Bad Request` on a missing image or field, or a non-numeric
///   genre/price.
/// - `401 Unauthorized` without a valid bearer token (middleware).
#[tracing::instrument(skip(state, principal, multipart))]
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    // ---
    let mut form = ListingForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let read_err = |e| ApiError::bad_request(format!("unreadable multipart field: {e}"));
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(read_err)?;
                form.image = Some((filename, data));
            }
            Some("artist") => form.artist = Some(field.text().await.map_err(read_err)?),
            Some("album") => form.album = Some(field.text().await.map_err(read_err)?),
            Some("genre") => form.genre = Some(field.text().await.map_err(read_err)?),
            Some("condition") => form.condition = Some(field.text().await.map_err(read_err)?),
            Some("price") => form.price = Some(field.text().await.map_err(read_err)?),
            Some("info") => form.info = Some(field.text().await.map_err(read_err)?),
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    let (filename, data) = form
        .image
        .ok_or_else(|| ApiError::bad_request("image file is required"))?;

    let genre_id = parse_positive_id(&required(form.genre, "genre")?, "genre")?;
    let price: i32 = required(form.price, "price")?
        .parse()
        .map_err(|_| ApiError::bad_request("price must be a number"))?;

    let image_src = state.uploads().save(filename.as_deref(), &data).await?;

    let record = state
        .repository()
        .create_record(NewRecord {
            image_src,
            artist: required(form.artist, "artist")?,
            album_name: required(form.album, "album")?,
            genre_id,
            condition: required(form.condition, "condition")?,
            price,
            info: required(form.info, "info")?,
            seller_id: principal.user_id,
        })
        .await?;

    state.metrics().record_listing_created();
    tracing::info!(
        "created listing {} ({} - {})",
        record.record_id,
        record.artist,
        record.album_name
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/get-genres
///
/// Unauthenticated read of all genres.
#[tracing::instrument(skip(state))]
pub async fn get_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    // ---
    let genres = state.repository().list_genres().await?;
    Ok(Json(genres))
}

/// GET /api/all-products
///
/// Unauthenticated read of all records, no filtering or pagination.
#[tracing::instrument(skip(state))]
pub async fn all_products(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    // ---
    let records = state.repository().list_records().await?;
    Ok(Json(records))
}

/// GET /api/products/{recordId}
///
/// - `200 OK` with the record and its genre name resolved.
/// - `400 Bad Request` for a non-numeric or non-positive id.
/// - `404 Not Found` when no row matches.
#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<Json<RecordWithGenre>, ApiError> {
    // ---
    let record_id = parse_positive_id(&record_id, "recordId")?;

    let product = state
        .repository()
        .get_record_with_genre(record_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("cannot find record with recordId: {record_id}"))
        })?;

    Ok(Json(product))
}

#[derive(Debug, Serialize)]
pub struct GenreNameResponse {
    // ---
    pub name: String,
}

/// GET /api/genre/{genreId}
///
/// Same id-validation pattern as products, scoped to genres.
#[tracing::instrument(skip(state))]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<Json<GenreNameResponse>, ApiError> {
    // ---
    let genre_id = parse_positive_id(&genre_id, "genreId")?;

    let name = state
        .repository()
        .get_genre_name(genre_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("cannot find genre with genreId: {genre_id}"))
        })?;

    Ok(Json(GenreNameResponse { name }))
}
