use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account. The password hash never leaves the server;
/// it is excluded from serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Reference data; read-only through the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub genre_id: i64,
    pub name: String,
}

/// A listing: one record for sale, owned by its seller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub record_id: i64,
    pub image_src: String,
    pub artist: String,
    pub album_name: String,
    pub genre_id: i64,
    pub condition: String,
    pub price: i32,
    pub info: String,
    pub seller_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A record with its genre name resolved, as returned by product lookups.
#[derive(Debug, Clone, Serialize)]
pub struct RecordWithGenre {
    #[serde(flatten)]
    pub record: Record,
    pub genre: String,
}

/// Fields for a new listing. The seller comes from the authenticated
/// principal, never from the request body.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub image_src: String,
    pub artist: String,
    pub album_name: String,
    pub genre_id: i64,
    pub condition: String,
    pub price: i32,
    pub info: String,
    pub seller_id: i64,
}

/// One line in a cart. Every add inserts a fresh row with quantity 1;
/// adds are never merged into an existing line for the same record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub items_id: i64,
    pub cart_id: i64,
    pub record_id: i64,
    pub quantity: i32,
}

/// A cart line joined to its record, as returned by the cart view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub user_id: i64,
    pub cart_id: i64,
    pub items_id: i64,
    pub record_id: i64,
    pub quantity: i32,
    pub image_src: String,
    pub artist: String,
    pub album_name: String,
    pub genre_id: i64,
    pub condition: String,
    pub price: i32,
    pub info: String,
    pub seller_id: i64,
}
