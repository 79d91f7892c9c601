use super::models::{CartItem, CartLine, Genre, NewRecord, Record, RecordWithGenre, User};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction for marketplace data persistence.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Create a new user with an already-hashed password.
    async fn create_user(&self, username: &str, hashed_password: &str) -> Result<User>;

    /// Get user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// All genres, in id order.
    async fn list_genres(&self) -> Result<Vec<Genre>>;

    /// Name of a single genre, if it exists.
    async fn get_genre_name(&self, genre_id: i64) -> Result<Option<String>>;

    /// Persist a new listing and return the created row.
    async fn create_record(&self, new: NewRecord) -> Result<Record>;

    /// All listings, unfiltered.
    async fn list_records(&self) -> Result<Vec<Record>>;

    /// A single listing joined with its genre name.
    async fn get_record_with_genre(&self, record_id: i64) -> Result<Option<RecordWithGenre>>;

    /// Add a record to the user's cart, creating the cart on first use.
    /// Always inserts a new line with quantity 1.
    async fn add_cart_item(&self, user_id: i64, record_id: i64) -> Result<CartItem>;

    /// All cart lines for a user, joined to their records.
    async fn cart_for_user(&self, user_id: i64) -> Result<Vec<CartLine>>;

    /// Delete a cart item by id, scoped to the user's own cart.
    /// Returns the deleted row, or `None` if nothing matched.
    async fn remove_cart_item(&self, user_id: i64, items_id: i64) -> Result<Option<CartItem>>;

    /// Round-trip to the database, for health checks.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
