use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::{
    CartItem, CartLine, Genre, NewRecord, Record, RecordWithGenre, Repository, RepositoryPtr, User,
};

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    hashed_password: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            user_id: r.user_id,
            username: r.username,
            hashed_password: r.hashed_password,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    genre_id: i64,
    name: String,
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    record_id: i64,
    image_src: String,
    artist: String,
    album_name: String,
    genre_id: i64,
    condition: String,
    price: i32,
    info: String,
    seller_id: i64,
    created_at: DateTime<Utc>,
    // Present only on joined product queries.
    #[sqlx(default)]
    genre: Option<String>,
}

impl From<RecordRow> for Record {
    fn from(r: RecordRow) -> Self {
        Record {
            record_id: r.record_id,
            image_src: r.image_src,
            artist: r.artist,
            album_name: r.album_name,
            genre_id: r.genre_id,
            condition: r.condition,
            price: r.price,
            info: r.info,
            seller_id: r.seller_id,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    items_id: i64,
    cart_id: i64,
    record_id: i64,
    quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(r: CartItemRow) -> Self {
        CartItem {
            items_id: r.items_id,
            cart_id: r.cart_id,
            record_id: r.record_id,
            quantity: r.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    user_id: i64,
    cart_id: i64,
    items_id: i64,
    record_id: i64,
    quantity: i32,
    image_src: String,
    artist: String,
    album_name: String,
    genre_id: i64,
    condition: String,
    price: i32,
    info: String,
    seller_id: i64,
}

const RECORD_WITH_GENRE_SQL: &str = "SELECT r.record_id, r.image_src, r.artist, r.album_name,
            r.genre_id, r.condition, r.price, r.info, r.seller_id, r.created_at,
            g.name AS genre
     FROM records r
     JOIN genres g USING (genre_id)
     WHERE r.record_id = $1";

pub fn create_postgres_repository(pool: PgPool) -> RepositoryPtr {
    // ---
    Arc::new(PostgresRepository::new(pool))
}

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Repository for PostgresRepository {
    // ---
    async fn create_user(&self, username: &str, hashed_password: &str) -> Result<User> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, hashed_password)
             VALUES ($1, $2)
             RETURNING user_id, username, hashed_password, created_at",
        )
        .bind(username)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, username, hashed_password, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        // ---
        let rows =
            sqlx::query_as::<_, GenreRow>("SELECT genre_id, name FROM genres ORDER BY genre_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|r| Genre {
                genre_id: r.genre_id,
                name: r.name,
            })
            .collect())
    }

    async fn get_genre_name(&self, genre_id: i64) -> Result<Option<String>> {
        // ---
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM genres WHERE genre_id = $1")
                .bind(genre_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(name,)| name))
    }

    async fn create_record(&self, new: NewRecord) -> Result<Record> {
        // ---
        let row = sqlx::query_as::<_, RecordRow>(
            "INSERT INTO records
                 (image_src, artist, album_name, genre_id, condition, price, info, seller_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING record_id, image_src, artist, album_name, genre_id,
                       condition, price, info, seller_id, created_at",
        )
        .bind(&new.image_src)
        .bind(&new.artist)
        .bind(&new.album_name)
        .bind(new.genre_id)
        .bind(&new.condition)
        .bind(new.price)
        .bind(&new.info)
        .bind(new.seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_records(&self) -> Result<Vec<Record>> {
        // ---
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT record_id, image_src, artist, album_name, genre_id,
                    condition, price, info, seller_id, created_at
             FROM records ORDER BY record_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_record_with_genre(&self, record_id: i64) -> Result<Option<RecordWithGenre>> {
        // ---
        let row = sqlx::query_as::<_, RecordRow>(RECORD_WITH_GENRE_SQL)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| {
            let genre = r.genre.clone().unwrap_or_default();
            RecordWithGenre {
                record: r.into(),
                genre,
            }
        }))
    }

    async fn add_cart_item(&self, user_id: i64, record_id: i64) -> Result<CartItem> {
        // ---
        // Lazy cart creation. The UNIQUE (user_id) constraint makes this
        // race-safe under concurrent first adds; losers fall through to the
        // existing row.
        sqlx::query("INSERT INTO carts (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        // Each add is its own line item; no merge with an existing row for
        // the same record.
        let row = sqlx::query_as::<_, CartItemRow>(
            "INSERT INTO cart_items (cart_id, record_id, quantity)
             SELECT cart_id, $2, 1 FROM carts WHERE user_id = $1
             RETURNING items_id, cart_id, record_id, quantity",
        )
        .bind(user_id)
        .bind(record_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn cart_for_user(&self, user_id: i64) -> Result<Vec<CartLine>> {
        // ---
        let rows = sqlx::query_as::<_, CartLineRow>(
            "SELECT c.user_id, ci.cart_id, ci.items_id, ci.record_id, ci.quantity,
                    r.image_src, r.artist, r.album_name, r.genre_id,
                    r.condition, r.price, r.info, r.seller_id
             FROM carts c
             JOIN cart_items ci USING (cart_id)
             JOIN records r USING (record_id)
             WHERE c.user_id = $1
             ORDER BY ci.items_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CartLine {
                user_id: r.user_id,
                cart_id: r.cart_id,
                items_id: r.items_id,
                record_id: r.record_id,
                quantity: r.quantity,
                image_src: r.image_src,
                artist: r.artist,
                album_name: r.album_name,
                genre_id: r.genre_id,
                condition: r.condition,
                price: r.price,
                info: r.info,
                seller_id: r.seller_id,
            })
            .collect())
    }

    async fn remove_cart_item(&self, user_id: i64, items_id: i64) -> Result<Option<CartItem>> {
        // ---
        // Scoped to the caller's own cart; deleting an already-deleted or
        // foreign item yields None rather than an error.
        let row = sqlx::query_as::<_, CartItemRow>(
            "DELETE FROM cart_items ci
             USING carts c
             WHERE ci.cart_id = c.cart_id AND c.user_id = $1 AND ci.items_id = $2
             RETURNING ci.items_id, ci.cart_id, ci.record_id, ci.quantity",
        )
        .bind(user_id)
        .bind(items_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
