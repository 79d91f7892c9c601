// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::env;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use handlers::health_check;
use handlers::metrics_handler;
use handlers::root_handler;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod auth;
mod config;
mod handlers;
mod infrastructure;
mod middleware;
mod uploads;

// Hoist up only the public symbol(s)
pub use auth::{Claims, Principal, TokenSigner};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_postgres_repository,
    create_prom_metrics,
    init_pool,
};

/// Build the HTTP router with metrics implementation determined by environment variables.
///
/// Opens the process-scoped PostgreSQL pool (with retry) and applies pending
/// migrations before any route is served.
pub async fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;

    // Determine metrics implementation from environment
    let metrics_type = env::var("MARKET_METRICS_TYPE").unwrap_or_else(|_| "noop".to_string());
    let metrics = if metrics_type == "prom" {
        create_prom_metrics()?
    } else {
        create_noop_metrics()?
    };

    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    // Create infrastructure dependencies
    let pool = init_pool(&config.database).await?;
    let repository = create_postgres_repository(pool);
    let tokens = TokenSigner::new(&config.auth.token_secret);
    let uploads = uploads::UploadStore::new(config.server.uploads_dir.as_str());
    uploads.ensure_dir().await?;

    // Build application state with all dependencies
    let app_state = AppState::new(repository, metrics, tokens, uploads);

    // Public API routes
    let api = Router::new()
        .route("/", get(root_handler))
        .route("/register", post(handlers::register))
        .route("/sign-in", post(handlers::sign_in))
        .route("/get-genres", get(handlers::get_genres))
        .route("/all-products", get(handlers::all_products))
        .route("/products/{record_id}", get(handlers::get_product))
        .route("/genre/{genre_id}", get(handlers::get_genre));

    // Routes behind the bearer-token stage
    let protected = Router::new()
        .route("/create-listing", post(handlers::create_listing))
        .route("/cart/add", post(handlers::add_to_cart))
        .route("/cart", get(handlers::get_cart))
        .route("/cart/remove/{items_id}", delete(handlers::remove_from_cart))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    // Unmatched non-API routes serve the client bundle, with index.html as
    // the fallback so client-side routing survives a page refresh.
    let client_dist = Path::new(&config.server.client_dist);
    let serve_client =
        ServeDir::new(client_dist).fallback(ServeFile::new(client_dist.join("index.html")));

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api.merge(protected))
        .nest_service("/images", ServeDir::new(&config.server.uploads_dir))
        .fallback_service(serve_client)
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::track_requests,
        ))
        .with_state(app_state);

    Ok(router)
}
