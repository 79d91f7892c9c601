// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod auth;
mod cart;
mod health;
mod listings;
mod metrics;
mod root;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Account handlers
pub use auth::{register, sign_in};

// Listing and genre handlers
pub use listings::{all_products, create_listing, get_genre, get_genres, get_product};

// Cart handlers
pub use cart::{add_to_cart, get_cart, remove_from_cart};

// Shared error type, used by the middleware as well
pub use shared_types::ApiError;
