use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for registered users.
pub fn increment_user_registered() {
    counter!("users_registered_total").increment(1);
}

/// Increment a counter for created listings.
pub fn increment_listing_created() {
    counter!("listings_created_total").increment(1);
}

/// Increment a counter for cart item additions.
pub fn increment_cart_item_added() {
    counter!("cart_items_added_total").increment(1);
}

/// Track HTTP request latency using a histogram, labeled by route.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_owned(),
        "method" => method.to_owned(),
        "status" => status.to_string(),
    )
    .record(elapsed);
}
