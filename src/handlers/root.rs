use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Vinyl Market API
Version: {version}

Available endpoints:
  - POST   /api/register                  - Create an account
  - POST   /api/sign-in                   - Obtain a bearer token
  - POST   /api/create-listing            - Create a listing (auth, multipart image)
  - GET    /api/get-genres                - List genres
  - GET    /api/all-products              - List all records
  - GET    /api/products/{{recordId}}       - Fetch a record with its genre
  - GET    /api/genre/{{genreId}}           - Fetch a genre name
  - POST   /api/cart/add                  - Add a record to the cart (auth)
  - GET    /api/cart                      - View the cart (auth)
  - DELETE /api/cart/remove/{{itemsId}}     - Remove a cart item (auth)
  - GET    /health                        - Light health check
  - GET    /health?mode=full              - Full health check (includes PostgreSQL)
  - GET    /metrics                       - Prometheus metrics

Uploaded images are served under /images; all other routes fall through to the client bundle.
"#
    )
}
