//! HTTP route handlers.
//!
//! Each module owns the handlers for one resource. Handlers take
//! [`AuthUser`](crate::auth::AuthUser) first when the route is protected,
//! call one store operation, and return `Json` or an [`ApiError`].

pub mod categories;
pub mod health;
pub mod images;
pub mod products;
pub mod sales;
pub mod token;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

/// Builds the full router with state and middleware applied.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Public
        .route("/", get(health::welcome))
        .route("/health", get(health::health))
        .route("/token", post(token::issue_token))
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Sales
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route(
            "/sales/{id}",
            get(sales::get_sale)
                .put(sales::set_dispatched)
                .delete(sales::delete_sale),
        )
        // Images
        .route(
            "/upload-product-image/{id}",
            post(images::upload_product_image),
        )
        .route(
            "/download-product-image/{id}",
            get(images::download_product_image),
        )
        .route(
            "/upload-user-profile-picture/{id}",
            post(images::upload_user_profile_picture),
        )
        .route(
            "/download-user-profile-picture/{id}",
            get(images::download_user_profile_picture),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("No such route")
}

/// Runs CPU-heavy store work (password hashing) on the blocking pool.
pub(crate) async fn run_blocking<F, T>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> tienda_store::StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::internal(format!("Background task failed: {}", e)))?
        .map_err(ApiError::from)
}
