//! Product routes.
//!
//! `GET /products?category=tools` narrows the listing to one category.

use axum::{extract::State, Json};
use serde::Deserialize;
use tienda_core::{Product, ProductUpdate};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

/// `GET /products[?category=...]`
pub async fn list_products(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CategoryFilter>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = match filter.category {
        Some(category) => state.store.products().list_by_category(&category)?,
        None => state.store.products().list()?,
    };
    Ok(Json(products))
}

/// `POST /products`
pub async fn create_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(product): ApiJson<Product>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().insert(product)?))
}

/// `GET /products/{id}`
pub async fn get_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().get_by_id(id)?))
}

/// `PUT /products/{id}`
pub async fn update_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().update(id, update)?))
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().delete(id)?))
}
