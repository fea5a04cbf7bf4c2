//! Category routes.
//!
//! Renaming takes the new description from the query string:
//! `PUT /categories/2?description=hardware`.

use axum::{extract::State, Json};
use serde::Deserialize;
use tienda_core::{Category, CategoryUpdate};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    pub description: String,
}

/// `GET /categories`
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.store.categories().list()?))
}

/// `POST /categories`
pub async fn create_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(category): ApiJson<Category>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.store.categories().insert(category)?))
}

/// `GET /categories/{id}`
pub async fn get_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.store.categories().get_by_id(id)?))
}

/// `PUT /categories/{id}?description=...`
pub async fn update_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<DescriptionQuery>,
) -> ApiResult<Json<Category>> {
    let update = CategoryUpdate {
        description: query.description,
    };
    Ok(Json(state.store.categories().update(id, update)?))
}

/// `DELETE /categories/{id}`
pub async fn delete_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.store.categories().delete(id)?))
}
