//! Sale routes.
//!
//! `PUT /sales/{id}?dispatched=Despachado` changes only the dispatch status
//! and answers with the whole sale collection.

use axum::{extract::State, Json};
use serde::Deserialize;
use tienda_core::{NewSale, Sale};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    pub dispatched: String,
}

/// `GET /sales`
pub async fn list_sales(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.store.sales().list()?))
}

/// `POST /sales`
pub async fn create_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(sale): ApiJson<NewSale>,
) -> ApiResult<Json<Sale>> {
    Ok(Json(state.store.sales().insert(sale)?))
}

/// `GET /sales/{id}`
pub async fn get_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Sale>> {
    Ok(Json(state.store.sales().get_by_id(id)?))
}

/// `PUT /sales/{id}?dispatched=...`
pub async fn set_dispatched(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<DispatchQuery>,
) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(
        state.store.sales().set_dispatched(id, &query.dispatched)?,
    ))
}

/// `DELETE /sales/{id}`
pub async fn delete_sale(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Sale>> {
    Ok(Json(state.store.sales().delete(id)?))
}
