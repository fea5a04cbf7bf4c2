//! Welcome text and health check.

use axum::{extract::State, Json};
use serde::Serialize;
use tienda_store::StoreCounts;

use crate::error::ApiResult;
use crate::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub products: usize,
    pub categories: usize,
    pub users: usize,
    pub sales: usize,
}

/// `GET /`
pub async fn welcome() -> &'static str {
    "Bienvenidos A Mi Primera API"
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let StoreCounts {
        products,
        categories,
        users,
        sales,
    } = state.store.counts()?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        products,
        categories,
        users,
        sales,
    }))
}
