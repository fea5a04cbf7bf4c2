//! User routes.
//!
//! Create and update hash the password, so they run on the blocking pool.

use axum::{extract::State, Json};
use tienda_core::{NewUser, User, UserUpdate};

use super::run_blocking;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// `GET /users`
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.store.users().list()?))
}

/// `POST /users`
pub async fn create_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> ApiResult<Json<User>> {
    let users = state.store.users();
    let user = run_blocking(move || users.insert(new_user)).await?;
    Ok(Json(user))
}

/// `GET /users/{id}`
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.store.users().get_by_id(id)?))
}

/// `PUT /users/{id}`
pub async fn update_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> ApiResult<Json<User>> {
    let users = state.store.users();
    let user = run_blocking(move || users.update(id, update)).await?;
    Ok(Json(user))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.store.users().delete(id)?))
}
