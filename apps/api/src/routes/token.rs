//! Login stub.
//!
//! `POST /token` takes a form with `username` and `password` and returns a
//! bearer token for any non-empty username. The password is not checked.

use axum::{extract::State, Json};
use serde::Deserialize;
use tienda_core::validation::validate_required;
use tracing::info;

use crate::auth::Credential;
use crate::error::ApiResult;
use crate::extract::ApiForm;
use crate::AppState;

/// Login form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    /// Accepted for client compatibility, never checked.
    #[serde(default)]
    pub password: Option<String>,
}

/// `POST /token`
pub async fn issue_token(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> ApiResult<Json<Credential>> {
    validate_required("username", &form.username)?;

    let credential = state.tokens.issue(form.username.trim())?;
    info!(username = %form.username.trim(), "Token issued");

    Ok(Json(credential))
}
