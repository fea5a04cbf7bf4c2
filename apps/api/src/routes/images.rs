//! Product image and profile picture routes.
//!
//! ## Upload Flow
//! ```text
//! POST /upload-product-image/1   (multipart, field "file" = tv.jpg)
//!      │
//!      ├── product 1 exists?            no → 404
//!      ├── blob_key → "products/1_tv.jpg"
//!      ├── BlobStore::put               → location
//!      └── products().set_image(1, location)
//!      │
//!      ▼
//! {"file_url": "products/1_tv.jpg"}
//! ```

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tienda_core::EntityKind;
use tienda_store::blob::blob_key;
use tracing::info;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiPath;
use crate::AppState;

/// Multipart field that carries the upload.
const FILE_FIELD: &str = "file";

/// Upload response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_url: String,
}

/// An uploaded file pulled out of the multipart body.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// Reads the `file` field from a multipart body.
async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> ApiResult<Upload> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Upload field 'file' has no filename"))?;
        let bytes = field.bytes().await?;

        return Ok(Upload {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::bad_request("Multipart body has no 'file' field"))
}

/// Guesses a content type from the key's extension.
fn content_type_for(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Loads a blob and wraps it in a response with a content type.
async fn blob_response(state: &AppState, key: &str) -> ApiResult<impl IntoResponse> {
    let bytes = state.blobs.get(key).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(key))], bytes))
}

// =============================================================================
// Products
// =============================================================================

/// `POST /upload-product-image/{id}`
pub async fn upload_product_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    state.store.products().get_by_id(id)?;

    let upload = read_upload(multipart).await?;
    let key = blob_key(EntityKind::Product, id, &upload.filename)?;
    let size = upload.bytes.len();

    let location = state.blobs.put(&key, upload.bytes).await?;
    state.store.products().set_image(id, location.clone())?;

    info!(id, key = %location, size, "Product image uploaded");
    Ok(Json(UploadResponse { file_url: location }))
}

/// `GET /download-product-image/{id}`
pub async fn download_product_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let product = state.store.products().get_by_id(id)?;
    let key = product
        .image_url
        .ok_or_else(|| ApiError::not_found(format!("Product {} has no image", id)))?;

    blob_response(&state, &key).await
}

// =============================================================================
// Users
// =============================================================================

/// `POST /upload-user-profile-picture/{id}`
pub async fn upload_user_profile_picture(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    state.store.users().get_by_id(id)?;

    let upload = read_upload(multipart).await?;
    let key = blob_key(EntityKind::User, id, &upload.filename)?;
    let size = upload.bytes.len();

    let location = state.blobs.put(&key, upload.bytes).await?;
    state.store.users().set_profile_picture(id, location.clone())?;

    info!(id, key = %location, size, "Profile picture uploaded");
    Ok(Json(UploadResponse { file_url: location }))
}

/// `GET /download-user-profile-picture/{id}`
pub async fn download_user_profile_picture(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let user = state.store.users().get_by_id(id)?;
    let key = user
        .profile_picture
        .ok_or_else(|| ApiError::not_found(format!("User {} has no profile picture", id)))?;

    blob_response(&state, &key).await
}
