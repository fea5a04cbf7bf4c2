//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tienda API                             │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  POST /sales                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<Json<T>, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── CoreError::UnknownUser { 999 } ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Blob Error?  ─── BlobError::NotFound ───────── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── 422 {"code": "UNKNOWN_USER",                                     │
//! │              "message": "Sale references unknown user: 999"}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tienda_core::{CoreError, ValidationError};
use tienda_store::{BlobError, StoreError};

use crate::auth::AuthError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "WEAK_PASSWORD",
///   "message": "password must be at least 8 characters",
///   "field": "password"
/// }
/// ```
/// `field` is only present for payload validation failures.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Payload field that failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Required, positive or non-negative field rule failed (422)
    ValidationError,

    /// Product category matches no category (422)
    InvalidCategory,

    /// Password too short or without an uppercase letter (422)
    WeakPassword,

    /// Email has an invalid shape (422)
    InvalidEmail,

    /// Role is not an accepted literal (422)
    InvalidRole,

    /// Dispatch status is not an accepted literal (422)
    InvalidDispatchStatus,

    /// Sale references a missing user (422)
    UnknownUser,

    /// Sale references a missing product (422)
    UnknownProduct,

    /// Id already taken (409)
    DuplicateId,

    /// Category still referenced by products (409)
    CategoryInUse,

    /// Missing, malformed or expired credential (401)
    InvalidToken,

    /// Request could not be parsed (400)
    BadRequest,

    /// Upload larger than the configured limit (413)
    PayloadTooLarge,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::InvalidCategory
            | ErrorCode::WeakPassword
            | ErrorCode::InvalidEmail
            | ErrorCode::InvalidRole
            | ErrorCode::InvalidDispatchStatus
            | ErrorCode::UnknownUser
            | ErrorCode::UnknownProduct => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DuplicateId | ErrorCode::CategoryInUse => StatusCode::CONFLICT,
            ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        }
        (status, Json(self)).into_response()
    }
}

/// Converts validation errors to API errors, keeping the failing field.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::Required { .. }
            | ValidationError::MustBePositive { .. }
            | ValidationError::MustBeNonNegative { .. } => ErrorCode::ValidationError,
            ValidationError::InvalidCategory { .. } => ErrorCode::InvalidCategory,
            ValidationError::WeakPassword { .. } => ErrorCode::WeakPassword,
            ValidationError::InvalidEmail { .. } => ErrorCode::InvalidEmail,
            ValidationError::InvalidRole { .. } => ErrorCode::InvalidRole,
            ValidationError::InvalidDispatchStatus { .. } => ErrorCode::InvalidDispatchStatus,
        };
        ApiError {
            code,
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let err = match err {
            CoreError::Validation(inner) => return inner.into(),
            other => other,
        };

        let code = match &err {
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::DuplicateId { .. } => ErrorCode::DuplicateId,
            CoreError::UnknownUser { .. } => ErrorCode::UnknownUser,
            CoreError::UnknownProduct { .. } => ErrorCode::UnknownProduct,
            CoreError::CategoryInUse { .. } => ErrorCode::CategoryInUse,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core.into(),
            StoreError::LockPoisoned => {
                tracing::error!("Entity store lock poisoned");
                ApiError::internal("Entity store unavailable")
            }
            StoreError::PasswordHash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Could not store user")
            }
        }
    }
}

/// Converts blob store errors to API errors.
impl From<BlobError> for ApiError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::NotFound { .. } => ApiError::not_found(err.to_string()),
            BlobError::InvalidKey { .. } => ApiError::bad_request(err.to_string()),
            BlobError::Io(e) => {
                tracing::error!("Blob I/O failed: {}", e);
                ApiError::internal("Blob storage failed")
            }
        }
    }
}

/// Converts credential errors to API errors.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken(_) => ApiError::new(ErrorCode::InvalidToken, err.to_string()),
            AuthError::Signing(e) => {
                tracing::error!("Token signing failed: {}", e);
                ApiError::internal("Could not issue token")
            }
        }
    }
}

// =============================================================================
// Extractor Rejections
// =============================================================================

/// Maps an axum rejection to a 400, or a 413 when the body was too large.
fn rejected(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(ErrorCode::PayloadTooLarge, text)
    } else {
        ApiError::bad_request(text)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        rejected(err.status(), err.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
