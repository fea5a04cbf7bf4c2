//! # Tienda API
//!
//! HTTP facade over the in-memory entity store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tienda API Routes                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Public        │  │  Catalog       │  │  Customers                 ││
//! │  │                │  │                │  │                            ││
//! │  │ • GET /        │  │ • /products    │  │ • /users                   ││
//! │  │ • GET /health  │  │ • /categories  │  │ • /sales                   ││
//! │  │ • POST /token  │  │                │  │   (PUT ?dispatched=)       ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐                                                    │
//! │  │  Images        │   Everything outside "Public" needs                │
//! │  │                │   Authorization: Bearer <token>                    │
//! │  │ • upload-*     │                                                    │
//! │  │ • download-*   │                                                    │
//! │  └────────────────┘                                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │  Store       │  │  BlobStore   │  │    TokenIssuer           ││  │
//! │  │  │              │  │              │  │                          ││  │
//! │  │  │ One RwLock,  │  │ Filesystem   │  │ HS256, 15 min default    ││  │
//! │  │  │ 4 collections│  │ or memory    │  │                          ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `TIENDA_HTTP_PORT` - HTTP server port (default: 8000)
//! - `TIENDA_JWT_SECRET` - Secret for token signing
//! - `TIENDA_TOKEN_TTL_MINUTES` - Token lifetime (default: 15)
//! - `TIENDA_IMAGES_DIR` - Blob store root (default: images)
//! - `TIENDA_MAX_UPLOAD_BYTES` - Request body limit (default: 10MB)
//! - `TIENDA_SEED_DEMO` - Load the demo catalog (default: false)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use tienda_store::{BlobStore, Store};

// Re-exports
pub use auth::TokenIssuer;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;

/// Shared application state.
///
/// Cloned into every handler; all fields are cheap handles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub blobs: Arc<dyn BlobStore>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Builds the state from loaded configuration.
    pub fn new(config: ApiConfig, store: Store, blobs: Arc<dyn BlobStore>) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret.clone(), config.token_ttl_minutes);
        AppState {
            store,
            blobs,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}
