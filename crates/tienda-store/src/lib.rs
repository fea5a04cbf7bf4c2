//! # tienda-store: Entity Store for Tienda
//!
//! This crate holds every product, category, user and sale in process
//! memory, behind a single lock, and stores uploaded images in a blob store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Data Flow                                 │
//! │                                                                         │
//! │  HTTP handler (create_sale)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tienda-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │  BlobStore   │  │   │
//! │  │   │  (store.rs)   │    │               │    │  (blob.rs)   │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ Arc<RwLock<   │◄───│ CategoryRepo  │    │ FsBlobStore  │  │   │
//! │  │   │  Collections>>│    │ UserRepo      │    │ MemoryBlob.. │  │   │
//! │  │   │               │    │ SaleRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` handle and its lock
//! - [`error`] - Store error types
//! - [`repository`] - Per-entity repositories
//! - [`blob`] - Image blob storage
//! - [`seed`] - Demo catalog
//!
//! ## Usage
//!
//! ```rust
//! use tienda_store::Store;
//! use tienda_core::{Category, Product};
//!
//! let store = Store::new();
//! store.categories().insert(Category { id: 1, description: "tools".into() })?;
//!
//! let hammer = Product {
//!     id: 4,
//!     name: "hammer".into(),
//!     price: 8.0,
//!     category: "tools".into(),
//!     image_url: None,
//! };
//! store.products().insert(hammer.clone())?;
//! assert_eq!(store.products().get_by_id(4)?, hammer);
//! # Ok::<(), tienda_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobError, BlobStore, FsBlobStore, MemoryBlobStore};
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreCounts};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
