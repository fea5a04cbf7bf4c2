//! # Repository Module
//!
//! Per-entity repositories over the shared collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  store.products().insert(product)                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, payload)                                            │
//! │  ├── update(&self, id, payload)                                        │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  validate (tienda-core) → lock → check → mutate                │
//! │       ▼                                                                 │
//! │  Arc<RwLock<Collections>>                                              │
//! │                                                                         │
//! │  Lookups are linear scans over a Vec: insertion order is the           │
//! │  listing order and collections stay demo-sized.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Products and their images
//! - [`CategoryRepository`](category::CategoryRepository) - Categories
//! - [`UserRepository`](user::UserRepository) - Users, password hashing, profile pictures
//! - [`SaleRepository`](sale::SaleRepository) - Sales, linkage check, dispatch status

pub mod category;
pub mod product;
pub mod sale;
pub mod user;
