//! # Store Handle
//!
//! The process-wide owner of all four entity collections.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Lock, Four Collections                         │
//! │                                                                         │
//! │  Store::new() ← created once at startup                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │      Arc<RwLock<Collections>>            │                           │
//! │  │  ┌────────┐ ┌──────────┐ ┌─────┐ ┌─────┐ │                           │
//! │  │  │products│ │categories│ │users│ │sales│ │                           │
//! │  │  └────────┘ └──────────┘ └─────┘ └─────┘ │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Each repository call takes the lock exactly once               │
//! │       ▼                                                                 │
//! │  list / get_by_id  ──► read lock  (many at once)                       │
//! │  insert / update   ──► write lock (exclusive, includes                 │
//! │  delete            ──►             cross-collection checks)            │
//! │                                                                         │
//! │  The guard is never held across an .await                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tienda_core::{Category, Product, Sale};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::user::{UserRecord, UserRepository};

// =============================================================================
// Collections
// =============================================================================

/// The four collections, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub(crate) products: Vec<Product>,
    pub(crate) categories: Vec<Category>,
    pub(crate) users: Vec<UserRecord>,
    pub(crate) sales: Vec<Sale>,
}

/// Shared handle every repository clones.
pub(crate) type SharedCollections = Arc<RwLock<Collections>>;

/// Takes the read lock, mapping poisoning to a store error.
pub(crate) fn read(shared: &SharedCollections) -> StoreResult<RwLockReadGuard<'_, Collections>> {
    shared.read().map_err(|_| StoreError::LockPoisoned)
}

/// Takes the write lock, mapping poisoning to a store error.
pub(crate) fn write(
    shared: &SharedCollections,
) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
    shared.write().map_err(|_| StoreError::LockPoisoned)
}

/// Number of entities per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub products: usize,
    pub categories: usize,
    pub users: usize,
    pub sales: usize,
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cloning is cheap: clones share the same collections.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
///     Ok(Json(state.store.products().list()?))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    shared: SharedCollections,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        info!("Initializing in-memory entity store");
        Store::default()
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.shared.clone())
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.shared.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.shared.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.shared.clone())
    }

    /// Counts entities in every collection under one read lock.
    pub fn counts(&self) -> StoreResult<StoreCounts> {
        let collections = read(&self.shared)?;
        Ok(StoreCounts {
            products: collections.products.len(),
            categories: collections.categories.len(),
            users: collections.users.len(),
            sales: collections.sales.len(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
