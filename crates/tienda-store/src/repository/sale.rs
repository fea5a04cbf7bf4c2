//! # Sale Repository
//!
//! Store operations for sales.
//!
//! ## Linkage
//! A sale may only be created or re-pointed at a user and a product that
//! exist at that moment. The check runs under the same write lock as the
//! mutation, so a concurrent delete cannot slip in between. Deleting a
//! user or product later leaves its sales in place.
//!
//! ## Dispatch Status
//! ```text
//! "No despachado" ──set_dispatched("Despachado")──► "Despachado"
//!        ▲                                              │
//!        └──────────set_dispatched("No despachado")─────┘
//!
//! Any other literal → InvalidDispatchStatus, sale untouched
//! ```

use tracing::{debug, info, warn};

use tienda_core::validation::sale::{
    parse_dispatch_status, validate_new_sale, validate_sale_update,
};
use tienda_core::{CoreError, EntityKind, NewSale, Sale, SaleUpdate};

use crate::error::StoreResult;
use crate::store::{read, write, Collections, SharedCollections};

/// Fails unless both the user and the product exist.
fn ensure_linked(collections: &Collections, id_user: i64, id_product: i64) -> Result<(), CoreError> {
    if !collections.users.iter().any(|r| r.user.id == id_user) {
        return Err(CoreError::UnknownUser { id: id_user });
    }
    if !collections.products.iter().any(|p| p.id == id_product) {
        return Err(CoreError::UnknownProduct { id: id_product });
    }
    Ok(())
}

/// Repository for sale operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    shared: SharedCollections,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub(crate) fn new(shared: SharedCollections) -> Self {
        SaleRepository { shared }
    }

    /// Lists all sales in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Sale>> {
        let collections = read(&self.shared)?;
        debug!(count = collections.sales.len(), "Listing sales");
        Ok(collections.sales.clone())
    }

    /// Gets a sale by its id.
    pub fn get_by_id(&self, id: i64) -> StoreResult<Sale> {
        let collections = read(&self.shared)?;
        collections
            .sales
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Sale, id).into())
    }

    /// Records a new sale.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The stored sale; `dispatched` defaults to "No despachado"
    /// * `Err(UnknownUser / UnknownProduct)` - A referenced entity is missing
    /// * `Err(DuplicateId)` - A sale with this id exists
    pub fn insert(&self, new_sale: NewSale) -> StoreResult<Sale> {
        let dispatched = validate_new_sale(&new_sale)?;

        let mut collections = write(&self.shared)?;

        if collections.sales.iter().any(|s| s.id == new_sale.id) {
            return Err(CoreError::duplicate(EntityKind::Sale, new_sale.id).into());
        }
        if let Err(err) = ensure_linked(&collections, new_sale.id_user, new_sale.id_product) {
            warn!(id = new_sale.id, error = %err, "Sale rejected");
            return Err(err.into());
        }

        let sale = Sale {
            id: new_sale.id,
            id_user: new_sale.id_user,
            id_product: new_sale.id_product,
            quantity: new_sale.quantity,
            date: new_sale.date,
            dispatched,
        };

        collections.sales.push(sale.clone());
        info!(
            id = sale.id,
            id_user = sale.id_user,
            id_product = sale.id_product,
            "Sale created"
        );
        Ok(sale)
    }

    /// Replaces the fields of an existing sale.
    ///
    /// The new user and product must exist. An update without
    /// `dispatched` keeps the current status.
    pub fn update(&self, id: i64, update: SaleUpdate) -> StoreResult<Sale> {
        let dispatched = validate_sale_update(&update)?;

        let mut collections = write(&self.shared)?;

        if !collections.sales.iter().any(|s| s.id == id) {
            return Err(CoreError::not_found(EntityKind::Sale, id).into());
        }
        ensure_linked(&collections, update.id_user, update.id_product)?;

        let sale = collections
            .sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Sale, id))?;

        sale.id_user = update.id_user;
        sale.id_product = update.id_product;
        sale.quantity = update.quantity;
        sale.date = update.date;
        if let Some(status) = dispatched {
            sale.dispatched = status;
        }

        info!(id, "Sale updated");
        Ok(sale.clone())
    }

    /// Sets the dispatch status of a sale.
    ///
    /// ## Returns
    /// * `Ok(Vec<Sale>)` - The whole sale collection after the change
    /// * `Err(InvalidDispatchStatus)` - `value` is not an accepted literal
    pub fn set_dispatched(&self, id: i64, value: &str) -> StoreResult<Vec<Sale>> {
        let status = parse_dispatch_status(value)?;

        let mut collections = write(&self.shared)?;

        let sale = collections
            .sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Sale, id))?;

        sale.dispatched = status;
        info!(id, dispatched = %status, "Sale dispatch status changed");

        Ok(collections.sales.clone())
    }

    /// Removes a sale and returns it.
    pub fn delete(&self, id: i64) -> StoreResult<Sale> {
        let mut collections = write(&self.shared)?;

        let index = collections
            .sales
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Sale, id))?;

        let removed = collections.sales.remove(index);
        info!(id, "Sale deleted");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
