//! # Category Repository
//!
//! Store operations for categories.
//!
//! Products reference categories by description, not by id. A category
//! cannot be deleted while products still point at its description, unless
//! another category carries the same description. Renaming carries those
//! products along to the new description.

use tracing::{debug, info};

use tienda_core::validation::category::validate_new_category;
use tienda_core::{Category, CategoryUpdate, CoreError, EntityKind, ValidationError};

use crate::error::StoreResult;
use crate::store::{read, write, Collections, SharedCollections};

/// Fails with `InvalidCategory` when no category has this description.
pub(crate) fn ensure_category_exists(
    collections: &Collections,
    description: &str,
) -> Result<(), ValidationError> {
    if collections
        .categories
        .iter()
        .any(|c| c.description == description)
    {
        Ok(())
    } else {
        Err(ValidationError::InvalidCategory {
            category: description.to_string(),
        })
    }
}

/// True when a category other than the one at `index` has the same description.
fn shared_elsewhere(collections: &Collections, index: usize) -> bool {
    let description = &collections.categories[index].description;
    collections
        .categories
        .iter()
        .enumerate()
        .any(|(i, c)| i != index && &c.description == description)
}

/// Fails with `CategoryInUse` when removing the category at `index`
/// would leave products pointing at a description nobody carries.
fn ensure_not_orphaning(collections: &Collections, index: usize) -> Result<(), CoreError> {
    if shared_elsewhere(collections, index) {
        return Ok(());
    }

    let description = &collections.categories[index].description;

    let products = collections
        .products
        .iter()
        .filter(|p| &p.category == description)
        .count();
    if products > 0 {
        return Err(CoreError::CategoryInUse {
            description: description.clone(),
            products,
        });
    }

    Ok(())
}

/// Repository for category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    shared: SharedCollections,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub(crate) fn new(shared: SharedCollections) -> Self {
        CategoryRepository { shared }
    }

    /// Lists all categories in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Category>> {
        let collections = read(&self.shared)?;
        debug!(count = collections.categories.len(), "Listing categories");
        Ok(collections.categories.clone())
    }

    /// Gets a category by its id.
    pub fn get_by_id(&self, id: i64) -> StoreResult<Category> {
        let collections = read(&self.shared)?;
        collections
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Category, id).into())
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored category
    /// * `Err(DuplicateId)` - A category with this id exists
    pub fn insert(&self, category: Category) -> StoreResult<Category> {
        validate_new_category(&category)?;

        let mut collections = write(&self.shared)?;

        if collections.categories.iter().any(|c| c.id == category.id) {
            return Err(CoreError::duplicate(EntityKind::Category, category.id).into());
        }

        collections.categories.push(category.clone());
        info!(id = category.id, description = %category.description, "Category created");
        Ok(category)
    }

    /// Replaces the description of an existing category.
    ///
    /// Products filed under the old description move to the new one, unless
    /// another category still carries the old description.
    pub fn update(&self, id: i64, update: CategoryUpdate) -> StoreResult<Category> {
        let mut collections = write(&self.shared)?;

        let index = collections
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Category, id))?;

        let previous = collections.categories[index].description.clone();
        if previous != update.description && !shared_elsewhere(&collections, index) {
            let mut moved = 0;
            for product in collections.products.iter_mut() {
                if product.category == previous {
                    product.category = update.description.clone();
                    moved += 1;
                }
            }
            if moved > 0 {
                debug!(id, from = %previous, to = %update.description, moved, "Products recategorized");
            }
        }

        let category = &mut collections.categories[index];
        category.description = update.description;

        info!(id, description = %category.description, "Category updated");
        Ok(category.clone())
    }

    /// Removes a category and returns it.
    ///
    /// ## Returns
    /// * `Err(CategoryInUse)` - Products still reference the description
    pub fn delete(&self, id: i64) -> StoreResult<Category> {
        let mut collections = write(&self.shared)?;

        let index = collections
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Category, id))?;

        ensure_not_orphaning(&collections, index)?;

        let removed = collections.categories.remove(index);
        info!(id, "Category deleted");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
