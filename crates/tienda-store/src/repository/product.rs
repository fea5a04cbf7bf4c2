//! # Product Repository
//!
//! Store operations for products.
//!
//! ## Key Operations
//! - CRUD with duplicate id rejection
//! - Listing the products of one category
//! - Category existence check on insert and update
//! - Recording the blob key of an uploaded image

use tracing::{debug, info};

use tienda_core::validation::product::{validate_new_product, validate_product_update};
use tienda_core::{CoreError, EntityKind, Product, ProductUpdate};

use super::category::ensure_category_exists;
use crate::error::StoreResult;
use crate::store::{read, write, SharedCollections};

/// Repository for product operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let created = repo.insert(product)?;
/// let product = repo.get_by_id(created.id)?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    shared: SharedCollections,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub(crate) fn new(shared: SharedCollections) -> Self {
        ProductRepository { shared }
    }

    /// Lists all products in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Product>> {
        let collections = read(&self.shared)?;
        debug!(count = collections.products.len(), "Listing products");
        Ok(collections.products.clone())
    }

    /// Lists the products whose category equals `category`, in insertion order.
    ///
    /// An unknown category yields an empty list.
    pub fn list_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        let collections = read(&self.shared)?;
        let products: Vec<Product> = collections
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();

        debug!(category, count = products.len(), "Listing products by category");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(NotFound)` - No product with this id
    pub fn get_by_id(&self, id: i64) -> StoreResult<Product> {
        let collections = read(&self.shared)?;
        collections
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id).into())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product, equal to the input
    /// * `Err(DuplicateId)` - A product with this id exists; the first is kept
    /// * `Err(InvalidCategory)` - No category has this description
    pub fn insert(&self, product: Product) -> StoreResult<Product> {
        validate_new_product(&product)?;

        let mut collections = write(&self.shared)?;

        if collections.products.iter().any(|p| p.id == product.id) {
            return Err(CoreError::duplicate(EntityKind::Product, product.id).into());
        }
        ensure_category_exists(&collections, &product.category)?;

        collections.products.push(product.clone());
        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replaces the mutable fields of an existing product.
    ///
    /// The id never changes. An update without `image_url` keeps the
    /// current image reference.
    pub fn update(&self, id: i64, update: ProductUpdate) -> StoreResult<Product> {
        validate_product_update(&update)?;

        let mut collections = write(&self.shared)?;

        let index = collections
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;
        ensure_category_exists(&collections, &update.category)?;

        let product = &mut collections.products[index];

        product.name = update.name;
        product.price = update.price;
        product.category = update.category;
        if let Some(image_url) = update.image_url {
            product.image_url = Some(image_url);
        }

        info!(id, "Product updated");
        Ok(product.clone())
    }

    /// Removes a product and returns it.
    pub fn delete(&self, id: i64) -> StoreResult<Product> {
        let mut collections = write(&self.shared)?;

        let index = collections
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;

        let removed = collections.products.remove(index);
        info!(id, "Product deleted");
        Ok(removed)
    }

    /// Records the blob key of an uploaded product image.
    pub fn set_image(&self, id: i64, key: String) -> StoreResult<Product> {
        let mut collections = write(&self.shared)?;

        let product = collections
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Product, id))?;

        debug!(id, key = %key, "Setting product image");
        product.image_url = Some(key);
        Ok(product.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::Store;
    use tienda_core::{Category, ValidationError};

    fn store_with_categories() -> Store {
        let store = Store::new();
        for (id, description) in [(1, "home appliances"), (2, "tools")] {
            store
                .categories()
                .insert(Category {
                    id,
                    description: description.to_string(),
                })
                .unwrap();
        }
        store
    }

    fn product(id: i64, name: &str, price: f64, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_insert_then_get_round_trip() {
        let store = store_with_categories();
        let tv = product(1, "smart-tv", 700.0, "home appliances");

        let created = store.products().insert(tv.clone()).unwrap();
        assert_eq!(created, tv);
        assert_eq!(store.products().get_by_id(1).unwrap(), tv);
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let store = store_with_categories();
        let hammer = product(4, "hammer", 8.0, "tools");
        store.products().insert(hammer.clone()).unwrap();

        let err = store
            .products()
            .insert(product(4, "drill", 120.0, "tools"))
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Core(CoreError::DuplicateId {
                entity: EntityKind::Product,
                id: 4
            })
        ));
        assert_eq!(store.products().list().unwrap(), vec![hammer]);
    }

    #[test]
    fn test_insert_rejects_unknown_category() {
        let store = store_with_categories();

        let err = store
            .products()
            .insert(product(1, "sofa", 300.0, "furniture"))
            .unwrap_err();

        assert!(matches!(
            err.as_core(),
            Some(CoreError::Validation(ValidationError::InvalidCategory { category }))
                if category == "furniture"
        ));
        assert!(store.products().list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_negative_price() {
        let store = store_with_categories();
        let err = store
            .products()
            .insert(product(1, "hammer", -8.0, "tools"))
            .unwrap_err();

        assert!(matches!(
            err.as_core(),
            Some(CoreError::Validation(ValidationError::MustBeNonNegative { .. }))
        ));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = store_with_categories();
        store.products().insert(product(5, "drill", 120.0, "tools")).unwrap();
        store.products().insert(product(2, "tv", 700.0, "home appliances")).unwrap();
        store.products().insert(product(9, "hammer", 8.0, "tools")).unwrap();

        let ids: Vec<i64> = store.products().list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_image() {
        let store = store_with_categories();
        store.products().insert(product(1, "tv", 700.0, "home appliances")).unwrap();
        store.products().set_image(1, "products/1_tv.jpg".to_string()).unwrap();

        let updated = store
            .products()
            .update(
                1,
                ProductUpdate {
                    name: "smart-tv".to_string(),
                    price: 650.0,
                    category: "home appliances".to_string(),
                    image_url: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "smart-tv");
        assert_eq!(updated.price, 650.0);
        assert_eq!(updated.image_url.as_deref(), Some("products/1_tv.jpg"));
    }

    #[test]
    fn test_update_missing_product_is_not_found() {
        let store = store_with_categories();

        let err = store
            .products()
            .update(
                77,
                ProductUpdate {
                    name: "ghost".to_string(),
                    price: 1.0,
                    category: "tools".to_string(),
                    image_url: None,
                },
            )
            .unwrap_err();

        assert!(matches!(
            err.as_core(),
            Some(CoreError::NotFound { entity: EntityKind::Product, id: 77 })
        ));
    }

    #[test]
    fn test_update_missing_product_checked_before_category() {
        let store = store_with_categories();

        let err = store
            .products()
            .update(
                999,
                ProductUpdate {
                    name: "ghost".to_string(),
                    price: 1.0,
                    category: "furniture".to_string(),
                    image_url: None,
                },
            )
            .unwrap_err();

        assert!(matches!(
            err.as_core(),
            Some(CoreError::NotFound { entity: EntityKind::Product, id: 999 })
        ));
    }

    #[test]
    fn test_list_by_category() {
        let store = store_with_categories();
        store.products().insert(product(1, "tv", 700.0, "home appliances")).unwrap();
        store.products().insert(product(2, "hammer", 8.0, "tools")).unwrap();
        store.products().insert(product(3, "drill", 120.0, "tools")).unwrap();

        let tools: Vec<i64> = store
            .products()
            .list_by_category("tools")
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(tools, vec![2, 3]);

        assert!(store.products().list_by_category("Tools").unwrap().is_empty());
        assert!(store.products().list_by_category("furniture").unwrap().is_empty());
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = store_with_categories();
        store.products().insert(product(3, "ps5", 1500.0, "home appliances")).unwrap();

        let removed = store.products().delete(3).unwrap();
        assert_eq!(removed.id, 3);

        assert!(matches!(
            store.products().get_by_id(3).unwrap_err().as_core(),
            Some(CoreError::NotFound { .. })
        ));
        assert!(store.products().delete(3).is_err());
    }
}
