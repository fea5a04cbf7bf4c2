//! # Demo Catalog
//!
//! Loads a small demo catalog into an empty store. Enabled in the API
//! binary with `TIENDA_SEED_DEMO=true`.

use tracing::info;

use tienda_core::{Category, Product};

use crate::error::StoreResult;
use crate::store::Store;

const CATEGORIES: &[(i64, &str)] = &[(1, "home appliances"), (2, "tools")];

const PRODUCTS: &[(i64, &str, f64, &str)] = &[
    (1, "smart-tv", 700.0, "home appliances"),
    (2, "home-theater", 600.0, "home appliances"),
    (3, "playstation 5", 1500.0, "home appliances"),
    (4, "hammer", 8.0, "tools"),
    (5, "electric drill", 120.0, "tools"),
];

/// Inserts the demo categories and products.
///
/// Fails with `DuplicateId` if any of the demo ids is already taken.
pub fn seed_demo_catalog(store: &Store) -> StoreResult<()> {
    let categories = store.categories();
    for &(id, description) in CATEGORIES {
        categories.insert(Category {
            id,
            description: description.to_string(),
        })?;
    }

    let products = store.products();
    for &(id, name, price, category) in PRODUCTS {
        products.insert(Product {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
            image_url: None,
        })?;
    }

    info!(
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        "Demo catalog loaded"
    );
    Ok(())
}
