//! Product payload rules.
//!
//! Category existence needs the category collection, so the store checks it
//! after these field rules pass.

use super::{validate_id, validate_required, ValidationResult};
use crate::error::ValidationError;
use crate::types::{Product, ProductUpdate};

/// Validates a product price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be zero or greater (free items are allowed)
///
/// ## Example
/// ```rust
/// use tienda_core::validation::product::validate_price;
///
/// assert!(validate_price(700.0).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.5).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates the shared fields of create and update payloads.
fn validate_fields(name: &str, price: f64, category: &str) -> ValidationResult<()> {
    validate_required("name", name)?;
    validate_price(price)?;
    validate_required("category", category)?;
    Ok(())
}

/// Validates a product create payload.
pub fn validate_new_product(product: &Product) -> ValidationResult<()> {
    validate_id("id", product.id)?;
    validate_fields(&product.name, product.price, &product.category)
}

/// Validates a product update payload.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    validate_fields(&update.name, update.price, &update.category)
}
