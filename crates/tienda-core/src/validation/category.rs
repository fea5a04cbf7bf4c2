//! Category payload rules.

use super::{validate_id, ValidationResult};
use crate::types::Category;

/// Validates a category create payload.
///
/// Only the id is constrained; descriptions are free text.
pub fn validate_new_category(category: &Category) -> ValidationResult<()> {
    validate_id("id", category.id)
}
