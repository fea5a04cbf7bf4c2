//! # Validation Module
//!
//! Input validation for Tienda payloads, one submodule per entity type.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json / Query / Form)                    │
//! │  └── Shape: required keys present, numbers are numbers                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure, per entity type)                          │
//! │  ├── product::validate_*    price >= 0, name present                   │
//! │  ├── category::validate_*   id > 0                                     │
//! │  ├── user::validate_*       password, email, role                      │
//! │  └── sale::validate_*       ids > 0, dispatch literal                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (under the lock)                                       │
//! │  ├── Duplicate ids                                                     │
//! │  ├── Category existence                                                │
//! │  └── Sale linkage (user + product exist)                               │
//! │                                                                         │
//! │  Create and update paths call the same functions.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::validation::sale::parse_dispatch_status;
//! use tienda_core::DispatchStatus;
//!
//! assert_eq!(parse_dispatch_status("Despachado").unwrap(), DispatchStatus::Dispatched);
//! assert!(parse_dispatch_status("Enviado").is_err());
//! ```

pub mod category;
pub mod product;
pub mod sale;
pub mod user;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Shared Field Validators
// =============================================================================

/// Validates that an identifier is strictly positive.
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_id;
///
/// assert!(validate_id("id", 1).is_ok());
/// assert!(validate_id("id", 0).is_err());
/// assert!(validate_id("id_user", -3).is_err());
/// ```
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
