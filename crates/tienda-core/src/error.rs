//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── CoreError        - Store-level domain failures                    │
//! │  └── ValidationError  - Payload field failures                         │
//! │                                                                         │
//! │  tienda-store errors (separate crate)                                  │
//! │  └── StoreError       - Lock / hashing / blob failures + CoreError     │
//! │                                                                         │
//! │  tienda-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the entity and/or field that failed
//! 3. Errors are enum variants, never String

use std::fmt;

use thiserror::Error;

// =============================================================================
// Entity Kind
// =============================================================================

/// The four collections held by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Category,
    User,
    Sale,
}

impl EntityKind {
    /// Lowercase collection name, used as the blob key namespace.
    pub const fn collection(&self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Category => "categories",
            EntityKind::User => "users",
            EntityKind::Sale => "sales",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Product => "Product",
            EntityKind::Category => "Category",
            EntityKind::User => "User",
            EntityKind::Sale => "Sale",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Domain failures raised by the entity store.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// No entity with this id exists in its collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    /// An entity with this id already exists in its collection.
    ///
    /// ## When This Occurs
    /// - Creating a product/category/user/sale whose id is taken
    /// - The first entity is kept untouched
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: EntityKind, id: i64 },

    /// A sale references a user that does not exist.
    #[error("Sale references unknown user: {id}")]
    UnknownUser { id: i64 },

    /// A sale references a product that does not exist.
    #[error("Sale references unknown product: {id}")]
    UnknownProduct { id: i64 },

    /// A category cannot be deleted while products reference it.
    #[error("Category '{description}' is referenced by {products} product(s)")]
    CategoryInUse { description: String, products: usize },

    /// Payload validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for an entity kind and id.
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        CoreError::NotFound { entity, id }
    }

    /// Creates a DuplicateId error for an entity kind and id.
    pub fn duplicate(entity: EntityKind, id: i64) -> Self {
        CoreError::DuplicateId { entity, id }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These run before any mutation of the store. A payload that fails
/// validation leaves every collection untouched.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Product category does not match any category description.
    #[error("category '{category}' does not exist")]
    InvalidCategory { category: String },

    /// Password does not meet the strength rules.
    #[error("password {reason}")]
    WeakPassword { reason: String },

    /// Email does not have a valid shape.
    #[error("email '{value}' is invalid: {reason}")]
    InvalidEmail { value: String, reason: String },

    /// Role is not one of the accepted literals.
    #[error("role '{value}' must be one of: \"Cliente\", \"Administrador\"")]
    InvalidRole { value: String },

    /// Dispatch status is not one of the accepted literals.
    #[error("dispatched '{value}' must be one of: \"Despachado\", \"No despachado\"")]
    InvalidDispatchStatus { value: String },
}

impl ValidationError {
    /// Name of the payload field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field } => field,
            ValidationError::InvalidCategory { .. } => "category",
            ValidationError::WeakPassword { .. } => "password",
            ValidationError::InvalidEmail { .. } => "email",
            ValidationError::InvalidRole { .. } => "role",
            ValidationError::InvalidDispatchStatus { .. } => "dispatched",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
