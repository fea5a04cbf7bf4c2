//! # tienda-core: Pure Domain Logic for Tienda
//!
//! This crate holds the domain types of the storefront (products,
//! categories, users, sales), the error kinds every layer reports, and the
//! validation rules applied before any mutation. It has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP clients                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tienda-api (axum)                            │   │
//! │  │    /products, /categories, /users, /sales, /token, images      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tienda-store                                 │   │
//! │  │      Store (one RwLock) ──► repositories, BlobStore             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌──────────────────┐     │   │
//! │  │   │   types   │     │   error   │     │    validation    │     │   │
//! │  │   │  Product  │     │ CoreError │     │  product, user,  │     │   │
//! │  │   │  User     │     │ Validation│     │  category, sale  │     │   │
//! │  │   │  Sale     │     │  Error    │     │                  │     │   │
//! │  │   └───────────┘     └───────────┘     └──────────────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types and their write payloads
//! - [`error`] - Domain error types
//! - [`validation`] - Per-entity validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::validation::user::validate_password;
//!
//! assert!(validate_password("Abc12345").is_ok());
//! assert!(validate_password("abc12345").is_err()); // no uppercase
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, EntityKind, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum number of characters in a user password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of an email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;
