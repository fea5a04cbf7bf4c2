//! # Store Error Types
//!
//! Error types for entity store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (tienda-core)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds lock and hashing failures             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in tienda-api) ← Status code + JSON body                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use tienda_core::{CoreError, ValidationError};

/// Entity store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the operation (not found, duplicate id,
    /// unknown reference, invalid payload).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A thread panicked while holding the collections lock.
    ///
    /// ## When This Occurs
    /// Only after a bug elsewhere: every later operation fails instead of
    /// reading half-written state.
    #[error("Entity store lock poisoned")]
    LockPoisoned,

    /// Hashing a user password failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl StoreError {
    /// Returns the domain error, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
