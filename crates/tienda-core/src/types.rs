//! # Domain Types
//!
//! Core domain types used throughout Tienda.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64 > 0)   │   │  id (i64 > 0)   │   │  id (i64 > 0)   │       │
//! │  │  name           │   │  description ◄──┼───│  id_user   ──┐  │       │
//! │  │  price          │   └────────▲────────┘   │  id_product ─┼┐ │       │
//! │  │  category ──────┼────────────┘            │  dispatched  ││ │       │
//! │  └────────▲────────┘                         └──────────────┼┼─┘       │
//! │           └─────────────────────────────────────────────────┘│         │
//! │  ┌─────────────────┐   ┌─────────────────┐                   │         │
//! │  │      User       │◄──┼─────────────────┼───────────────────┘         │
//! │  │  ─────────────  │   │ DispatchStatus  │   ┌─────────────────┐       │
//! │  │  id, email      │   │  Despachado     │   │      Role       │       │
//! │  │  role           │   │  No despachado  │   │  Cliente        │       │
//! │  │  (no password)  │   └─────────────────┘   │  Administrador  │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Views vs Write Payloads
//! Entities are returned as read views. Create and update calls take
//! separate payload types: update payloads have no `id` (ids are
//! immutable), and user payloads carry the write-only password.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Also the create payload: a valid product goes into the store and comes
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (positive).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price, zero or greater.
    pub price: f64,

    /// Description of an existing category.
    pub category: String,

    /// Blob key of the uploaded product image.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Replacement fields for an existing product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub category: String,
    /// `None` keeps the current image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Products reference it by `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub description: String,
}

/// Replacement fields for an existing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryUpdate {
    pub description: String,
}

// =============================================================================
// Role
// =============================================================================

/// The role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    /// A customer.
    Cliente,
    /// A store administrator.
    Administrador,
}

impl Role {
    /// The wire literal for this role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Cliente => "Cliente",
            Role::Administrador => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user as returned to clients.
///
/// There is no password field: the read view cannot leak it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub lastname: String,
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub phone: i64,
    pub role: Role,
    /// Blob key of the uploaded profile picture.
    pub profile_picture: Option<String>,
}

/// Create payload for a user.
#[derive(Clone, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub id: i64,
    pub lastname: String,
    pub name: String,
    pub email: String,
    /// Write-only. Hashed by the store, never returned.
    pub password: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub phone: i64,
    /// Parsed into [`Role`] during validation.
    #[serde(alias = "rol")]
    pub role: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Replacement fields for an existing user.
#[derive(Clone, Deserialize, TS)]
#[ts(export)]
pub struct UserUpdate {
    pub lastname: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub phone: i64,
    #[serde(alias = "rol")]
    pub role: String,
    /// `None` keeps the current profile picture.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

// Manual Debug so the password never reaches logs.
impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Dispatch Status
// =============================================================================

/// Whether a sale has been shipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DispatchStatus {
    /// The sale has been shipped.
    #[serde(rename = "Despachado")]
    Dispatched,
    /// The sale has not been shipped yet.
    #[default]
    #[serde(rename = "No despachado")]
    NotDispatched,
}

impl DispatchStatus {
    /// The wire literal for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Dispatched => "Despachado",
            DispatchStatus::NotDispatched => "No despachado",
        }
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of a product to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub id_user: i64,
    pub id_product: i64,
    pub quantity: i64,
    /// Free-form timestamp text supplied by the client.
    pub date: String,
    pub dispatched: DispatchStatus,
}

/// Create payload for a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    pub id: i64,
    pub id_user: i64,
    pub id_product: i64,
    pub quantity: i64,
    pub date: String,
    /// Defaults to "No despachado" when omitted.
    #[serde(default)]
    pub dispatched: Option<String>,
}

/// Replacement fields for an existing sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleUpdate {
    pub id_user: i64,
    pub id_product: i64,
    pub quantity: i64,
    pub date: String,
    /// `None` keeps the current dispatch status.
    #[serde(default)]
    pub dispatched: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_status_default() {
        assert_eq!(DispatchStatus::default(), DispatchStatus::NotDispatched);
    }

    #[test]
    fn test_dispatch_status_wire_literals() {
        let json = serde_json::to_string(&DispatchStatus::NotDispatched).unwrap();
        assert_eq!(json, "\"No despachado\"");

        let status: DispatchStatus = serde_json::from_str("\"Despachado\"").unwrap();
        assert_eq!(status, DispatchStatus::Dispatched);
    }

    #[test]
    fn test_new_user_accepts_rol_alias() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "lastname": "Perez",
            "name": "Ana",
            "email": "ana@example.com",
            "password": "Secreta123",
            "country": "AR",
            "city": "Cordoba",
            "address": "Calle 1",
            "phone": 3511234567_i64,
            "rol": "Cliente"
        }))
        .unwrap();

        assert_eq!(user.role, "Cliente");
        assert!(user.profile_picture.is_none());
    }

    #[test]
    fn test_new_user_debug_redacts_password() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "lastname": "Perez",
            "name": "Ana",
            "email": "ana@example.com",
            "password": "Secreta123",
            "country": "AR",
            "city": "Cordoba",
            "address": "Calle 1",
            "phone": 1,
            "role": "Cliente"
        }))
        .unwrap();

        let debug = format!("{:?}", user);
        assert!(!debug.contains("Secreta123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_user_view_has_no_password_field() {
        let user = User {
            id: 1,
            lastname: "Perez".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            country: "AR".to_string(),
            city: "Cordoba".to_string(),
            address: "Calle 1".to_string(),
            phone: 1,
            role: Role::Administrador,
            profile_picture: None,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "Administrador");
    }
}
