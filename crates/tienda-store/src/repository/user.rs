//! # User Repository
//!
//! Store operations for users.
//!
//! ## Password Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Password Lifecycle                               │
//! │                                                                         │
//! │  NewUser { password: "Abc12345", .. }                                  │
//! │       │                                                                 │
//! │       │ validate_new_user (length, uppercase, email, role)             │
//! │       ▼                                                                 │
//! │  hash_password ← argon2id, random salt, runs BEFORE the lock           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UserRecord { user: User, password_hash: "$argon2id$..." }             │
//! │       │                                                                 │
//! │       │ list / get_by_id           verify_password ──► argon2 verify   │
//! │       ▼                                                                 │
//! │  User  ← no password field at all                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hashing is CPU-heavy. Async callers run `insert`, `update` and
//! `verify_password` on a blocking thread.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use tracing::{debug, info};

use tienda_core::validation::user::{validate_new_user, validate_user_update};
use tienda_core::{CoreError, EntityKind, NewUser, User, UserUpdate};

use crate::error::{StoreError, StoreResult};
use crate::store::{read, write, SharedCollections};

// =============================================================================
// Stored Record
// =============================================================================

/// A user as held in the store: the public view plus the password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

/// Hashes a password with argon2id and a fresh salt.
pub(crate) fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user operations.
///
/// ## Usage
/// ```rust,ignore
/// let users = store.users();
///
/// // Off the async runtime: hashing blocks
/// let created = tokio::task::spawn_blocking(move || users.insert(new_user)).await??;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    shared: SharedCollections,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub(crate) fn new(shared: SharedCollections) -> Self {
        UserRepository { shared }
    }

    /// Lists all users in insertion order.
    pub fn list(&self) -> StoreResult<Vec<User>> {
        let collections = read(&self.shared)?;
        debug!(count = collections.users.len(), "Listing users");
        Ok(collections.users.iter().map(|r| r.user.clone()).collect())
    }

    /// Gets a user by its id.
    pub fn get_by_id(&self, id: i64) -> StoreResult<User> {
        let collections = read(&self.shared)?;
        collections
            .users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
            .ok_or_else(|| CoreError::not_found(EntityKind::User, id).into())
    }

    /// Inserts a new user, storing only the hash of its password.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored user view
    /// * `Err(WeakPassword / InvalidEmail / InvalidRole)` - Payload rejected
    /// * `Err(DuplicateId)` - A user with this id exists
    pub fn insert(&self, new_user: NewUser) -> StoreResult<User> {
        let role = validate_new_user(&new_user)?;
        let password_hash = hash_password(&new_user.password)?;

        let user = User {
            id: new_user.id,
            lastname: new_user.lastname,
            name: new_user.name,
            email: new_user.email,
            country: new_user.country,
            city: new_user.city,
            address: new_user.address,
            phone: new_user.phone,
            role,
            profile_picture: new_user.profile_picture,
        };

        let mut collections = write(&self.shared)?;

        if collections.users.iter().any(|r| r.user.id == user.id) {
            return Err(CoreError::duplicate(EntityKind::User, user.id).into());
        }

        collections.users.push(UserRecord {
            user: user.clone(),
            password_hash,
        });
        info!(id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Replaces the fields of an existing user and re-hashes its password.
    ///
    /// An update without `profile_picture` keeps the current picture.
    pub fn update(&self, id: i64, update: UserUpdate) -> StoreResult<User> {
        let role = validate_user_update(&update)?;
        let password_hash = hash_password(&update.password)?;

        let mut collections = write(&self.shared)?;

        let record = collections
            .users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::User, id))?;

        let user = &mut record.user;
        user.lastname = update.lastname;
        user.name = update.name;
        user.email = update.email;
        user.country = update.country;
        user.city = update.city;
        user.address = update.address;
        user.phone = update.phone;
        user.role = role;
        if let Some(picture) = update.profile_picture {
            user.profile_picture = Some(picture);
        }
        record.password_hash = password_hash;

        info!(id, "User updated");
        Ok(record.user.clone())
    }

    /// Removes a user and returns its view.
    ///
    /// Sales that reference the user are kept.
    pub fn delete(&self, id: i64) -> StoreResult<User> {
        let mut collections = write(&self.shared)?;

        let index = collections
            .users
            .iter()
            .position(|r| r.user.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::User, id))?;

        let removed = collections.users.remove(index);
        info!(id, "User deleted");
        Ok(removed.user)
    }

    /// Records the blob key of an uploaded profile picture.
    pub fn set_profile_picture(&self, id: i64, key: String) -> StoreResult<User> {
        let mut collections = write(&self.shared)?;

        let record = collections
            .users
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::User, id))?;

        debug!(id, key = %key, "Setting profile picture");
        record.user.profile_picture = Some(key);
        Ok(record.user.clone())
    }

    /// Checks `candidate` against the stored hash of user `id`.
    ///
    /// ## Returns
    /// * `Ok(true)` - The password matches
    /// * `Ok(false)` - It does not
    /// * `Err(NotFound)` - No user with this id
    pub fn verify_password(&self, id: i64, candidate: &str) -> StoreResult<bool> {
        let stored = {
            let collections = read(&self.shared)?;
            collections
                .users
                .iter()
                .find(|r| r.user.id == id)
                .map(|r| r.password_hash.clone())
                .ok_or_else(|| CoreError::not_found(EntityKind::User, id))?
        };

        let parsed =
            PasswordHash::new(&stored).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }

    #[cfg(test)]
    fn password_hash(&self, id: i64) -> Option<String> {
        let collections = read(&self.shared).ok()?;
        collections
            .users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.password_hash.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
