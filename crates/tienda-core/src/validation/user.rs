//! User payload rules.
//!
//! The same password, email and role checks run on create and on update.

use super::{validate_id, ValidationResult};
use crate::error::ValidationError;
use crate::types::{NewUser, Role, UserUpdate};
use crate::{MAX_EMAIL_LENGTH, MIN_PASSWORD_LENGTH};

/// Validates password strength.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LENGTH`] characters (counted as chars, not bytes)
/// - At least one uppercase character
///
/// ## Example
/// ```rust
/// use tienda_core::validation::user::validate_password;
///
/// assert!(validate_password("Abc12345").is_ok());
/// assert!(validate_password("abc12345").is_err());
/// assert!(validate_password("Abc1234").is_err());
/// ```
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword {
            reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        });
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(ValidationError::WeakPassword {
            reason: "must contain at least one uppercase letter".to_string(),
        });
    }

    Ok(())
}

/// Validates the shape of an email address.
///
/// ## Rules
/// - 1 to [`MAX_EMAIL_LENGTH`] characters (counted as chars, not bytes), no whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain has at least two non-empty dot-separated labels
///
/// ## Example
/// ```rust
/// use tienda_core::validation::user::validate_email;
///
/// assert!(validate_email("ana.perez+shop@example.com.ar").is_ok());
/// assert!(validate_email("ana@localhost").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidEmail {
        value: email.to_string(),
        reason: reason.to_string(),
    };

    if email.is_empty() {
        return Err(invalid("must not be empty"));
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(invalid("is too long"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain an @ symbol"))?;

    if local.is_empty() {
        return Err(invalid("local part must not be empty"));
    }

    if domain.contains('@') {
        return Err(invalid("must contain exactly one @ symbol"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Parses a role literal.
///
/// Matching is exact: `"cliente"` or `"Cliente "` are rejected.
pub fn parse_role(value: &str) -> ValidationResult<Role> {
    match value {
        "Cliente" => Ok(Role::Cliente),
        "Administrador" => Ok(Role::Administrador),
        _ => Err(ValidationError::InvalidRole {
            value: value.to_string(),
        }),
    }
}

/// Validates a user create payload and returns the parsed role.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<Role> {
    validate_id("id", user.id)?;
    validate_password(&user.password)?;
    validate_email(&user.email)?;
    parse_role(&user.role)
}

/// Validates a user update payload and returns the parsed role.
pub fn validate_user_update(update: &UserUpdate) -> ValidationResult<Role> {
    validate_password(&update.password)?;
    validate_email(&update.email)?;
    parse_role(&update.role)
}
