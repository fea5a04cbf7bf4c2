//! Sale payload rules.
//!
//! Linkage (the user and product must exist) is checked by the store under
//! the same lock as the insert.

use super::{validate_id, ValidationResult};
use crate::error::ValidationError;
use crate::types::{DispatchStatus, NewSale, SaleUpdate};

/// Parses a dispatch status literal.
///
/// ## Rules
/// Exactly `"Despachado"` or `"No despachado"`. Anything else, including
/// other casings, is rejected.
pub fn parse_dispatch_status(value: &str) -> ValidationResult<DispatchStatus> {
    match value {
        "Despachado" => Ok(DispatchStatus::Dispatched),
        "No despachado" => Ok(DispatchStatus::NotDispatched),
        _ => Err(ValidationError::InvalidDispatchStatus {
            value: value.to_string(),
        }),
    }
}

/// Validates a sale create payload and returns the dispatch status to store.
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<DispatchStatus> {
    validate_id("id", sale.id)?;
    validate_id("id_user", sale.id_user)?;
    validate_id("id_product", sale.id_product)?;

    match sale.dispatched.as_deref() {
        Some(value) => parse_dispatch_status(value),
        None => Ok(DispatchStatus::default()),
    }
}

/// Validates a sale update payload.
///
/// Returns `None` when the payload leaves the dispatch status unchanged.
pub fn validate_sale_update(update: &SaleUpdate) -> ValidationResult<Option<DispatchStatus>> {
    validate_id("id_user", update.id_user)?;
    validate_id("id_product", update.id_product)?;

    update
        .dispatched
        .as_deref()
        .map(parse_dispatch_status)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_sale(dispatched: Option<&str>) -> NewSale {
        NewSale {
            id: 1,
            id_user: 1,
            id_product: 1,
            quantity: 2,
            date: "2024-05-01T10:00:00".to_string(),
            dispatched: dispatched.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_dispatch_status() {
        assert_eq!(
            parse_dispatch_status("Despachado").unwrap(),
            DispatchStatus::Dispatched
        );
        assert_eq!(
            parse_dispatch_status("No despachado").unwrap(),
            DispatchStatus::NotDispatched
        );

        assert_eq!(
            parse_dispatch_status("Enviado"),
            Err(ValidationError::InvalidDispatchStatus {
                value: "Enviado".to_string()
            })
        );
        assert!(parse_dispatch_status("despachado").is_err());
        assert!(parse_dispatch_status("").is_err());
    }

    #[test]
    fn test_new_sale_defaults_to_not_dispatched() {
        assert_eq!(
            validate_new_sale(&new_sale(None)).unwrap(),
            DispatchStatus::NotDispatched
        );
        assert_eq!(
            validate_new_sale(&new_sale(Some("Despachado"))).unwrap(),
            DispatchStatus::Dispatched
        );
    }

    #[test]
    fn test_new_sale_rejects_non_positive_references() {
        let mut sale = new_sale(None);
        sale.id_user = 0;

        assert_eq!(
            validate_new_sale(&sale),
            Err(ValidationError::MustBePositive {
                field: "id_user".to_string()
            })
        );
    }

    #[test]
    fn test_sale_update_keeps_status_when_omitted() {
        let update = SaleUpdate {
            id_user: 1,
            id_product: 2,
            quantity: 1,
            date: "2024-05-02".to_string(),
            dispatched: None,
        };

        assert_eq!(validate_sale_update(&update).unwrap(), None);
    }
}
